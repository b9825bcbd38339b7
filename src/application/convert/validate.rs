//! Input validation

use std::path::Path;

use crate::domain::ports::FileSystem;
use crate::error::{PipelineError, PipelineResult};

/// The source must be an existing regular file
pub(super) fn validate<FS: FileSystem>(fs: &FS, source: &Path) -> PipelineResult<()> {
    if fs.is_file(source) {
        Ok(())
    } else {
        Err(PipelineError::MissingInput {
            path: source.to_path_buf(),
        })
    }
}
