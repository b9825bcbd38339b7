//! Output relocation

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::{ContentHash, PipelinePaths};
use crate::error::{PipelineError, PipelineResult};

/// Move the generated bundle over the final output, returning its size and hash
pub(super) fn relocate<FS: FileSystem>(
    fs: &FS,
    paths: &PipelinePaths,
) -> PipelineResult<(u64, ContentHash)> {
    let from = &paths.generated_bundle;
    let to = &paths.final_output;
    let fail = |reason: String| PipelineError::RelocationFailed {
        from: from.clone(),
        to: to.clone(),
        reason,
    };

    fs.create_dir_all(&paths.output_dir)
        .map_err(|e| fail(e.to_string()))?;
    if fs.exists(to) {
        fs.remove_file(to)
            .map_err(|e| fail(format!("could not replace existing output: {}", e)))?;
    }
    fs.rename(from, to).map_err(|e| fail(e.to_string()))?;

    let bytes = fs.read(to).map_err(|e| fail(e.to_string()))?;
    Ok((bytes.len() as u64, ContentHash::from_bytes(&bytes)))
}
