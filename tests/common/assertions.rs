//! Assertion helpers for workspace state.

use std::path::Path;

/// List all files in a directory recursively, relative to `dir`, sorted
pub fn list_all_files(dir: &Path) -> Vec<String> {
    fn walk(base: &Path, dir: &Path, files: &mut Vec<String>) {
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    walk(base, &path, files);
                } else if let Ok(relative) = path.strip_prefix(base) {
                    files.push(relative.to_string_lossy().replace('\\', "/"));
                }
            }
        }
    }

    let mut files = Vec::new();
    walk(dir, dir, &mut files);
    files.sort();
    files
}

/// Assert that no staged asset, container or temp build directory remains.
///
/// # Example
/// ```ignore
/// assert_no_residue!(env, "model.fbx");
/// ```
#[macro_export]
macro_rules! assert_no_residue {
    ($env:expr, $input:expr) => {
        for managed in [
            format!("Assets/{}", $input),
            "Assets/TempZepetoItem.prefab".to_string(),
            "TempBuild".to_string(),
        ] {
            assert!(
                !$env.exists(&managed),
                "{} left behind; workspace contains: {:?}",
                managed,
                $crate::common::list_all_files($env.root.path())
            );
        }
    };
}
