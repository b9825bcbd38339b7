//! Reusable test content.

/// A small model file; content is opaque to the pipeline
pub const MODEL_BYTES: &[u8] = b"Kaydara FBX Binary  \x00\x1a\x00mesh:cube";

/// A different model, for overwrite checks
pub const OTHER_MODEL_BYTES: &[u8] = b"Kaydara FBX Binary  \x00\x1a\x00mesh:sphere";

/// Header every archive bundle starts with
pub const BUNDLE_MAGIC: &[u8] = b"IPKB";

/// Config selecting the command engine with `program`
pub fn command_engine_config(program: &str, args: &[&str]) -> String {
    let args = args
        .iter()
        .map(|a| format!("{:?}", a))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[packaging]\nengine = \"command\"\ncommand = {:?}\nargs = [{}]\n",
        program, args
    )
}
