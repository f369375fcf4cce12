//! Generated script output
//!
//! Thin I/O layer: ensures the output directory exists and writes the
//! generated source under the fixed `test.generated.<ext>` name.

use crate::config::ScriptLanguage;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Write the generated script, creating the output directory if needed.
/// Returns the path of the written file.
pub fn write_script(output_dir: &Path, language: ScriptLanguage, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let output_file = output_dir.join(format!("test.generated.{}", language.ext()));
    fs::write(&output_file, content)?;

    Ok(output_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("build").join("generated");

        let path = write_script(&output_dir, ScriptLanguage::Js, "export const options = {};")
            .unwrap();

        assert!(path.ends_with("test.generated.js"));
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "export const options = {};");
    }

    #[test]
    fn test_extension_follows_language() {
        let dir = TempDir::new().unwrap();

        let path = write_script(dir.path(), ScriptLanguage::Ts, "// ts").unwrap();
        assert!(path.ends_with("test.generated.ts"));
    }
}
