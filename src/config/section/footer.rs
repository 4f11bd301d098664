//! `[footer]` section configuration.
//!
//! Inputs for the page bootstrap script emitted by `gaussholder footer`.
//!
//! # Example
//!
//! ```toml
//! [footer]
//! header = "data/header.bin"       # Shared JPEG header bytes
//! height_offset = 163              # Offset of the height field in the header
//! length = 623                     # Header length
//! script = "dist/gaussholder.min.js"
//! ```
//!
//! Paths are relative to the directory holding `gaussholder.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Footer script inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Shared JPEG header file.
    pub header: Option<PathBuf>,

    /// Offset of the height field inside the header.
    pub height_offset: u32,

    /// Header length in bytes. Defaults to the file size when 0.
    pub length: u32,

    /// Client runtime script.
    pub script: Option<PathBuf>,
}

impl FooterConfig {
    /// Resolve relative paths against `root`.
    pub fn normalize(&mut self, root: &Path) {
        for path in [&mut self.header, &mut self.script].into_iter().flatten() {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(header) = &self.header
            && !header.is_file()
        {
            diag.error(
                FieldPath::new("footer.header"),
                format!("header file `{}` not found", header.display()),
            );
        }
        if let Some(script) = &self.script
            && !script.is_file()
        {
            diag.error(
                FieldPath::new("footer.script"),
                format!("script file `{}` not found", script.display()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_footer_config() {
        let config = test_parse_config(
            "[footer]\nheader = \"header.bin\"\nheight_offset = 163\nlength = 623\nscript = \"g.js\"",
        );

        assert_eq!(config.footer.header, Some(PathBuf::from("header.bin")));
        assert_eq!(config.footer.height_offset, 163);
        assert_eq!(config.footer.length, 623);
        assert_eq!(config.footer.script, Some(PathBuf::from("g.js")));
    }

    #[test]
    fn test_footer_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.footer, FooterConfig::default());
    }

    #[test]
    fn test_footer_normalize() {
        let mut footer = FooterConfig {
            header: Some("header.bin".into()),
            script: Some("/abs/g.js".into()),
            ..Default::default()
        };
        footer.normalize(Path::new("/site"));

        assert_eq!(footer.header, Some(PathBuf::from("/site/header.bin")));
        assert_eq!(footer.script, Some(PathBuf::from("/abs/g.js")));
    }

    #[test]
    fn test_footer_missing_files() {
        let footer = FooterConfig {
            header: Some("/definitely/missing/header.bin".into()),
            ..Default::default()
        };
        let mut diag = ConfigDiagnostics::new();
        footer.validate(&mut diag);
        assert_eq!(diag.len(), 1);
    }
}
