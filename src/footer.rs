//! Page footer markup.
//!
//! The client runtime needs the JPEG header shared by every placeholder
//! (descriptors only carry the scan data). The footer defines it as a global
//! before the runtime script, then adds the clip path used while fading in:
//!
//! ```html
//! <script>var GaussholderHeader = {"header":"/9j/4AAQ...","height_offset":163,"length":623};
//! ...runtime...
//! </script><svg width="0" height="0" ...><clipPath id="gaussclip" ...></svg>
//! ```

use std::fs;

use anyhow::{Context, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::json;

use crate::config::FooterConfig;
use crate::embed::CLIP_PATH_SVG;

/// JPEG header bytes shared by all placeholders on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedHeader {
    pub header: Vec<u8>,
    pub height_offset: u32,
    pub length: u32,
}

impl SharedHeader {
    /// Read the header file named in `[footer]`.
    ///
    /// A zero `length` means "the whole file".
    pub fn from_config(config: &FooterConfig) -> Result<Self> {
        let path = config
            .header
            .as_ref()
            .context("`footer.header` is not set")?;
        let header =
            fs::read(path).with_context(|| format!("failed to read header `{}`", path.display()))?;

        let length = match config.length {
            0 => u32::try_from(header.len()).context("header file too large")?,
            n => n,
        };

        Ok(Self {
            header,
            height_offset: config.height_offset,
            length,
        })
    }

    /// `GaussholderHeader` object, header base64-encoded.
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "header": STANDARD.encode(&self.header),
            "height_offset": self.height_offset,
            "length": self.length,
        })
    }
}

/// Read the client runtime named in `[footer]`.
pub fn load_script(config: &FooterConfig) -> Result<String> {
    let path = config
        .script
        .as_ref()
        .context("`footer.script` is not set")?;
    fs::read_to_string(path).with_context(|| format!("failed to read script `{}`", path.display()))
}

/// Render the footer: header global, runtime script, clip path.
pub fn render(header: &SharedHeader, script: &str) -> String {
    format!(
        "<script>var GaussholderHeader = {};\n{}\n</script>{}",
        header.to_json(),
        script,
        CLIP_PATH_SVG
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_render() {
        let header = SharedHeader {
            header: vec![0xff, 0xd8, 0xff],
            height_offset: 2,
            length: 3,
        };
        let html = render(&header, "run();");

        assert_eq!(
            html,
            format!(
                "<script>var GaussholderHeader = {{\"header\":\"/9j/\",\"height_offset\":2,\"length\":3}};\nrun();\n</script>{CLIP_PATH_SVG}"
            )
        );
    }

    #[test]
    fn test_from_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.bin");
        fs::write(&path, [1u8, 2, 3, 4]).unwrap();

        let config = FooterConfig {
            header: Some(path.clone()),
            height_offset: 1,
            length: 0,
            script: None,
        };
        let header = SharedHeader::from_config(&config).unwrap();
        assert_eq!(header.header, vec![1, 2, 3, 4]);
        assert_eq!(header.length, 4);

        let header = SharedHeader::from_config(&FooterConfig {
            length: 2,
            ..config
        })
        .unwrap();
        assert_eq!(header.length, 2);
    }

    #[test]
    fn test_missing_inputs() {
        let config = FooterConfig::default();
        assert!(SharedHeader::from_config(&config).is_err());
        assert!(load_script(&config).is_err());

        let config = FooterConfig {
            script: Some(PathBuf::from("/definitely/missing.js")),
            ..Default::default()
        };
        let err = load_script(&config).unwrap_err();
        assert!(err.to_string().contains("missing.js"));
    }
}
