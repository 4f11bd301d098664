//! Configuration management for `gaussholder.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── sizes      # [sizes]
//! │   ├── attachment # [[attachment]]
//! │   └── footer     # [footer]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # GaussholderConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                         |
//! |------------------|-------------------------------------------------|
//! | `[sizes]`        | Enabled sizes and their blur radius             |
//! | `[[attachment]]` | Image library: renditions and placeholders      |
//! | `[footer]`       | Shared JPEG header and client runtime script    |

pub mod section;
pub mod types;
mod util;

pub use section::{
    AttachmentConfig, FooterConfig, MAX_RADIUS, RenditionConfig, SizesConfig,
    validate_attachments,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};
pub use util::find_config_file;

use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "gaussholder.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing gaussholder.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GaussholderConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Enabled sizes
    #[serde(default)]
    pub sizes: SizesConfig,

    /// Image library
    #[serde(default, rename = "attachment")]
    pub attachments: Vec<AttachmentConfig>,

    /// Footer script settings
    #[serde(default)]
    pub footer: FooterConfig,
}

impl GaussholderConfig {
    /// Load configuration.
    ///
    /// `path` is either absolute or a file name searched upward from the
    /// working directory.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path =
            find_config_file(path).ok_or_else(|| ConfigError::NotFound(path.to_path_buf()))?;

        let mut config = Self::from_path(&config_path)?;
        config.finalize(config_path);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Record where the config came from and resolve relative paths.
    fn finalize(&mut self, config_path: PathBuf) {
        self.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.config_path = config_path;
        self.footer.normalize(&self.root);
    }

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.sizes.validate(&mut diag);
        validate_attachments(&self.attachments, &self.sizes, &mut diag);
        self.footer.validate(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config text.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> GaussholderConfig {
    let (parsed, ignored) = GaussholderConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
