//! `[[attachment]]` entries: the image library.
//!
//! Each attachment lists where it renders at each size and, optionally, the
//! placeholder descriptor precomputed for that size.
//!
//! # Example
//!
//! ```toml
//! [[attachment]]
//! id = 42
//!
//! [attachment.sizes.medium]
//! url = "https://example.com/uploads/photo-300x200.jpg"
//! width = 300
//! height = 200
//! placeholder = "AAECAwQF..."
//! ```

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::SizesConfig;
use crate::catalog::AttachmentId;
use crate::config::{ConfigDiagnostics, FieldPath};

/// One image in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentConfig {
    pub id: AttachmentId,

    /// Renditions keyed by size name.
    #[serde(default)]
    pub sizes: BTreeMap<String, RenditionConfig>,
}

/// An attachment rendered at one size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionConfig {
    pub url: String,
    pub width: u32,
    pub height: u32,

    /// Placeholder descriptor; without one the image is left alone.
    #[serde(default)]
    pub placeholder: Option<String>,
}

/// Validate all attachments against the enabled sizes.
pub fn validate_attachments(
    attachments: &[AttachmentConfig],
    sizes: &SizesConfig,
    diag: &mut ConfigDiagnostics,
) {
    let mut seen = FxHashSet::default();

    for (i, attachment) in attachments.iter().enumerate() {
        let field = |rest: &str| FieldPath::owned(format!("attachment[{i}]{rest}"));

        if attachment.id == 0 {
            diag.error(field(".id"), "attachment id must be positive");
        } else if !seen.insert(attachment.id) {
            diag.error_with_hint(
                field(".id"),
                format!("duplicate attachment id {}", attachment.id),
                "merge the sizes into a single [[attachment]] entry",
            );
        }

        for (size, rendition) in &attachment.sizes {
            let size_field = || field(&format!(".sizes.{size}"));

            if rendition.width == 0 || rendition.height == 0 {
                diag.error(
                    size_field(),
                    format!(
                        "dimensions must be positive, got {}x{}",
                        rendition.width, rendition.height
                    ),
                );
            }
            if rendition.url.is_empty() {
                diag.error(size_field(), "url must not be empty");
            }
            if !sizes.contains(size) {
                diag.warn(size_field(), format!("size `{size}` is not enabled in [sizes]"));
            }
        }
    }
}
