//! Collaborator contracts consumed by the rewrite pipeline.
//!
//! The pipeline never generates placeholders or knows how image sizes are
//! configured. It asks two read-only collaborators:
//!
//! - [`SizeCatalog`]: which named sizes are enabled, their blur radius, and
//!   where a given attachment renders at a given size
//! - [`PlaceholderStore`]: the opaque placeholder descriptor for an
//!   (attachment, size) pair
//!
//! Both are `Sync` so a single pipeline can be shared across threads.

use thiserror::Error;

/// Positive integer identifying a source image.
pub type AttachmentId = u64;

/// A lookup failure inside a collaborator.
///
/// Per-image problems (unknown size, missing placeholder) are not errors and
/// are reported as `None`. This is for broken backends only, and it
/// propagates to the caller of `Mangler::process`.
#[derive(Debug, Error)]
#[error("{backend} lookup failed for attachment {attachment}: {message}")]
pub struct LookupError {
    pub backend: &'static str,
    pub attachment: AttachmentId,
    pub message: String,
}

impl LookupError {
    pub fn new(
        backend: &'static str,
        attachment: AttachmentId,
        message: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            attachment,
            message: message.into(),
        }
    }
}

/// Rendered form of an attachment at one named size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendition {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Rendition {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }
}

/// Named display sizes known to the host.
pub trait SizeCatalog: Sync {
    /// Enabled size names, in catalog iteration order.
    ///
    /// The URL fallback of the size resolver takes the first match in this
    /// order, so implementations should keep it deterministic.
    fn enabled_sizes(&self) -> Vec<String>;

    /// Whether placeholders are enabled for `size`.
    fn is_enabled(&self, size: &str) -> bool {
        self.enabled_sizes().iter().any(|s| s == size)
    }

    /// Blur radius configured for `size`.
    fn blur_radius(&self, size: &str) -> u32;

    /// URL and dimensions of `attachment` rendered at `size`.
    fn rendition(&self, attachment: AttachmentId, size: &str)
    -> Result<Option<Rendition>, LookupError>;
}

/// Precomputed placeholder descriptors.
pub trait PlaceholderStore: Sync {
    fn placeholder(&self, attachment: AttachmentId, size: &str)
    -> Result<Option<String>, LookupError>;
}
