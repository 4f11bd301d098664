//! Configuration section definitions.

mod attachment;
mod footer;
mod sizes;

pub use attachment::{AttachmentConfig, RenditionConfig, validate_attachments};
pub use footer::FooterConfig;
pub use sizes::{MAX_RADIUS, SizesConfig};
