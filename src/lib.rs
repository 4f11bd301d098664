//! Gaussholder - blurred placeholders for images in rendered HTML.
//!
//! `<img>` tags are rewritten to load a shared blank GIF and carry a
//! precomputed placeholder, which the client runtime paints as a blurred
//! preview and then fades into the real image.
//!
//! # Example
//!
//! ```ignore
//! let config = GaussholderConfig::load(Path::new("gaussholder.toml"))?;
//! let library = Library::from_config(&config);
//! let html = Mangler::new(&library, &library).process(content)?;
//! ```

pub mod logger;

pub mod catalog;
pub mod config;
pub mod embed;
pub mod footer;
pub mod library;
pub mod mangle;
pub mod utils;

pub use catalog::{AttachmentId, LookupError, PlaceholderStore, Rendition, SizeCatalog};
pub use config::GaussholderConfig;
pub use library::Library;
pub use mangle::{AttrMap, Candidate, CandidateHook, Interception, Mangler, tag};
