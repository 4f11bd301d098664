//! Config-backed image library.
//!
//! Serves both collaborator contracts from `gaussholder.toml`: enabled sizes
//! come from `[sizes]`, renditions and placeholders from `[[attachment]]`.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::catalog::{AttachmentId, LookupError, PlaceholderStore, Rendition, SizeCatalog};
use crate::config::{GaussholderConfig, RenditionConfig, SizesConfig};

/// In-memory image library.
#[derive(Debug, Clone, Default)]
pub struct Library {
    sizes: SizesConfig,
    attachments: FxHashMap<AttachmentId, BTreeMap<String, RenditionConfig>>,
}

impl Library {
    pub fn from_config(config: &GaussholderConfig) -> Self {
        Self {
            sizes: config.sizes.clone(),
            attachments: config
                .attachments
                .iter()
                .map(|a| (a.id, a.sizes.clone()))
                .collect(),
        }
    }

    fn entry(&self, attachment: AttachmentId, size: &str) -> Option<&RenditionConfig> {
        self.attachments.get(&attachment)?.get(size)
    }
}

impl SizeCatalog for Library {
    fn enabled_sizes(&self) -> Vec<String> {
        self.sizes.names().map(str::to_owned).collect()
    }

    fn is_enabled(&self, size: &str) -> bool {
        self.sizes.contains(size)
    }

    fn blur_radius(&self, size: &str) -> u32 {
        self.sizes.radius(size).unwrap_or_default()
    }

    fn rendition(
        &self,
        attachment: AttachmentId,
        size: &str,
    ) -> Result<Option<Rendition>, LookupError> {
        Ok(self
            .entry(attachment, size)
            .map(|r| Rendition::new(r.url.as_str(), r.width, r.height)))
    }
}

impl PlaceholderStore for Library {
    fn placeholder(
        &self,
        attachment: AttachmentId,
        size: &str,
    ) -> Result<Option<String>, LookupError> {
        Ok(self
            .entry(attachment, size)
            .and_then(|r| r.placeholder.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn library() -> Library {
        Library::from_config(&test_parse_config(
            r#"
[sizes]
thumbnail = 3
medium = 5

[[attachment]]
id = 42
[attachment.sizes.medium]
url = "http://x/img-medium.jpg"
width = 300
height = 200
placeholder = "AAA"
[attachment.sizes.full]
url = "http://x/img.jpg"
width = 1200
height = 800
"#,
        ))
    }

    #[test]
    fn test_enabled_sizes_in_name_order() {
        assert_eq!(library().enabled_sizes(), vec!["medium", "thumbnail"]);
    }

    #[test]
    fn test_is_enabled_and_radius() {
        let lib = library();
        assert!(lib.is_enabled("medium"));
        assert!(!lib.is_enabled("full"));
        assert_eq!(lib.blur_radius("thumbnail"), 3);
        assert_eq!(lib.blur_radius("full"), 0);
    }

    #[test]
    fn test_rendition_lookup() {
        let lib = library();
        assert_eq!(
            lib.rendition(42, "medium").unwrap(),
            Some(Rendition::new("http://x/img-medium.jpg", 300, 200))
        );
        // renditions exist for sizes that are not enabled
        assert!(lib.rendition(42, "full").unwrap().is_some());
        assert_eq!(lib.rendition(42, "thumbnail").unwrap(), None);
        assert_eq!(lib.rendition(7, "medium").unwrap(), None);
    }

    #[test]
    fn test_placeholder_lookup() {
        let lib = library();
        assert_eq!(lib.placeholder(42, "medium").unwrap().as_deref(), Some("AAA"));
        assert_eq!(lib.placeholder(42, "full").unwrap(), None);
        assert_eq!(lib.placeholder(1, "medium").unwrap(), None);
    }
}
