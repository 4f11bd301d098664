//! Attribute tagger.
//!
//! Images built from attribute maps (galleries, widgets) never pass through
//! `wp-image-<id>` class markup. Tagging their attributes with
//! `data-gaussholder-id` makes them detectable by a later `process` pass once
//! rendered to HTML.

use serde::{Deserialize, Serialize};

use super::MARKER_ATTR;
use crate::catalog::{AttachmentId, SizeCatalog};
use crate::utils::html::{escape_attr, parse_attributes};

/// Ordered attribute map. Insertion order is kept when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrMap(Vec<(String, String)>);

impl AttrMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an attribute string such as `class="a b" alt='x'`.
    pub fn parse(s: &str) -> Self {
        let mut map = Self::new();
        for (name, value) in parse_attributes(s) {
            map.set(name, value);
        }
        map
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set `name`, replacing an existing value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JSON object, keys in insertion order.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .iter()
            .map(|(n, v)| (n.to_owned(), serde_json::Value::from(v)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }

    /// Render as an HTML attribute list: `name="value" ...`.
    pub fn to_html(&self) -> String {
        self.iter()
            .map(|(n, v)| format!("{n}=\"{}\"", escape_attr(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttrMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

/// Mark `attrs` with the attachment id if `size` has placeholders enabled.
pub fn tag(
    mut attrs: AttrMap,
    attachment: AttachmentId,
    size: &str,
    catalog: &dyn SizeCatalog,
) -> AttrMap {
    if !catalog.is_enabled(size) {
        return attrs;
    }

    attrs.set(MARKER_ATTR, attachment.to_string());
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{LookupError, Rendition};

    struct Thumbnails;

    impl SizeCatalog for Thumbnails {
        fn enabled_sizes(&self) -> Vec<String> {
            vec!["thumbnail".into()]
        }

        fn blur_radius(&self, _size: &str) -> u32 {
            3
        }

        fn rendition(
            &self,
            _attachment: AttachmentId,
            _size: &str,
        ) -> Result<Option<Rendition>, LookupError> {
            Ok(None)
        }
    }

    fn gallery_attrs() -> AttrMap {
        [
            ("src", "http://x/7-150x150.jpg"),
            ("class", "attachment-thumbnail size-thumbnail"),
            ("alt", ""),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tag_enabled_size() {
        let tagged = tag(gallery_attrs(), 7, "thumbnail", &Thumbnails);

        assert_eq!(tagged.get("data-gaussholder-id"), Some("7"));
        assert_eq!(tagged.len(), 4);
        // original attributes untouched, marker appended last
        assert_eq!(tagged.iter().last(), Some(("data-gaussholder-id", "7")));
        assert_eq!(tagged.get("class"), Some("attachment-thumbnail size-thumbnail"));
    }

    #[test]
    fn test_tag_disabled_size() {
        let attrs = gallery_attrs();
        assert_eq!(tag(attrs.clone(), 7, "full", &Thumbnails), attrs);
    }

    #[test]
    fn test_tag_replaces_existing_marker() {
        let mut attrs = gallery_attrs();
        attrs.set("data-gaussholder-id", "1");
        let tagged = tag(attrs, 7, "thumbnail", &Thumbnails);
        assert_eq!(tagged.get("data-gaussholder-id"), Some("7"));
        assert_eq!(tagged.len(), 4);
    }

    #[test]
    fn test_attr_map_parse_and_render() {
        let attrs = AttrMap::parse(r#"class="a b" alt='say "hi"' loading"#);
        assert_eq!(attrs.get("alt"), Some(r#"say "hi""#));
        assert_eq!(attrs.get("loading"), Some(""));
        assert_eq!(
            attrs.to_html(),
            r#"class="a b" alt="say &quot;hi&quot;" loading="""#
        );
    }

    #[test]
    fn test_attr_map_json_keeps_order() {
        let json = gallery_attrs().to_json().to_string();
        assert_eq!(
            json,
            r#"{"src":"http://x/7-150x150.jpg","class":"attachment-thumbnail size-thumbnail","alt":""}"#
        );
    }
}
