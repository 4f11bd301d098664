//! Candidate locator.
//!
//! Finds `<img>` elements that carry enough identity to be rewritten:
//!
//! - class convention: `class="... wp-image-<id> ..."`
//! - marker convention: `data-gaussholder-id="<id>"`
//!
//! Matching is a single regex pass over the text, not an HTML parser. Tags
//! split by `>` inside attribute values or using unusual quoting are simply
//! not found.

use std::sync::LazyLock;

use regex::Regex;

use super::SIZE_ATTR;
use crate::catalog::AttachmentId;

/// `<img>` with either a `wp-image-<id>` class or a `data-gaussholder-id`.
///
/// Groups: 1 = class attribute value, 2 = id from class, 3 = id from marker.
static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<img[^>]+(?:class=['"]([^'"]*wp-image-(\d+)[^'"]*)|data-gaussholder-id="(\d+)")[^>]+>"#,
    )
    .unwrap()
});

/// How a candidate was recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Convention {
    /// `wp-image-<id>` class token; holds the full class attribute value.
    Class(String),
    /// Explicit `data-gaussholder-id` attribute (gallery markup).
    Marker,
}

/// One detected image occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Verbatim matched markup, used for substitution.
    pub raw_tag: String,
    pub attachment_id: AttachmentId,
    pub convention: Convention,
}

impl Candidate {
    pub fn class(
        raw_tag: impl Into<String>,
        attachment_id: AttachmentId,
        class: impl Into<String>,
    ) -> Self {
        Self {
            raw_tag: raw_tag.into(),
            attachment_id,
            convention: Convention::Class(class.into()),
        }
    }

    pub fn marker(raw_tag: impl Into<String>, attachment_id: AttachmentId) -> Self {
        Self {
            raw_tag: raw_tag.into(),
            attachment_id,
            convention: Convention::Marker,
        }
    }

    /// Class attribute value, when matched through the class convention.
    pub fn class_attribute(&self) -> Option<&str> {
        match &self.convention {
            Convention::Class(class) => Some(class),
            Convention::Marker => None,
        }
    }

    #[inline]
    pub fn via_gallery_marker(&self) -> bool {
        matches!(self.convention, Convention::Marker)
    }
}

/// Result of consulting a [`CandidateHook`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Use built-in detection.
    Decline,
    /// Use this list instead of built-in detection.
    Replace(Vec<Candidate>),
    /// Leave the whole content untouched.
    Abort,
}

/// Extension point for markup produced by third-party renderers.
///
/// Called once per `process` with the input and the candidates found by the
/// built-in matcher.
pub trait CandidateHook: Sync {
    fn intercept(&self, html: &str, found: &[Candidate]) -> Interception;
}

impl<F> CandidateHook for F
where
    F: Fn(&str, &[Candidate]) -> Interception + Sync,
{
    fn intercept(&self, html: &str, found: &[Candidate]) -> Interception {
        self(html, found)
    }
}

/// Scan `html` with the built-in conventions, in document order.
///
/// Tags that were already rewritten (they carry `data-gaussholder-size`) are
/// skipped, as are ids that are zero or do not fit in a `u64`.
pub fn find_candidates(html: &str) -> Vec<Candidate> {
    let processed = format!("{SIZE_ATTR}=");

    IMG_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let tag = caps.get(0)?.as_str();
            if tag.contains(&processed) {
                return None;
            }

            if let Some(id) = caps.get(2) {
                let class = caps.get(1).map_or("", |m| m.as_str());
                parse_id(id.as_str()).map(|id| Candidate::class(tag, id, class))
            } else {
                let id = caps.get(3)?;
                parse_id(id.as_str()).map(|id| Candidate::marker(tag, id))
            }
        })
        .collect()
}

/// Run built-in detection and let `hook` override it.
///
/// Returns `None` when the content should be left unchanged: the hook
/// aborted, or there is nothing to process.
pub fn locate(html: &str, hook: Option<&dyn CandidateHook>) -> Option<Vec<Candidate>> {
    let found = find_candidates(html);

    let candidates = match hook.map(|h| h.intercept(html, &found)) {
        None | Some(Interception::Decline) => found,
        Some(Interception::Replace(list)) => list,
        Some(Interception::Abort) => {
            crate::debug!("mangle"; "candidate hook aborted, content left as is");
            return None;
        }
    };

    (!candidates.is_empty()).then_some(candidates)
}

fn parse_id(digits: &str) -> Option<AttachmentId> {
    digits.parse().ok().filter(|&id| id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_convention() {
        let html = r#"<p><img class="alignnone wp-image-42 size-medium" src="http://x/a.jpg"></p>"#;
        let found = find_candidates(html);

        assert_eq!(found.len(), 1);
        let c = &found[0];
        assert_eq!(c.attachment_id, 42);
        assert_eq!(c.class_attribute(), Some("alignnone wp-image-42 size-medium"));
        assert!(!c.via_gallery_marker());
        assert_eq!(
            c.raw_tag,
            r#"<img class="alignnone wp-image-42 size-medium" src="http://x/a.jpg">"#
        );
    }

    #[test]
    fn test_marker_convention() {
        let html = r#"<img data-gaussholder-id="7" class="attachment-thumbnail" src="t.jpg">"#;
        let found = find_candidates(html);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attachment_id, 7);
        assert!(found[0].via_gallery_marker());
        assert_eq!(found[0].class_attribute(), None);
    }

    #[test]
    fn test_single_quoted_class() {
        let found = find_candidates("<img class='wp-image-3' src='a.jpg'>");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attachment_id, 3);
        assert_eq!(found[0].class_attribute(), Some("wp-image-3"));
    }

    #[test]
    fn test_document_order() {
        let html = concat!(
            r#"<img class="wp-image-2" src="b.jpg">"#,
            "<p>text</p>",
            r#"<img data-gaussholder-id="9" class="attachment-large">"#,
            r#"<img class="wp-image-1" src="a.jpg">"#,
        );
        let ids: Vec<_> = find_candidates(html)
            .iter()
            .map(|c| c.attachment_id)
            .collect();
        assert_eq!(ids, vec![2, 9, 1]);
    }

    #[test]
    fn test_unrelated_images_ignored() {
        let html = r#"<img class="avatar" src="a.jpg"><img src="b.jpg"><div class="wp-image-4">"#;
        assert!(find_candidates(html).is_empty());
    }

    #[test]
    fn test_zero_id_ignored() {
        assert!(find_candidates(r#"<img class="wp-image-0" src="a.jpg">"#).is_empty());
        assert!(find_candidates(r#"<img data-gaussholder-id="0" class="x">"#).is_empty());
    }

    #[test]
    fn test_processed_tag_skipped() {
        let html = r#"<img class="wp-image-4 size-medium" src="data:," data-gaussholder-size="1,1,1" data-originalsrc="a.jpg">"#;
        assert!(find_candidates(html).is_empty());
    }

    #[test]
    fn test_locate_without_hook() {
        let html = r#"<img class="wp-image-5" src="a.jpg">"#;
        let found = locate(html, None).unwrap();
        assert_eq!(found.len(), 1);

        assert!(locate("<p>no images</p>", None).is_none());
    }

    #[test]
    fn test_locate_hook_decline() {
        let hook = |_: &str, _: &[Candidate]| Interception::Decline;
        let found = locate(r#"<img class="wp-image-5" src="a.jpg">"#, Some(&hook)).unwrap();
        assert_eq!(found[0].attachment_id, 5);
    }

    #[test]
    fn test_locate_hook_replace() {
        let hook = |html: &str, found: &[Candidate]| {
            assert!(found.is_empty());
            let tag = html.trim();
            Interception::Replace(vec![Candidate::class(tag, 11, "custom size-medium")])
        };
        let found = locate(r#"<img data-builder="11" src="a.jpg">"#, Some(&hook)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attachment_id, 11);
        assert_eq!(found[0].class_attribute(), Some("custom size-medium"));
    }

    #[test]
    fn test_locate_hook_abort() {
        let hook = |_: &str, _: &[Candidate]| Interception::Abort;
        assert!(locate(r#"<img class="wp-image-5" src="a.jpg">"#, Some(&hook)).is_none());
    }
}
