//! Tag rewriter.
//!
//! Turns a matched `<img>` into its deferred form:
//!
//! ```text
//! <img class="wp-image-4 size-medium" src="a.jpg" srcset="a.jpg 1x">
//! <img class="wp-image-4 size-medium" src="data:image/gif;base64,..." srcset=""
//!      data-gaussholder="..." data-gaussholder-size="300,200,5"
//!      data-originalsrc="a.jpg" data-originalsrcset="a.jpg 1x">
//! ```
//!
//! Every other attribute is kept byte for byte.

use std::sync::LazyLock;

use regex::Regex;

use super::{DESCRIPTOR_ATTR, ORIGINAL_SRC_ATTR, ORIGINAL_SRCSET_ATTR, SIZE_ATTR};
use crate::catalog::Rendition;
use crate::embed::blank_url;
use crate::utils::html::escape_attr;

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\swidth=['"](\d+)['"]"#).unwrap());

static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\sheight=['"](\d+)['"]"#).unwrap());

static SRC_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\ssrc\s*=").unwrap());

static SRCSET_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\ssrcset\s*=").unwrap());

const SRC_NEEDLE: &str = " src=\"";
const SRCSET_NEEDLE: &str = " srcset=\"";

/// Rendered width and height for one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Catalog dimensions, overridden by explicit `width`/`height` attributes.
    ///
    /// Each axis is overridden independently. Values that are zero or do not
    /// fit in a `u32` leave the catalog value in place.
    pub fn for_tag(raw_tag: &str, rendition: &Rendition) -> Self {
        Self {
            width: attr_number(&WIDTH_RE, raw_tag).unwrap_or(rendition.width),
            height: attr_number(&HEIGHT_RE, raw_tag).unwrap_or(rendition.height),
        }
    }
}

/// Rewrite `raw_tag` to load behind a placeholder.
///
/// Returns `None` unless the tag has exactly one `src`, written as
/// ` src="`, and every `srcset` is written as ` srcset="`. Any other spelling
/// would survive next to the new attributes as a live duplicate.
pub fn rewrite(raw_tag: &str, descriptor: &str, dims: Dimensions, radius: u32) -> Option<String> {
    let src_count = raw_tag.matches(SRC_NEEDLE).count();
    if src_count != 1
        || SRC_ATTR_RE.find_iter(raw_tag).count() != src_count
        || SRCSET_ATTR_RE.find_iter(raw_tag).count() != raw_tag.matches(SRCSET_NEEDLE).count()
    {
        return None;
    }

    let new_attrs = format!(
        r#"src="{blank}" srcset="" {DESCRIPTOR_ATTR}="{descriptor}" {SIZE_ATTR}="{w},{h},{radius}""#,
        blank = escape_attr(blank_url()),
        descriptor = escape_attr(descriptor),
        w = dims.width,
        h = dims.height,
    );

    let tag = raw_tag.replace(SRCSET_NEEDLE, &format!(" {ORIGINAL_SRCSET_ATTR}=\""));
    Some(tag.replace(SRC_NEEDLE, &format!(" {new_attrs} {ORIGINAL_SRC_ATTR}=\"")))
}

fn attr_number(re: &Regex, raw_tag: &str) -> Option<u32> {
    re.captures(raw_tag)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
        .filter(|&n| n > 0)
}
