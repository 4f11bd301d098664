//! Size resolver.
//!
//! Works out which named size an image was rendered at. First success wins:
//!
//! 1. class convention with a `size-<name>` class token
//! 2. class convention without one: compare the (entity-decoded) `src`
//!    against every enabled size's rendition URL
//! 3. marker convention: `attachment-<name>` class token
//!
//! A resolved size must also be enabled in the catalog.

use std::sync::LazyLock;

use regex::Regex;

use super::locate::{Candidate, Convention};
use crate::catalog::{LookupError, SizeCatalog};
use crate::utils::html::unescape;

static SIZE_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsize-([\w-]+)\b").unwrap());

static SRC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bsrc=['"]([^'"]*)"#).unwrap());

static ATTACHMENT_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#" class=['"][^'"]*\battachment-([\w-]+)\b"#).unwrap());

/// Outcome of size resolution for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Enabled size, ready for rewriting.
    Size(String),
    /// A size was found but placeholders are off for it.
    Disabled(String),
    /// No strategy produced a size.
    Unresolved,
}

/// Resolve the display size of `candidate`.
///
/// Only the URL fallback talks to the catalog's renditions, so it is the only
/// path that can fail.
pub fn resolve_size(
    candidate: &Candidate,
    catalog: &dyn SizeCatalog,
) -> Result<Resolved, LookupError> {
    let size = match &candidate.convention {
        Convention::Class(class) => match capture(&SIZE_CLASS_RE, class) {
            Some(size) => Some(size.to_owned()),
            None => size_from_src(candidate, catalog)?,
        },
        Convention::Marker => {
            capture(&ATTACHMENT_CLASS_RE, &candidate.raw_tag).map(str::to_owned)
        }
    };

    Ok(match size {
        Some(size) if catalog.is_enabled(&size) => Resolved::Size(size),
        Some(size) => Resolved::Disabled(size),
        None => Resolved::Unresolved,
    })
}

/// Find the enabled size whose rendition URL equals the tag's `src`.
///
/// Hosts escape attribute values, so `src` is entity-decoded before the
/// comparison. Ties go to the first size in catalog order.
fn size_from_src(
    candidate: &Candidate,
    catalog: &dyn SizeCatalog,
) -> Result<Option<String>, LookupError> {
    let Some(src) = capture(&SRC_RE, &candidate.raw_tag) else {
        return Ok(None);
    };
    let src = unescape(src);

    for size in catalog.enabled_sizes() {
        if let Some(rendition) = catalog.rendition(candidate.attachment_id, &size)?
            && rendition.url == src
        {
            return Ok(Some(size));
        }
    }

    Ok(None)
}

fn capture<'h>(re: &Regex, haystack: &'h str) -> Option<&'h str> {
    re.captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
