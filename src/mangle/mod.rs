//! Image rewrite pipeline.
//!
//! Rewrites `<img>` tags in rendered HTML so the browser does not fetch the
//! real image up front. Each rewritten tag carries a placeholder descriptor
//! and its final size so the client runtime can paint a blurred preview and
//! fade in the real image once loaded.
//!
//! # Architecture
//!
//! ```text
//! html ─► locate ─► resolve_size ─► lookups ─► rewrite ─► html'
//!          │  ▲                        │
//!          │  └── CandidateHook        └── SizeCatalog / PlaceholderStore
//!          └── Candidate (class | marker convention)
//! ```
//!
//! Images that cannot be handled (unknown or disabled size, no placeholder,
//! no `src`) are left exactly as they were. Only collaborator failures reach
//! the caller.

mod locate;
mod rewrite;
mod size;
pub mod tagger;


pub use locate::{Candidate, CandidateHook, Convention, Interception, find_candidates, locate};
pub use rewrite::{Dimensions, rewrite};
pub use size::{Resolved, resolve_size};
pub use tagger::{AttrMap, tag};

use crate::catalog::{LookupError, PlaceholderStore, SizeCatalog};
use crate::debug;

/// Attachment id marker set by the tagger.
pub const MARKER_ATTR: &str = "data-gaussholder-id";
/// Placeholder descriptor.
pub const DESCRIPTOR_ATTR: &str = "data-gaussholder";
/// `"width,height,radius"`; also marks a tag as already processed.
pub const SIZE_ATTR: &str = "data-gaussholder-size";
pub const ORIGINAL_SRC_ATTR: &str = "data-originalsrc";
pub const ORIGINAL_SRCSET_ATTR: &str = "data-originalsrcset";

/// Output of one pipeline pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mangled {
    pub html: String,
    /// Candidates that were rewritten.
    pub rewritten: usize,
    /// Candidates left untouched.
    pub skipped: usize,
}

/// Content pipeline over a size catalog and a placeholder store.
///
/// Stateless between calls; a single `Mangler` can be shared across threads.
pub struct Mangler<'a> {
    catalog: &'a dyn SizeCatalog,
    store: &'a dyn PlaceholderStore,
    hook: Option<&'a dyn CandidateHook>,
}

impl<'a> Mangler<'a> {
    pub fn new(catalog: &'a dyn SizeCatalog, store: &'a dyn PlaceholderStore) -> Self {
        Self {
            catalog,
            store,
            hook: None,
        }
    }

    /// Let `hook` replace or veto built-in candidate detection.
    pub fn with_hook(mut self, hook: &'a dyn CandidateHook) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Rewrite every eligible image in `html`.
    pub fn process(&self, html: &str) -> Result<String, LookupError> {
        self.mangle(html).map(|m| m.html)
    }

    /// Same as [`process`](Self::process), with counts.
    pub fn mangle(&self, html: &str) -> Result<Mangled, LookupError> {
        let Some(candidates) = locate(html, self.hook) else {
            return Ok(Mangled {
                html: html.to_owned(),
                rewritten: 0,
                skipped: 0,
            });
        };

        let mut buffer = html.to_owned();
        let mut rewritten = 0;
        let mut skipped = 0;

        for candidate in &candidates {
            match self.rewrite_candidate(candidate)? {
                Some(new_tag) => {
                    // Byte-identical tags get the same rewrite, so replace all.
                    buffer = buffer.replace(&candidate.raw_tag, &new_tag);
                    rewritten += 1;
                }
                None => skipped += 1,
            }
        }

        Ok(Mangled {
            html: buffer,
            rewritten,
            skipped,
        })
    }

    /// Produce the replacement markup for one candidate, if it qualifies.
    fn rewrite_candidate(&self, candidate: &Candidate) -> Result<Option<String>, LookupError> {
        let id = candidate.attachment_id;

        let size = match resolve_size(candidate, self.catalog)? {
            Resolved::Size(size) => size,
            Resolved::Disabled(size) => {
                debug!("mangle"; "skip attachment {id}: size `{size}` is not enabled");
                return Ok(None);
            }
            Resolved::Unresolved => {
                debug!("mangle"; "skip attachment {id}: could not resolve size");
                return Ok(None);
            }
        };

        let Some(descriptor) = self.store.placeholder(id, &size)? else {
            debug!("mangle"; "skip attachment {id}: no placeholder for `{size}`");
            return Ok(None);
        };

        let Some(rendition) = self.catalog.rendition(id, &size)? else {
            debug!("mangle"; "skip attachment {id}: no `{size}` rendition");
            return Ok(None);
        };

        let dims = Dimensions::for_tag(&candidate.raw_tag, &rendition);
        let radius = self.catalog.blur_radius(&size);

        let new_tag = rewrite(&candidate.raw_tag, &descriptor, dims, radius);
        if new_tag.is_none() {
            debug!("mangle"; "skip attachment {id}: tag has no usable src attribute");
        }
        Ok(new_tag)
    }
}
