//! `[sizes]` section configuration.
//!
//! Lists the image sizes that get placeholders, with the blur radius the
//! client runtime applies to each.
//!
//! # Example
//!
//! ```toml
//! [sizes]
//! thumbnail = 3
//! medium = 5
//! large = 16
//! ```
//!
//! Sizes are iterated in name order, which also decides ties when two sizes
//! render to the same URL.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Largest blur radius the client runtime accepts.
pub const MAX_RADIUS: u32 = 255;

/// Size names have to be matchable by `size-<name>` / `attachment-<name>`.
static SIZE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w-]+$").unwrap());

/// Enabled sizes and their blur radius.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizesConfig(BTreeMap<String, u32>);

impl SizesConfig {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn contains(&self, size: &str) -> bool {
        self.0.contains_key(size)
    }

    pub fn radius(&self, size: &str) -> Option<u32> {
        self.0.get(size).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.0.is_empty() {
            diag.warn(FieldPath::new("sizes"), "no sizes enabled, nothing will be rewritten");
        }

        for (name, &radius) in &self.0 {
            let field = || FieldPath::owned(format!("sizes.{name}"));

            if !SIZE_NAME_RE.is_match(name) {
                diag.error_with_hint(
                    field(),
                    format!("invalid size name `{name}`"),
                    "use letters, digits, `_` and `-` only",
                );
            }
            if radius == 0 || radius > MAX_RADIUS {
                diag.error(
                    field(),
                    format!("blur radius must be between 1 and {MAX_RADIUS}, got {radius}"),
                );
            }
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for SizesConfig {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
