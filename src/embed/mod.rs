//! Embedded static resources.
//!
//! - `BLANK_GIF` - 1x1 transparent GIF shared by every rewritten `<img>`
//! - `blank_url()` - the same GIF as a `data:` URI, encoded once
//! - `CLIP_PATH_SVG` - zero-size SVG with the `gaussclip` clip path used by
//!   the client runtime while fading in

use std::sync::LazyLock;

use base64::{Engine, engine::general_purpose::STANDARD};

/// Transparent 1x1 GIF.
pub const BLANK_GIF: &[u8] = include_bytes!("blank.gif");

/// Clipping path for Firefox compatibility on fade in.
pub const CLIP_PATH_SVG: &str = concat!(
    r#"<svg width="0" height="0" style="position: absolute">"#,
    r#"<clipPath id="gaussclip" clipPathUnits="objectBoundingBox">"#,
    r#"<rect width="1" height="1"></rect>"#,
    "</clipPath></svg>",
);

static BLANK_URL: LazyLock<String> =
    LazyLock::new(|| format!("data:image/gif;base64,{}", STANDARD.encode(BLANK_GIF)));

/// Blank GIF as a `data:` URI, identical for every image on the page.
#[inline]
pub fn blank_url() -> &'static str {
    BLANK_URL.as_str()
}
