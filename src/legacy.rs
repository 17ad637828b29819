//! Legacy inline-image payload.
//!
//! Older call sites embed the avatar as a `data:` URI holding a fixed
//! 100×100 SVG with a transparent backdrop rect. The payload is produced from
//! the same [`Frame`] as the inline markup, so both outputs always depict the
//! same layers.

use crate::config::AvatarConfig;
use crate::markup::{self, CANVAS_SIZE};
use crate::projection::AvatarOwner;
use crate::render::{Frame, RenderOptions, render_config};

pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Builds the legacy SVG document (before URI encoding).
pub fn legacy_svg(frame: &Frame) -> String {
    let mut out = String::new();
    let _ = markup::write_document(&mut out, &frame.fragments, CANVAS_SIZE, CANVAS_SIZE, true);
    out
}

/// Builds the legacy `data:` URI for a frame.
///
/// ```
/// use balloon_avatar::{legacy, render_config, AvatarConfig, RenderOptions};
///
/// let frame = render_config(&AvatarConfig::default(), None, &RenderOptions::default());
/// let uri = legacy::to_data_uri(&frame);
/// assert!(uri.starts_with("data:image/svg+xml;utf8,<svg"));
/// assert!(!uri.contains('#'));
/// ```
pub fn to_data_uri(frame: &Frame) -> String {
    format!("{DATA_URI_PREFIX}{}", encode_payload(&legacy_svg(frame)))
}

/// Projects, renders and encodes a configuration in one step.
pub fn generate(config: &AvatarConfig, owner: Option<&AvatarOwner>, options: &RenderOptions) -> String {
    to_data_uri(&render_config(config, owner, options))
}

/// Percent-encodes the characters that would break a `utf8` data URI.
pub fn encode_payload(svg: &str) -> String {
    let mut encoded = String::with_capacity(svg.len() + 16);
    for c in svg.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '#' => encoded.push_str("%23"),
            c => encoded.push(c),
        }
    }
    encoded
}

/// Reverses [`encode_payload`].
pub fn decode_payload(payload: &str) -> String {
    payload.replace("%23", "#").replace("%25", "%")
}

/// Extracts the SVG document from a legacy URI, if it has the expected prefix.
pub fn parse_data_uri(uri: &str) -> Option<String> {
    uri.strip_prefix(DATA_URI_PREFIX).map(decode_payload)
}
