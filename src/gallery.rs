//! Preset showcase.
//!
//! A fixed set of labelled props covering every shape, the non-empty
//! patterns, the main decorations and a couple of accessories.

use crate::color::ColorContext;
use crate::config::Accessory;
use crate::projection::{BalloonProps, Decoration, Pattern, Shape, SizeClass};
use crate::render::{BalloonAvatar, Frame};

const BALLOON_COLORS: [&str; 6] = ["#FF6699", "#66CCFF", "#FFCC33", "#99FF66", "#CC99FF", "#FF9966"];
const DETAIL_COLORS: [&str; 6] = ["#FFFFFF", "#333333", "#FF3366", "#3366FF", "#33CC66", "#9933FF"];

/// One labelled entry of the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryPreset {
    pub label: &'static str,
    pub props: BalloonProps,
}

// (label, color, detail, pattern, shape, decoration, accessories)
type PresetRow = (&'static str, usize, usize, &'static str, &'static str, &'static str, &'static [&'static str]);

const PRESETS: &[PresetRow] = &[
    ("Round", 0, 0, "dots", "round", "none", &[]),
    ("Oval", 1, 1, "dots", "oval", "none", &[]),
    ("Square", 2, 2, "dots", "square", "none", &[]),
    ("Dots", 3, 3, "dots", "round", "none", &[]),
    ("Stripes", 4, 4, "stripes", "round", "none", &[]),
    ("Spiral", 5, 5, "spiral", "round", "none", &[]),
    ("Stars", 0, 5, "stars", "round", "none", &[]),
    ("Ribbons", 1, 0, "dots", "round", "ribbons", &[]),
    ("Bows", 2, 1, "dots", "round", "bows", &[]),
    ("Confetti", 3, 2, "dots", "round", "confetti", &[]),
    ("Glasses", 4, 3, "dots", "round", "none", &["glasses"]),
    ("Hat", 5, 4, "dots", "round", "none", &["hat"]),
    ("Custom", 0, 0, "stars", "round", "neon", &["glasses", "hat"]),
];

/// Every preset, in display order.
pub fn gallery() -> Vec<GalleryPreset> {
    PRESETS
        .iter()
        .map(|&(label, color, detail, pattern, shape, decoration, accessories)| GalleryPreset {
            label,
            props: BalloonProps {
                color: BALLOON_COLORS[color].to_string(),
                detail_color: DETAIL_COLORS[detail].to_string(),
                pattern: Pattern::from_tag(pattern),
                shape: Shape::from_tag(shape),
                decoration: Decoration::from_tag(decoration),
                accessories: accessories.iter().map(|&a| Accessory::from(a)).collect(),
                size: SizeClass::Md,
                ..BalloonProps::default()
            },
        })
        .collect()
}

/// Renders every preset under one color context.
pub fn render_gallery(ctx: &ColorContext) -> Vec<(&'static str, Frame)> {
    gallery()
        .into_iter()
        .map(|preset| (preset.label, BalloonAvatar::render(&preset.props, ctx)))
        .collect()
}
