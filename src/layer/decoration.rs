//! External decorations drawn around the balloon.
//!
//! Decorations use fixed brand colors, except initials which follow the
//! detail color.

use super::{DrawFn, Element, LayerKind, LayerRule, Paint, RenderContext};
use crate::projection::Decoration;

const RULES: &[(Decoration, DrawFn)] = &[
    (Decoration::Ribbons, draw_ribbons),
    (Decoration::Bows, draw_bows),
    (Decoration::Confetti, draw_confetti),
    (Decoration::Initials, draw_initials),
    (Decoration::Neon, draw_neon),
];

const FALLBACK: DrawFn = draw_nothing;

const RIBBON_COLOR: &str = "#000066";
const BOW_COLOR: &str = "#3366cc";
const CONFETTI_COLOR: &str = "#cc3333";
const NEON_CYAN: &str = "#00ffff";
const NEON_MAGENTA: &str = "#ff00ff";

/// Draws the decoration selected by the outfit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationRule {
    pub decoration: Decoration,
}

impl DecorationRule {
    pub fn new(decoration: Decoration) -> Self {
        Self { decoration }
    }

    fn draw_fn(&self) -> DrawFn {
        RULES
            .iter()
            .find(|(decoration, _)| *decoration == self.decoration)
            .map_or(FALLBACK, |(_, f)| *f)
    }
}

impl LayerRule for DecorationRule {
    fn kind(&self) -> LayerKind {
        LayerKind::Decoration
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        (self.draw_fn())(ctx);
    }
}

fn draw_ribbons(ctx: &mut RenderContext<'_>) {
    for d in ["M20 40 L25 40", "M75 40 L80 40", "M50 10 L50 15"] {
        ctx.push(LayerKind::Decoration, "ribbons", Element::path(d), Paint::stroke(RIBBON_COLOR, 2.0));
    }
}

fn draw_bows(ctx: &mut RenderContext<'_>) {
    for d in ["M50 10 C60 20 70 20 80 30", "M50 10 C40 20 30 20 20 30"] {
        ctx.push(LayerKind::Decoration, "bows", Element::path(d), Paint::outline(BOW_COLOR, 1.5));
    }
}

fn draw_confetti(ctx: &mut RenderContext<'_>) {
    ctx.push(
        LayerKind::Decoration,
        "confetti",
        Element::circle(50.0, 10.0, 5.0),
        Paint::fill(CONFETTI_COLOR),
    );
    for d in ["M45 10 L35 5", "M55 10 L65 5"] {
        ctx.push(LayerKind::Decoration, "confetti", Element::path(d), Paint::stroke(CONFETTI_COLOR, 1.0));
    }
}

fn draw_initials(ctx: &mut RenderContext<'_>) {
    let text = Element::Text {
        x: 50.0,
        y: 40.0,
        font_size: 10.0,
        content: ctx.initials.to_string(),
    };
    let paint = Paint::fill(ctx.colors.detail.clone());
    ctx.push(LayerKind::Decoration, "initials", text, paint);
}

fn draw_neon(ctx: &mut RenderContext<'_>) {
    ctx.push(
        LayerKind::Decoration,
        "neon",
        Element::path("M25 40 L20 30 L25 20 L20 10"),
        Paint::stroke(NEON_CYAN, 1.0),
    );
    ctx.push(
        LayerKind::Decoration,
        "neon",
        Element::path("M75 40 L80 30 L75 20 L80 10"),
        Paint::stroke(NEON_MAGENTA, 1.0),
    );
}

fn draw_nothing(_ctx: &mut RenderContext<'_>) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorContext, Theme, ThemedColors};

    fn draw_with(decoration: Decoration, ctx: &ColorContext) -> Vec<crate::layer::Fragment> {
        let colors = ThemedColors::new("#ffffff", "#000000", ctx);
        let mut render = RenderContext::new(colors, "Jo");
        DecorationRule::new(decoration).draw(&mut render);
        render.into_fragments()
    }

    fn draw(decoration: Decoration) -> Vec<crate::layer::Fragment> {
        draw_with(decoration, &ColorContext::default())
    }

    #[test]
    fn fragment_counts_per_decoration() {
        assert_eq!(draw(Decoration::Ribbons).len(), 3);
        assert_eq!(draw(Decoration::Bows).len(), 2);
        assert_eq!(draw(Decoration::Confetti).len(), 3);
        assert_eq!(draw(Decoration::Initials).len(), 1);
        assert_eq!(draw(Decoration::Neon).len(), 2);
        assert!(draw(Decoration::None).is_empty());
    }

    #[test]
    fn initials_follow_detail_color_and_owner() {
        let light = ColorContext::new(Theme::Light, true);
        let fragments = draw_with(Decoration::Initials, &light);

        assert_eq!(fragments[0].paint.fill.as_deref(), Some("#4c4c4c"));
        assert!(matches!(
            &fragments[0].element,
            Element::Text { content, x, y, .. } if content == "Jo" && *x == 50.0 && *y == 40.0
        ));
    }

    #[test]
    fn fixed_colors_ignore_theme() {
        let light = ColorContext::new(Theme::Light, true);
        let neon = draw_with(Decoration::Neon, &light);
        assert_eq!(neon[0].paint.stroke.as_deref(), Some("#00ffff"));
        assert_eq!(neon[1].paint.stroke.as_deref(), Some("#ff00ff"));
    }
}
