//! Interior pattern motifs.
//!
//! Coordinates are fixed and ignore the silhouette, so motifs can poke out of
//! the oval and square shapes.

use super::{DrawFn, Element, LayerKind, LayerRule, Paint, RenderContext};
use crate::projection::Pattern;

const RULES: &[(Pattern, DrawFn)] = &[
    (Pattern::Dots, draw_dots),
    (Pattern::Stripes, draw_stripes),
    (Pattern::Spiral, draw_spiral),
    (Pattern::Stars, draw_stars),
    (Pattern::None, draw_nothing),
];

const FALLBACK: DrawFn = draw_dots;

const DOTS: [(f32, f32); 5] = [(40.0, 30.0), (60.0, 30.0), (40.0, 50.0), (60.0, 50.0), (50.0, 40.0)];

const STRIPE_ROWS: [f32; 3] = [30.0, 40.0, 50.0];

const SPIRAL: &str = "M50 25 C60 30 60 40 50 45 C40 50 40 60 50 65";

const STARS: [&str; 4] = [
    "M40 30 L42 25 L44 30 L39 27 L45 27 Z",
    "M60 30 L62 25 L64 30 L59 27 L65 27 Z",
    "M40 50 L42 45 L44 50 L39 47 L45 47 Z",
    "M60 50 L62 45 L64 50 L59 47 L65 47 Z",
];

/// Draws the pattern in the detail color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRule {
    pub pattern: Pattern,
}

impl PatternRule {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    fn draw_fn(&self) -> DrawFn {
        RULES
            .iter()
            .find(|(pattern, _)| *pattern == self.pattern)
            .map_or(FALLBACK, |(_, f)| *f)
    }
}

impl LayerRule for PatternRule {
    fn kind(&self) -> LayerKind {
        LayerKind::Pattern
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        (self.draw_fn())(ctx);
    }
}

fn draw_dots(ctx: &mut RenderContext<'_>) {
    for (cx, cy) in DOTS {
        let paint = Paint::fill(ctx.colors.detail.clone());
        ctx.push(LayerKind::Pattern, "dots", Element::circle(cx, cy, 3.0), paint);
    }
}

fn draw_stripes(ctx: &mut RenderContext<'_>) {
    for y in STRIPE_ROWS {
        let paint = Paint::stroke(ctx.colors.detail.clone(), 3.0);
        ctx.push(LayerKind::Pattern, "stripes", Element::path(format!("M30 {y} L70 {y}")), paint);
    }
}

fn draw_spiral(ctx: &mut RenderContext<'_>) {
    let paint = Paint::outline(ctx.colors.detail.clone(), 2.0);
    ctx.push(LayerKind::Pattern, "spiral", Element::path(SPIRAL), paint);
}

fn draw_stars(ctx: &mut RenderContext<'_>) {
    for d in STARS {
        let paint = Paint::fill(ctx.colors.detail.clone());
        ctx.push(LayerKind::Pattern, "stars", Element::path(d), paint);
    }
}

fn draw_nothing(_ctx: &mut RenderContext<'_>) {}
