//! Balloon silhouette and string.

use super::{Element, LayerKind, LayerRule, Paint, RenderContext};
use crate::projection::Shape;

/// Where every string ends, whatever the shape.
const STRING_TAIL: &str = "Q45 85 55 95";

// ============================================================================
// ShapeRule
// ============================================================================

/// Draws the filled silhouette in the primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRule {
    pub shape: Shape,
}

impl ShapeRule {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    fn element(&self) -> Element {
        match self.shape {
            Shape::Round => Element::circle(50.0, 40.0, 30.0),
            Shape::Oval => Element::Ellipse {
                cx: 50.0,
                cy: 40.0,
                rx: 20.0,
                ry: 35.0,
            },
            Shape::Square => Element::Rect {
                x: 25.0,
                y: 15.0,
                width: 50.0,
                height: 50.0,
                rx: Some(10.0),
            },
        }
    }
}

impl LayerRule for ShapeRule {
    fn kind(&self) -> LayerKind {
        LayerKind::Shape
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let paint = Paint::fill(ctx.colors.primary.clone());
        ctx.push(LayerKind::Shape, shape_name(self.shape), self.element(), paint);
    }
}

fn shape_name(shape: Shape) -> &'static str {
    match shape {
        Shape::Round => "round",
        Shape::Oval => "oval",
        Shape::Square => "square",
    }
}

// ============================================================================
// StringRule
// ============================================================================

/// Draws the string hanging from the bottom of the silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringRule {
    pub shape: Shape,
}

impl StringRule {
    pub fn new(shape: Shape) -> Self {
        Self { shape }
    }

    /// Vertical coordinate where the string leaves the silhouette.
    pub fn anchor_y(&self) -> f32 {
        match self.shape {
            Shape::Round => 70.0,
            Shape::Oval => 75.0,
            Shape::Square => 65.0,
        }
    }
}

impl LayerRule for StringRule {
    fn kind(&self) -> LayerKind {
        LayerKind::String
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        let d = format!("M50 {} {STRING_TAIL}", self.anchor_y());
        let paint = Paint::outline(ctx.colors.detail.clone(), 1.5);
        ctx.push(LayerKind::String, "string", Element::path(d), paint);
    }
}
