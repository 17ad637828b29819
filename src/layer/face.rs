//! Face features.

use super::{Element, LayerKind, LayerRule, Paint, RenderContext};
use crate::projection::Expression;

const SHADOW: &str = "#553366";
const BLUSH: &str = "#FF9999";

/// Draws the eyes, brows, cheeks and mouth for an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceRule {
    pub expression: Expression,
}

impl FaceRule {
    pub fn new(expression: Expression) -> Self {
        Self { expression }
    }
}

impl LayerRule for FaceRule {
    fn kind(&self) -> LayerKind {
        LayerKind::Face
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) {
        match self.expression {
            Expression::Happy => draw_happy(ctx),
            Expression::Tired => draw_tired(ctx),
        }
    }
}

fn draw_happy(ctx: &mut RenderContext<'_>) {
    let mut push = |element, paint| ctx.push(LayerKind::Face, "happy", element, paint);

    for cx in [40.0, 60.0] {
        push(Element::circle(cx, 35.0, 2.5), Paint::fill("black"));
    }
    // highlights
    for cx in [41.0, 61.0] {
        push(Element::circle(cx, 34.0, 1.0), Paint::fill("white"));
    }
    for cx in [35.0, 65.0] {
        push(Element::circle(cx, 40.0, 3.0), Paint::fill(BLUSH).with_opacity(0.5));
    }
    push(Element::path("M45 45 Q50 50 55 45"), Paint::outline("black", 1.5));
}

fn draw_tired(ctx: &mut RenderContext<'_>) {
    let mut push = |element, paint| ctx.push(LayerKind::Face, "tired", element, paint);

    for cx in [40.0, 60.0] {
        push(Element::circle(cx, 35.0, 2.0), Paint::fill("black"));
    }
    for d in ["M35 38 Q40 41 45 38", "M55 38 Q60 41 65 38"] {
        push(Element::path(d), Paint::outline(SHADOW, 1.0).with_opacity(0.5));
    }
    push(Element::path("M45 48 L55 48"), Paint::outline("black", 1.5));
    // brows slope down toward the outside
    for d in ["M35 30 L45 32", "M55 32 L65 30"] {
        push(Element::path(d), Paint::outline("black", 1.5));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorContext, ThemedColors};
    use crate::layer::Fragment;

    fn draw(expression: Expression) -> Vec<Fragment> {
        let colors = ThemedColors::new("#ffffff", "#000000", &ColorContext::default());
        let mut ctx = RenderContext::new(colors, "ME");
        FaceRule::new(expression).draw(&mut ctx);
        ctx.into_fragments()
    }

    #[test]
    fn happy_face_has_highlights_and_blush() {
        let face = draw(Expression::Happy);
        assert_eq!(face.len(), 7);
        assert!(face.iter().any(|f| f.paint.fill.as_deref() == Some("white")));
        assert_eq!(
            face.iter().filter(|f| f.paint.opacity == Some(0.5)).count(),
            2,
            "two blushed cheeks"
        );
        assert_eq!(face.last().unwrap().element, Element::path("M45 45 Q50 50 55 45"));
    }

    #[test]
    fn tired_face_has_flat_mouth_and_brows() {
        let face = draw(Expression::Tired);
        assert_eq!(face.len(), 7);
        assert!(face.iter().all(|f| f.rule == "tired"));
        assert!(face.contains(&Fragment {
            layer: LayerKind::Face,
            rule: "tired",
            element: Element::path("M45 48 L55 48"),
            paint: Paint::outline("black", 1.5),
        }));
        assert!(!face.iter().any(|f| f.paint.fill.as_deref() == Some("white")));
    }
}
