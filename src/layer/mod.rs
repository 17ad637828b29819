//! Fragment rules.
//!
//! Each layer of the balloon is drawn by a stateless rule that appends
//! [`Fragment`]s to a [`RenderContext`]. Rules know their geometry as fixed
//! constants on a 100×100 canvas; they never look at each other's output.
//!
//! # Architecture
//!
//! A rule implements [`LayerRule`]:
//! - it reports which [`LayerKind`] it draws
//! - it reads the theme-adjusted colors from the context
//! - it appends fragments tagged with the rule that produced them
//!
//! The [`LayerPipeline`] owns one rule per layer and runs them in a fixed
//! order. Its output is a plain fragment list that any markup emitter can
//! serialize.

pub mod accessory;
pub mod decoration;
pub mod face;
pub mod pattern;
pub mod shape;

pub use accessory::AccessoryRule;
pub use decoration::DecorationRule;
pub use face::FaceRule;
pub use pattern::PatternRule;
pub use shape::{ShapeRule, StringRule};

use serde::Serialize;

use crate::color::ThemedColors;
use crate::projection::BalloonProps;

// ============================================================================
// Fragments
// ============================================================================

/// The layer a fragment belongs to, in draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Shape,
    String,
    Pattern,
    Decoration,
    Accessory,
    Face,
}

/// A single vector primitive in canvas coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Circle { cx: f32, cy: f32, r: f32 },
    Ellipse { cx: f32, cy: f32, rx: f32, ry: f32 },
    Rect { x: f32, y: f32, width: f32, height: f32, rx: Option<f32> },
    Line { x1: f32, y1: f32, x2: f32, y2: f32 },
    Path { d: String },
    Text { x: f32, y: f32, font_size: f32, content: String },
}

impl Element {
    pub fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Self::Circle { cx, cy, r }
    }

    pub fn path(d: impl Into<String>) -> Self {
        Self::Path { d: d.into() }
    }

    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::Line { x1, y1, x2, y2 }
    }
}

/// Fill and stroke attributes of a fragment.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f32>,
    pub opacity: Option<f32>,
}

impl Paint {
    /// Solid fill.
    pub fn fill(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    /// Stroke only, without an explicit fill.
    pub fn stroke(color: impl Into<String>, width: f32) -> Self {
        Self {
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Stroke with `fill="none"`.
    pub fn outline(color: impl Into<String>, width: f32) -> Self {
        Self::stroke(color, width).with_fill("none")
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// One drawn primitive plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fragment {
    pub layer: LayerKind,
    /// Name of the rule entry that drew this fragment, e.g. `"dots"` or `"glasses"`.
    pub rule: &'static str,
    pub element: Element,
    pub paint: Paint,
}

// ============================================================================
// Render Context
// ============================================================================

/// Context that flows through the rule pipeline.
pub struct RenderContext<'a> {
    /// Theme-adjusted user colors.
    pub colors: ThemedColors,

    /// Text for the initials decoration.
    pub initials: &'a str,

    fragments: Vec<Fragment>,
}

impl<'a> RenderContext<'a> {
    pub fn new(colors: ThemedColors, initials: &'a str) -> Self {
        Self {
            colors,
            initials,
            fragments: Vec::new(),
        }
    }

    /// Appends a fragment.
    pub fn push(&mut self, layer: LayerKind, rule: &'static str, element: Element, paint: Paint) {
        self.fragments.push(Fragment {
            layer,
            rule,
            element,
            paint,
        });
    }

    /// Fragments drawn so far, in draw order.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }
}

// ============================================================================
// Layer Rule Trait
// ============================================================================

/// A stateless drawing rule for one layer.
pub trait LayerRule {
    /// The layer this rule draws.
    fn kind(&self) -> LayerKind;

    /// Appends this layer's fragments. May append nothing.
    fn draw(&self, ctx: &mut RenderContext<'_>);
}

/// Lookup table entry mapping a tag to its drawing function.
pub(crate) type DrawFn = fn(&mut RenderContext<'_>);

// ============================================================================
// Layer Pipeline
// ============================================================================

/// The ordered set of rules for one render.
///
/// ```text
/// shape → string → pattern → decoration → accessories → face
/// ```
///
/// Later layers paint over earlier ones. Accessories never reposition
/// themselves around each other; overlaps are expected.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPipeline {
    pub shape: ShapeRule,
    pub string: StringRule,
    pub pattern: PatternRule,
    pub decoration: DecorationRule,
    pub accessories: AccessoryRule,
    pub face: FaceRule,
}

impl LayerPipeline {
    /// Resolves one rule per layer from the props.
    pub fn for_props(props: &BalloonProps) -> Self {
        Self {
            shape: ShapeRule::new(props.shape),
            string: StringRule::new(props.shape),
            pattern: PatternRule::new(props.pattern),
            decoration: DecorationRule::new(props.decoration),
            accessories: AccessoryRule::new(props.accessories.clone()),
            face: FaceRule::new(props.expression),
        }
    }

    /// The rules in draw order.
    pub fn rules(&self) -> [&dyn LayerRule; 6] {
        [
            &self.shape,
            &self.string,
            &self.pattern,
            &self.decoration,
            &self.accessories,
            &self.face,
        ]
    }

    /// Runs every rule and returns the fragments in draw order.
    pub fn draw(&self, colors: ThemedColors, initials: &str) -> Vec<Fragment> {
        let mut ctx = RenderContext::new(colors, initials);
        for rule in self.rules() {
            rule.draw(&mut ctx);
        }
        ctx.into_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorContext;
    use crate::config::Accessory;
    use crate::projection::{Decoration, Expression, Pattern, Shape};

    fn colors() -> ThemedColors {
        ThemedColors::new("#f5d0a9", "#1a1a1a", &ColorContext::default())
    }

    #[test]
    fn rules_run_in_fixed_order() {
        let props = BalloonProps {
            decoration: Decoration::Neon,
            accessories: [Accessory::Hat].into_iter().collect(),
            ..BalloonProps::default()
        };
        let pipeline = LayerPipeline::for_props(&props);

        let kinds: Vec<_> = pipeline.rules().iter().map(|r| r.kind()).collect();
        assert_eq!(
            kinds,
            [
                LayerKind::Shape,
                LayerKind::String,
                LayerKind::Pattern,
                LayerKind::Decoration,
                LayerKind::Accessory,
                LayerKind::Face
            ]
        );

        let fragments = pipeline.draw(colors(), "ME");
        let layers: Vec<_> = fragments.iter().map(|f| f.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted, "fragments must be grouped in draw order");
    }

    #[test]
    fn pipeline_resolves_props() {
        let props = BalloonProps {
            shape: Shape::Square,
            pattern: Pattern::Stars,
            expression: Expression::Tired,
            ..BalloonProps::default()
        };
        let pipeline = LayerPipeline::for_props(&props);
        assert_eq!(pipeline.shape, ShapeRule::new(Shape::Square));
        assert_eq!(pipeline.pattern, PatternRule::new(Pattern::Stars));
        assert_eq!(pipeline.face, FaceRule::new(Expression::Tired));
    }

    #[test]
    fn paint_builders() {
        let paint = Paint::outline("#000000", 1.0).with_opacity(0.5);
        assert_eq!(paint.fill.as_deref(), Some("none"));
        assert_eq!(paint.stroke.as_deref(), Some("#000000"));
        assert_eq!(paint.stroke_width, Some(1.0));
        assert_eq!(paint.opacity, Some(0.5));

        assert!(Paint::stroke("#000066", 2.0).fill.is_none());
    }
}
