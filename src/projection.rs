//! Projection from the persisted configuration to renderer-facing props.
//!
//! The persisted model speaks in legacy tags (body type, hair style, outfit);
//! the renderer speaks in balloon terms (shape, pattern, decoration). The
//! tables here are total: every input, known or not, maps to a value.

use serde::{Deserialize, Serialize};

use crate::color::{ColorContext, ThemedColors};
use crate::config::{AccessorySet, AvatarConfig, BodyType, HairStyle, Outfit};

/// Substring of a user's title that selects the tired expression.
pub const DEFAULT_VETERAN_MARKER: &str = "veterano";

/// Initials drawn when no owner is known.
pub const FALLBACK_INITIALS: &str = "ME";

// ============================================================================
// Renderer enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Round,
    Oval,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Dots,
    Stripes,
    Spiral,
    Stars,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decoration {
    Ribbons,
    Bows,
    Confetti,
    Initials,
    Neon,
    #[default]
    None,
}

/// Face variant. Derived from the owner's title, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    #[default]
    Happy,
    Tired,
}

/// Discrete output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum SizeClass {
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl SizeClass {
    /// Edge length of the square output in pixels.
    pub fn pixels(self) -> u32 {
        match self {
            Self::Sm => 60,
            Self::Md => 100,
            Self::Lg => 150,
            Self::Xl => 200,
        }
    }
}

impl Shape {
    /// Resolves a raw renderer tag. Unknown tags draw a round balloon.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "round" => Self::Round,
            "oval" => Self::Oval,
            "square" => Self::Square,
            other => {
                tracing::debug!(tag = other, "unknown shape tag, drawing round");
                Self::Round
            }
        }
    }
}

impl Pattern {
    /// Resolves a raw renderer tag. Unknown tags draw dots.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "dots" => Self::Dots,
            "stripes" => Self::Stripes,
            "spiral" => Self::Spiral,
            "stars" => Self::Stars,
            "none" => Self::None,
            other => {
                tracing::debug!(tag = other, "unknown pattern tag, drawing dots");
                Self::Dots
            }
        }
    }
}

impl Decoration {
    /// Resolves a raw renderer tag. Unknown tags draw nothing.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ribbons" => Self::Ribbons,
            "bows" => Self::Bows,
            "confetti" => Self::Confetti,
            "initials" => Self::Initials,
            "neon" => Self::Neon,
            _ => Self::None,
        }
    }
}

impl From<&BodyType> for Shape {
    fn from(body: &BodyType) -> Self {
        match body {
            BodyType::Athletic => Self::Round,
            BodyType::Slim => Self::Oval,
            BodyType::Average => Self::Square,
            BodyType::Other(tag) => {
                tracing::debug!(tag = tag.as_str(), "unknown body type, drawing round");
                Self::Round
            }
        }
    }
}

impl From<&HairStyle> for Pattern {
    fn from(style: &HairStyle) -> Self {
        match style {
            HairStyle::Short => Self::Dots,
            HairStyle::Long => Self::Stripes,
            HairStyle::Curly => Self::Spiral,
            HairStyle::Afro => Self::Stars,
            HairStyle::Bald => Self::None,
            HairStyle::Other(tag) => {
                tracing::debug!(tag = tag.as_str(), "unknown hair style, drawing dots");
                Self::Dots
            }
        }
    }
}

impl From<&Outfit> for Decoration {
    fn from(outfit: &Outfit) -> Self {
        match outfit {
            Outfit::Formal => Self::Ribbons,
            Outfit::Casual => Self::Bows,
            Outfit::Sporty => Self::Confetti,
            Outfit::Geek => Self::Initials,
            Outfit::Cyberpunk => Self::Neon,
            Outfit::Other(tag) => {
                tracing::debug!(tag = tag.as_str(), "unknown outfit, drawing no decoration");
                Self::None
            }
        }
    }
}

impl Expression {
    /// `Tired` iff `title` contains `marker`, ignoring case.
    ///
    /// ```
    /// use balloon_avatar::Expression;
    ///
    /// assert_eq!(Expression::from_title(Some("Aluno Veterano"), "veterano"), Expression::Tired);
    /// assert_eq!(Expression::from_title(Some("Calouro"), "veterano"), Expression::Happy);
    /// assert_eq!(Expression::from_title(None, "veterano"), Expression::Happy);
    /// ```
    pub fn from_title(title: Option<&str>, marker: &str) -> Self {
        match title {
            Some(title) if !marker.is_empty() && title.to_lowercase().contains(&marker.to_lowercase()) => {
                Self::Tired
            }
            _ => Self::Happy,
        }
    }
}

// ============================================================================
// Owner
// ============================================================================

/// The user attributes the projection reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarOwner {
    /// Display name; its first two characters become the initials decoration.
    pub username: String,
    /// Free-text title scanned for the veteran marker.
    pub title: Option<String>,
}

impl AvatarOwner {
    pub fn new(username: impl Into<String>, title: Option<String>) -> Self {
        Self {
            username: username.into(),
            title,
        }
    }

    /// First two characters of the display name.
    pub fn initials(&self) -> String {
        let initials: String = self.username.chars().take(2).collect();
        if initials.is_empty() {
            FALLBACK_INITIALS.to_string()
        } else {
            initials
        }
    }
}

// ============================================================================
// BalloonProps
// ============================================================================

/// Renderer-facing props.
///
/// Colors here are the configured values; theme adjustment happens when the
/// props are rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalloonProps {
    pub color: String,
    pub detail_color: String,
    pub pattern: Pattern,
    pub shape: Shape,
    pub decoration: Decoration,
    pub accessories: AccessorySet,
    pub size: SizeClass,
    pub expression: Expression,
    pub initials: String,
}

impl Default for BalloonProps {
    fn default() -> Self {
        Self {
            color: "#FF6699".to_string(),
            detail_color: "#4466FF".to_string(),
            pattern: Pattern::Dots,
            shape: Shape::Round,
            decoration: Decoration::None,
            accessories: AccessorySet::new(),
            size: SizeClass::Md,
            expression: Expression::Happy,
            initials: FALLBACK_INITIALS.to_string(),
        }
    }
}

impl BalloonProps {
    /// Projects a configuration for a given owner.
    ///
    /// `veteran_marker` selects the expression from the owner's title.
    pub fn project(config: &AvatarConfig, owner: Option<&AvatarOwner>, veteran_marker: &str) -> Self {
        Self {
            color: config.skin_tone.clone(),
            detail_color: config.hair_color.clone(),
            pattern: Pattern::from(&config.hair_style),
            shape: Shape::from(&config.body_type),
            decoration: Decoration::from(&config.outfit),
            accessories: config.accessories.clone(),
            size: SizeClass::default(),
            expression: owner
                .map(|o| Expression::from_title(o.title.as_deref(), veteran_marker))
                .unwrap_or_default(),
            initials: owner
                .map(AvatarOwner::initials)
                .unwrap_or_else(|| FALLBACK_INITIALS.to_string()),
        }
    }

    pub fn with_size(mut self, size: SizeClass) -> Self {
        self.size = size;
        self
    }

    pub fn with_expression(mut self, expression: Expression) -> Self {
        self.expression = expression;
        self
    }

    /// Applies the color transform to both user colors.
    pub fn themed_colors(&self, ctx: &ColorContext) -> ThemedColors {
        ThemedColors::new(&self.color, &self.detail_color, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Accessory;

    #[test]
    fn projection_tables_are_total() {
        let shapes: Vec<_> = BodyType::KNOWN.iter().map(Shape::from).collect();
        assert_eq!(shapes, [Shape::Round, Shape::Oval, Shape::Square]);

        let patterns: Vec<_> = HairStyle::KNOWN.iter().map(Pattern::from).collect();
        assert_eq!(
            patterns,
            [Pattern::Dots, Pattern::Stripes, Pattern::Spiral, Pattern::Stars, Pattern::None]
        );

        let decorations: Vec<_> = Outfit::KNOWN.iter().map(Decoration::from).collect();
        assert_eq!(
            decorations,
            [
                Decoration::Ribbons,
                Decoration::Bows,
                Decoration::Confetti,
                Decoration::Initials,
                Decoration::Neon
            ]
        );
    }

    #[test]
    fn out_of_domain_values_use_defaults() {
        assert_eq!(Shape::from(&BodyType::from("unknown_value")), Shape::Round);
        assert_eq!(Pattern::from(&HairStyle::from("unknown_value")), Pattern::Dots);
        assert_eq!(Decoration::from(&Outfit::from("unknown_value")), Decoration::None);

        assert_eq!(Shape::from_tag("hexagon"), Shape::Round);
        assert_eq!(Pattern::from_tag("plaid"), Pattern::Dots);
        assert_eq!(Decoration::from_tag("glitter"), Decoration::None);
        assert_eq!(Pattern::from_tag("none"), Pattern::None);
    }

    #[test]
    fn expression_marker_is_case_insensitive() {
        assert_eq!(Expression::from_title(Some("VETERANO"), "veterano"), Expression::Tired);
        assert_eq!(Expression::from_title(Some("ex-Veterano"), "VETERANO"), Expression::Tired);
        assert_eq!(Expression::from_title(Some("Calouro"), "veterano"), Expression::Happy);
        assert_eq!(Expression::from_title(Some("anything"), ""), Expression::Happy);
    }

    #[test]
    fn project_default_config() {
        let owner = AvatarOwner::new("marina", Some("Calouro".into()));
        let props = BalloonProps::project(&AvatarConfig::default(), Some(&owner), DEFAULT_VETERAN_MARKER);

        assert_eq!(props.shape, Shape::Round);
        assert_eq!(props.pattern, Pattern::Dots);
        assert_eq!(props.decoration, Decoration::Bows);
        assert_eq!(props.expression, Expression::Happy);
        assert_eq!(props.color, "#f5d0a9");
        assert_eq!(props.detail_color, "#1a1a1a");
        assert_eq!(props.initials, "ma");
        assert!(props.accessories.contains(&Accessory::Glasses));
    }

    #[test]
    fn project_without_owner_uses_fallbacks() {
        let props = BalloonProps::project(&AvatarConfig::default(), None, DEFAULT_VETERAN_MARKER);
        assert_eq!(props.expression, Expression::Happy);
        assert_eq!(props.initials, FALLBACK_INITIALS);
    }

    #[test]
    fn initials_take_two_characters() {
        assert_eq!(AvatarOwner::new("João", None).initials(), "Jo");
        assert_eq!(AvatarOwner::new("x", None).initials(), "x");
        assert_eq!(AvatarOwner::new("", None).initials(), "ME");
    }

    #[test]
    fn size_classes_have_fixed_pixels() {
        let pixels: Vec<_> = [SizeClass::Sm, SizeClass::Md, SizeClass::Lg, SizeClass::Xl]
            .into_iter()
            .map(SizeClass::pixels)
            .collect();
        assert_eq!(pixels, [60, 100, 150, 200]);
    }
}
