//! Composition renderer.
//!
//! [`BalloonAvatar`] turns [`BalloonProps`] into a [`Frame`]: the ordered
//! fragment list for one avatar. A frame can be serialized as inline SVG
//! markup, as the legacy data-URI payload (see [`crate::legacy`]), or
//! rasterized.
//!
//! # Example
//!
//! ```
//! use balloon_avatar::{render_config, AvatarConfig, AvatarOwner, RenderOptions, Theme};
//!
//! let owner = AvatarOwner::new("marina", Some("Calouro".into()));
//! let options = RenderOptions { theme: Theme::Light, ..RenderOptions::default() };
//!
//! let frame = render_config(&AvatarConfig::default(), Some(&owner), &options);
//! let svg = frame.to_svg();
//! assert!(svg.starts_with("<svg"));
//! ```

use serde::{Deserialize, Serialize};

use crate::color::{ColorContext, Theme};
use crate::config::{Accessory, AvatarConfig};
use crate::layer::{Fragment, LayerKind, LayerPipeline};
use crate::markup;
use crate::projection::{
    AvatarOwner, BalloonProps, DEFAULT_VETERAN_MARKER, Decoration, Expression, Pattern, Shape,
    SizeClass,
};

// ============================================================================
// RenderOptions
// ============================================================================

/// Host-provided render settings.
///
/// ```json
/// { "theme": "light", "themeAware": true, "size": "xl", "veteranMarker": "veterano" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RenderOptions {
    pub theme: Theme,
    pub theme_aware: bool,
    pub size: SizeClass,
    /// Title substring that selects the tired face.
    pub veteran_marker: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            theme_aware: true,
            size: SizeClass::default(),
            veteran_marker: DEFAULT_VETERAN_MARKER.to_string(),
        }
    }
}

impl RenderOptions {
    pub fn color_context(&self) -> ColorContext {
        ColorContext::new(self.theme, self.theme_aware)
    }

    pub fn from_json(json: &str) -> crate::error::AvatarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Frame
// ============================================================================

/// What a frame depicts, independent of how it is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSummary {
    pub shape: Shape,
    pub pattern: Pattern,
    pub decoration: Decoration,
    /// Drawn accessories in canonical order. Unknown tags are omitted.
    pub accessories: Vec<Accessory>,
    pub expression: Expression,
}

/// A rendered avatar: fragments in draw order plus its output size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub size: SizeClass,
    pub summary: LayerSummary,
    pub fragments: Vec<Fragment>,
}

impl Frame {
    /// Fragments belonging to one layer.
    pub fn layer(&self, kind: LayerKind) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.layer == kind)
    }

    /// Number of fragments drawn by the named rule entry (e.g. `"dots"`).
    pub fn count_rule(&self, rule: &str) -> usize {
        self.fragments.iter().filter(|f| f.rule == rule).count()
    }

    /// Inline SVG sized to the frame's size class.
    pub fn to_svg(&self) -> String {
        self.to_svg_sized(self.size.pixels())
    }

    /// Inline SVG at an explicit pixel size.
    pub fn to_svg_sized(&self, pixels: u32) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = markup::write_document(&mut out, &self.fragments, pixels, pixels, false);
        out
    }

    /// The markup of every fragment, concatenated, without the document wrapper.
    pub fn body_markup(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            let _ = markup::write_fragment(&mut out, fragment);
        }
        out
    }
}

// ============================================================================
// BalloonAvatar
// ============================================================================

/// The composition renderer.
pub struct BalloonAvatar;

impl BalloonAvatar {
    /// Renders props under a color context.
    #[tracing::instrument(level = "debug", skip(props), fields(shape = ?props.shape, pattern = ?props.pattern))]
    pub fn render(props: &BalloonProps, ctx: &ColorContext) -> Frame {
        let pipeline = LayerPipeline::for_props(props);
        let fragments = pipeline.draw(props.themed_colors(ctx), &props.initials);

        let summary = LayerSummary {
            shape: props.shape,
            pattern: props.pattern,
            decoration: props.decoration,
            accessories: props
                .accessories
                .iter()
                .filter(|a| !a.is_unknown())
                .cloned()
                .collect(),
            expression: props.expression,
        };

        Frame {
            size: props.size,
            summary,
            fragments,
        }
    }
}

/// Projects and renders a persisted configuration.
pub fn render_config(
    config: &AvatarConfig,
    owner: Option<&AvatarOwner>,
    options: &RenderOptions,
) -> Frame {
    let props = BalloonProps::project(config, owner, &options.veteran_marker).with_size(options.size);
    BalloonAvatar::render(&props, &options.color_context())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HairStyle;

    fn owner() -> AvatarOwner {
        AvatarOwner::new("marina", Some("Calouro".into()))
    }

    #[test]
    fn default_config_renders_expected_layers() {
        let frame = render_config(&AvatarConfig::default(), Some(&owner()), &RenderOptions::default());

        assert_eq!(frame.summary.shape, Shape::Round);
        assert_eq!(frame.summary.pattern, Pattern::Dots);
        assert_eq!(frame.summary.decoration, Decoration::Bows);
        assert_eq!(frame.summary.accessories, [Accessory::Glasses]);

        assert_eq!(frame.count_rule("dots"), 5);
        assert_eq!(frame.count_rule("bows"), 2);
        assert_eq!(frame.count_rule("glasses"), 3);
        for absent in ["hat", "earrings", "necklace", "watch"] {
            assert_eq!(frame.count_rule(absent), 0, "{absent} should not be drawn");
        }
        let accessory_rules: Vec<_> = frame.layer(LayerKind::Accessory).map(|f| f.rule).collect();
        assert_eq!(accessory_rules, ["glasses"; 3]);
    }

    #[test]
    fn unknown_hair_style_renders_default_pattern() {
        let config = AvatarConfig::default().with_hair_style("unknown_value");
        assert_eq!(config.hair_style, HairStyle::Other("unknown_value".into()));

        let frame = render_config(&config, None, &RenderOptions::default());
        assert_eq!(frame.summary.pattern, Pattern::Dots);
        assert!(frame.to_svg().contains("</svg>"));
    }

    #[test]
    fn layer_order_is_fixed() {
        let config = AvatarConfig::default()
            .with_accessories(["hat", "watch", "glasses"])
            .with_outfit("sporty");
        let frame = render_config(&config, None, &RenderOptions::default());

        let layers: Vec<_> = frame.fragments.iter().map(|f| f.layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
        assert_eq!(layers.first(), Some(&LayerKind::Shape));
        assert_eq!(layers.last(), Some(&LayerKind::Face));
    }

    #[test]
    fn light_theme_mutes_user_colors_only() {
        let config = AvatarConfig::default().with_colors("#000000", "#000000");
        let options = RenderOptions {
            theme: Theme::Light,
            ..RenderOptions::default()
        };
        let svg = render_config(&config, None, &options).to_svg();

        assert!(svg.contains(r##"fill="#4c4c4c""##));
        assert!(!svg.contains(r##"fill="#000000""##));
        // fixed decoration colors are untouched
        assert!(svg.contains("#3366cc"));
    }

    #[test]
    fn veteran_title_selects_tired_face() {
        let veteran = AvatarOwner::new("carlos", Some("Veterano de Engenharia".into()));
        let frame = render_config(&AvatarConfig::default(), Some(&veteran), &RenderOptions::default());
        assert_eq!(frame.summary.expression, Expression::Tired);
        assert!(frame.layer(LayerKind::Face).all(|f| f.rule == "tired"));
    }

    #[test]
    fn svg_uses_size_class_pixels() {
        let options = RenderOptions {
            size: SizeClass::Xl,
            ..RenderOptions::default()
        };
        let svg = render_config(&AvatarConfig::default(), None, &options).to_svg();
        assert!(svg.contains(r#"width="200" height="200""#));
        assert!(svg.contains(r#"viewBox="0 0 100 100""#));
    }

    #[test]
    fn geek_outfit_draws_owner_initials() {
        let config = AvatarConfig::default().with_outfit("geek");
        let svg = render_config(&config, Some(&owner()), &RenderOptions::default()).to_svg();
        assert!(svg.contains(">ma</text>"));
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options = RenderOptions::from_json(r#"{"theme":"light","size":"lg"}"#).unwrap();
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.size, SizeClass::Lg);
        assert!(options.theme_aware);
        assert_eq!(options.veteran_marker, "veterano");
    }
}
