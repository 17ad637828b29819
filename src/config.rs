//! Persisted avatar configuration.
//!
//! An [`AvatarConfig`] is what the editor produces and the host stores as
//! flat JSON against a user record. Field names on the wire are fixed:
//!
//! ```json
//! {
//!   "bodyType": "athletic",
//!   "hairStyle": "short",
//!   "hairColor": "#1a1a1a",
//!   "skinTone": "#f5d0a9",
//!   "accessories": ["glasses"],
//!   "outfit": "casual",
//!   "animation": "idle"
//! }
//! ```
//!
//! Tag fields accept any string. Values outside the known domain are kept
//! verbatim (so re-saving never loses data) and render with the field's
//! fallback rule.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AvatarResult;

// ============================================================================
// Tag enums
// ============================================================================

macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $tag:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            /// A value this version does not know how to draw.
            Other(String),
        }

        impl $name {
            /// Every known value, in display order.
            pub const KNOWN: &'static [$name] = &[$($name::$variant),+];

            /// Returns the wire tag.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $tag,)+
                    Self::Other(tag) => tag.as_str(),
                }
            }

            /// Returns true for values outside the known domain.
            pub fn is_unknown(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(tag: &str) -> Self {
                match tag {
                    $($tag => Self::$variant,)+
                    other => Self::Other(other.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(tag: String) -> Self {
                match Self::from(tag.as_str()) {
                    Self::Other(_) => Self::Other(tag),
                    known => known,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(tag) => tag,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

tag_enum! {
    /// Overall silhouette.
    BodyType {
        Athletic => "athletic",
        Slim => "slim",
        Average => "average",
    }
}

tag_enum! {
    /// Interior pattern. Named after hair styles for compatibility with
    /// stored configurations.
    HairStyle {
        Short => "short",
        Long => "long",
        Curly => "curly",
        Afro => "afro",
        Bald => "bald",
    }
}

tag_enum! {
    /// External decoration layer.
    Outfit {
        Formal => "formal",
        Casual => "casual",
        Sporty => "sporty",
        Geek => "geek",
        Cyberpunk => "cyberpunk",
    }
}

tag_enum! {
    /// Independently toggled accessory.
    Accessory {
        Glasses => "glasses",
        Hat => "hat",
        Earrings => "earrings",
        Necklace => "necklace",
        Watch => "watch",
    }
}

tag_enum! {
    /// Motion profile selector.
    Animation {
        Idle => "idle",
        Walk => "walk",
        Run => "run",
        Thinking => "thinking",
        Studying => "studying",
        Celebrating => "celebrating",
    }
}

// ============================================================================
// AccessorySet
// ============================================================================

/// A set of accessories.
///
/// Membership is all that matters: duplicates collapse, insertion order is
/// not observable, and serialization uses the canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessorySet(BTreeSet<Accessory>);

impl AccessorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, accessory: &Accessory) -> bool {
        self.0.contains(accessory)
    }

    /// Adds an accessory. Returns false if it was already present.
    pub fn insert(&mut self, accessory: Accessory) -> bool {
        self.0.insert(accessory)
    }

    /// Removes an accessory. Returns false if it was absent.
    pub fn remove(&mut self, accessory: &Accessory) -> bool {
        self.0.remove(accessory)
    }

    /// Flips membership of `accessory`. Returns true if it is now selected.
    pub fn toggle(&mut self, accessory: Accessory) -> bool {
        if self.0.remove(&accessory) {
            false
        } else {
            self.0.insert(accessory);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in canonical order (known accessories first, then unknown tags).
    pub fn iter(&self) -> impl Iterator<Item = &Accessory> {
        self.0.iter()
    }
}

impl FromIterator<Accessory> for AccessorySet {
    fn from_iter<I: IntoIterator<Item = Accessory>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a AccessorySet {
    type Item = &'a Accessory;
    type IntoIter = std::collections::btree_set::Iter<'a, Accessory>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ============================================================================
// AvatarConfig
// ============================================================================

pub const DEFAULT_HAIR_COLOR: &str = "#1a1a1a";
pub const DEFAULT_SKIN_TONE: &str = "#f5d0a9";

/// The canonical, persisted avatar configuration.
///
/// Owned by exactly one user record. Missing fields deserialize to the
/// corresponding value of [`AvatarConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct AvatarConfig {
    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub body_type: BodyType,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub hair_style: HairStyle,

    /// Detail color used for the pattern, string and initials.
    pub hair_color: String,

    /// Primary fill color of the shape.
    pub skin_tone: String,

    #[cfg_attr(feature = "jsonschema", schemars(with = "Vec<String>"))]
    pub accessories: AccessorySet,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub outfit: Outfit,

    #[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
    pub animation: Animation,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            body_type: BodyType::Athletic,
            hair_style: HairStyle::Short,
            hair_color: DEFAULT_HAIR_COLOR.to_string(),
            skin_tone: DEFAULT_SKIN_TONE.to_string(),
            accessories: [Accessory::Glasses].into_iter().collect(),
            outfit: Outfit::Casual,
            animation: Animation::Idle,
        }
    }
}

impl AvatarConfig {
    pub fn with_body_type(mut self, body_type: impl Into<BodyType>) -> Self {
        self.body_type = body_type.into();
        self
    }

    pub fn with_hair_style(mut self, hair_style: impl Into<HairStyle>) -> Self {
        self.hair_style = hair_style.into();
        self
    }

    pub fn with_colors(mut self, skin_tone: impl Into<String>, hair_color: impl Into<String>) -> Self {
        self.skin_tone = skin_tone.into();
        self.hair_color = hair_color.into();
        self
    }

    pub fn with_accessories<I, A>(mut self, accessories: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Accessory>,
    {
        self.accessories = accessories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_outfit(mut self, outfit: impl Into<Outfit>) -> Self {
        self.outfit = outfit.into();
        self
    }

    pub fn with_animation(mut self, animation: impl Into<Animation>) -> Self {
        self.animation = animation.into();
        self
    }

    /// Serializes the configuration to a JSON string.
    pub fn to_json(&self) -> AvatarResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the configuration to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> AvatarResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a configuration, reporting malformed input.
    pub fn from_json(json: &str) -> AvatarResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a persisted payload, falling back to the default when it is
    /// absent or malformed.
    ///
    /// Recovery is per field: a field with the wrong type keeps its default
    /// while the rest of the payload still loads. See [`load_value`](Self::load_value).
    pub fn load_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            tracing::debug!("no stored avatar configuration, using default");
            return Self::default();
        };

        match serde_json::from_str(json) {
            Ok(value) => Self::load_value(value),
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed avatar configuration");
                Self::default()
            }
        }
    }

    /// Builds a configuration from an already parsed JSON value.
    ///
    /// Non-object values yield the default. Inside an object, each field that
    /// fails to deserialize keeps its default, non-string accessory entries
    /// are skipped and unrecognized keys are ignored.
    ///
    /// ```
    /// use balloon_avatar::{AvatarConfig, BodyType};
    ///
    /// let value = serde_json::json!({ "bodyType": "slim", "outfit": 7 });
    /// let config = AvatarConfig::load_value(value);
    /// assert_eq!(config.body_type, BodyType::Slim);
    /// assert_eq!(config.outfit, AvatarConfig::default().outfit);
    /// ```
    pub fn load_value(value: Value) -> Self {
        let Value::Object(fields) = value else {
            tracing::warn!("avatar configuration is not an object, using default");
            return Self::default();
        };

        let mut config = Self::default();
        for (key, value) in fields {
            if let Err(err) = config.apply_field(&key, value) {
                tracing::warn!(field = key.as_str(), error = %err, "keeping default for malformed field");
            }
        }
        config
    }

    fn apply_field(&mut self, key: &str, value: Value) -> serde_json::Result<()> {
        match key {
            "bodyType" => self.body_type = serde_json::from_value(value)?,
            "hairStyle" => self.hair_style = serde_json::from_value(value)?,
            "hairColor" => self.hair_color = serde_json::from_value(value)?,
            "skinTone" => self.skin_tone = serde_json::from_value(value)?,
            "accessories" => self.accessories = lenient_accessories(value)?,
            "outfit" => self.outfit = serde_json::from_value(value)?,
            "animation" => self.animation = serde_json::from_value(value)?,
            _ => tracing::debug!(field = key, "ignoring unrecognized field"),
        }
        Ok(())
    }
}

fn lenient_accessories(value: Value) -> serde_json::Result<AccessorySet> {
    let entries: Vec<Value> = serde_json::from_value(value)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(tag) => Some(Accessory::from(tag)),
            other => {
                tracing::warn!(entry = %other, "skipping malformed accessory");
                None
            }
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
