//! balloon-avatar: procedural balloon avatars
//!
//! This crate turns a small persisted configuration into a layered vector
//! avatar: a balloon shape with a string, an interior pattern, an outer
//! decoration, accessories and a face. The same rendered frame can be
//! emitted as inline SVG, as the legacy `data:` URI payload, or as a bitmap.
//!
//! # Example
//!
//! ```
//! use balloon_avatar::{render_config, AvatarConfig, AvatarOwner, RenderOptions};
//!
//! let config = AvatarConfig::load_or_default(Some(r#"{"bodyType":"slim","outfit":"geek"}"#));
//! let owner = AvatarOwner::new("helena", None);
//!
//! let frame = render_config(&config, Some(&owner), &RenderOptions::default());
//! assert_eq!(frame.count_rule("oval"), 1);
//! assert!(frame.to_svg().contains(">he</text>"));
//! ```
//!
//! # Editing
//!
//! [`AvatarEditor`] keeps a working copy and writes it through an
//! [`AvatarStore`] only on save:
//!
//! ```
//! use balloon_avatar::{AvatarEditor, AvatarStore, MemoryStore, UserId, UserRecord};
//!
//! let mut store = MemoryStore::new().with_user(UserRecord::new(1, "helena"));
//!
//! let mut editor = AvatarEditor::load(&store, UserId(1)).unwrap();
//! editor.set_hair_style("curly");
//! editor.toggle_accessory("hat");
//! let record = editor.save(&mut store, UserId(1)).unwrap();
//!
//! assert_eq!(record.avatar().hair_style.as_str(), "curly");
//! ```

mod color;
mod config;
mod editor;
mod error;
mod gallery;
pub mod layer;
pub mod legacy;
mod markup;
mod motion;
mod projection;
mod raster;
mod render;
mod store;

#[cfg(feature = "wasm")]
mod wasm;

pub use color::{ColorContext, Theme, ThemedColors, adjust_color};
pub use config::{
    Accessory, AccessorySet, Animation, AvatarConfig, BodyType, DEFAULT_HAIR_COLOR,
    DEFAULT_SKIN_TONE, HairStyle, Outfit,
};
pub use editor::AvatarEditor;
pub use error::{AvatarError, AvatarResult, StoreError};
pub use gallery::{GalleryPreset, gallery, render_gallery};
pub use layer::{Element, Fragment, LayerKind, Paint};
pub use motion::{Animator, Ease, MotionProfile, MotionProperty, MotionSample, MotionTrack, Repeat};
pub use projection::{
    AvatarOwner, BalloonProps, DEFAULT_VETERAN_MARKER, Decoration, Expression, Pattern, Shape,
    SizeClass,
};
pub use raster::rasterize;
pub use render::{BalloonAvatar, Frame, LayerSummary, RenderOptions, render_config};
pub use store::{AvatarStore, MemoryStore, UserId, UserRecord};

/// Routes `tracing` output through the test harness so fallback warnings show
/// up next to the failing test.
#[cfg(test)]
pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
