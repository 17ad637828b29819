//! Configuration editor.
//!
//! The editor owns a working copy of the configuration and a separately
//! tracked accessory selection. Nothing reaches the store until
//! [`AvatarEditor::save`]; dropping or cancelling the editor leaves the
//! persisted value untouched.

use crate::config::{Accessory, AccessorySet, Animation, AvatarConfig, BodyType, HairStyle, Outfit};
use crate::error::{AvatarResult, StoreError};
use crate::legacy;
use crate::projection::AvatarOwner;
use crate::render::{Frame, RenderOptions, render_config};
use crate::store::{AvatarStore, UserId, UserRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarEditor {
    working: AvatarConfig,
    selected: AccessorySet,
}

impl AvatarEditor {
    /// Starts editing the persisted payload, or the default when there is none.
    pub fn open(persisted: Option<&str>) -> Self {
        Self::from_config(AvatarConfig::load_or_default(persisted))
    }

    pub fn from_config(config: AvatarConfig) -> Self {
        Self {
            selected: config.accessories.clone(),
            working: config,
        }
    }

    /// Loads the user's stored configuration and starts editing it.
    pub fn load(store: &impl AvatarStore, user_id: UserId) -> Result<Self, StoreError> {
        let persisted = store.load(user_id)?;
        Ok(Self::open(persisted.as_deref()))
    }

    /// The working copy, without the pending accessory selection.
    pub fn working(&self) -> &AvatarConfig {
        &self.working
    }

    pub fn selected_accessories(&self) -> &AccessorySet {
        &self.selected
    }

    pub fn set_body_type(&mut self, body_type: impl Into<BodyType>) {
        self.working.body_type = body_type.into();
    }

    pub fn set_hair_style(&mut self, hair_style: impl Into<HairStyle>) {
        self.working.hair_style = hair_style.into();
    }

    pub fn set_hair_color(&mut self, color: impl Into<String>) {
        self.working.hair_color = color.into();
    }

    pub fn set_skin_tone(&mut self, color: impl Into<String>) {
        self.working.skin_tone = color.into();
    }

    pub fn set_outfit(&mut self, outfit: impl Into<Outfit>) {
        self.working.outfit = outfit.into();
    }

    pub fn set_animation(&mut self, animation: impl Into<Animation>) {
        self.working.animation = animation.into();
    }

    /// Flips one accessory. Returns true if it is now selected.
    pub fn toggle_accessory(&mut self, accessory: impl Into<Accessory>) -> bool {
        self.selected.toggle(accessory.into())
    }

    /// The configuration that [`save`](Self::save) would persist.
    pub fn commit(&self) -> AvatarConfig {
        AvatarConfig {
            accessories: self.selected.clone(),
            ..self.working.clone()
        }
    }

    /// Renders the pending configuration.
    pub fn preview(&self, owner: Option<&AvatarOwner>, options: &RenderOptions) -> Frame {
        render_config(&self.commit(), owner, options)
    }

    /// Renders the pending configuration as a legacy `data:` URI.
    pub fn preview_data_uri(&self, owner: Option<&AvatarOwner>, options: &RenderOptions) -> String {
        legacy::to_data_uri(&self.preview(owner, options))
    }

    /// Persists the pending configuration.
    ///
    /// On failure the editor is unchanged, so the caller can retry.
    pub fn save(&mut self, store: &mut impl AvatarStore, user_id: UserId) -> AvatarResult<UserRecord> {
        let config = self.commit();
        let json = config.to_json()?;

        let record = store.save(user_id, &json).inspect_err(|err| {
            tracing::warn!(%user_id, error = %err, "avatar save failed, keeping edits");
        })?;

        tracing::info!(%user_id, "avatar saved");
        self.working = config;
        Ok(record)
    }

    /// Discards the working copy.
    pub fn cancel(self) {
        tracing::debug!("avatar edit cancelled");
    }
}

impl Default for AvatarEditor {
    fn default() -> Self {
        Self::from_config(AvatarConfig::default())
    }
}
