//! JavaScript bindings for web hosts.
//!
//! Configurations and options cross the boundary as plain JS objects with the
//! same camelCase field names as the persisted JSON.
//!
//! ```javascript
//! import { renderSvg, legacyDataUri } from 'balloon-avatar';
//!
//! const svg = renderSvg(user.avatarConfig, { theme: 'light', size: 'lg' }, user.username, user.title);
//! ```

use wasm_bindgen::prelude::*;

use crate::config::{Animation, AvatarConfig};
use crate::editor::AvatarEditor;
use crate::legacy;
use crate::motion::MotionProfile;
use crate::projection::AvatarOwner;
use crate::render::{Frame, RenderOptions, render_config};

fn options_from(value: JsValue) -> Result<RenderOptions, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&format!("invalid render options: {e}")))
}

/// Malformed fields keep their defaults, like a stored JSON payload.
fn config_from(value: JsValue) -> AvatarConfig {
    match serde_wasm_bindgen::from_value(value) {
        Ok(value) => AvatarConfig::load_value(value),
        Err(err) => {
            tracing::warn!(error = %err, "discarding malformed avatar configuration");
            AvatarConfig::default()
        }
    }
}

fn render(
    config: JsValue,
    options: JsValue,
    username: Option<String>,
    title: Option<String>,
) -> Result<Frame, JsError> {
    let owner = username.map(|username| AvatarOwner::new(username, title));
    Ok(render_config(&config_from(config), owner.as_ref(), &options_from(options)?))
}

/// Renders inline SVG markup.
#[wasm_bindgen(js_name = "renderSvg")]
pub fn render_svg(
    config: JsValue,
    options: JsValue,
    username: Option<String>,
    title: Option<String>,
) -> Result<String, JsError> {
    Ok(render(config, options, username, title)?.to_svg())
}

/// Renders the legacy `data:` URI payload.
#[wasm_bindgen(js_name = "legacyDataUri")]
pub fn legacy_data_uri(
    config: JsValue,
    options: JsValue,
    username: Option<String>,
    title: Option<String>,
) -> Result<String, JsError> {
    Ok(legacy::to_data_uri(&render(config, options, username, title)?))
}

/// Returns the motion profile for an animation tag.
#[wasm_bindgen(js_name = "motionProfile")]
pub fn motion_profile(animation: &str) -> Result<JsValue, JsError> {
    let profile = MotionProfile::for_animation(&Animation::from(animation));
    serde_wasm_bindgen::to_value(&profile).map_err(|e| JsError::new(&e.to_string()))
}

// ============================================================================
// Editor
// ============================================================================

/// Editor session exposed to JavaScript.
///
/// Saving stays on the host side: call `commit()` and persist the returned
/// JSON through the host's own API.
#[wasm_bindgen(js_name = "AvatarEditor")]
pub struct WasmEditor {
    inner: AvatarEditor,
}

#[wasm_bindgen(js_class = "AvatarEditor")]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new(persisted: Option<String>) -> WasmEditor {
        Self {
            inner: AvatarEditor::open(persisted.as_deref()),
        }
    }

    #[wasm_bindgen(js_name = "setBodyType")]
    pub fn set_body_type(&mut self, value: &str) {
        self.inner.set_body_type(value);
    }

    #[wasm_bindgen(js_name = "setHairStyle")]
    pub fn set_hair_style(&mut self, value: &str) {
        self.inner.set_hair_style(value);
    }

    #[wasm_bindgen(js_name = "setHairColor")]
    pub fn set_hair_color(&mut self, value: &str) {
        self.inner.set_hair_color(value);
    }

    #[wasm_bindgen(js_name = "setSkinTone")]
    pub fn set_skin_tone(&mut self, value: &str) {
        self.inner.set_skin_tone(value);
    }

    #[wasm_bindgen(js_name = "setOutfit")]
    pub fn set_outfit(&mut self, value: &str) {
        self.inner.set_outfit(value);
    }

    #[wasm_bindgen(js_name = "setAnimation")]
    pub fn set_animation(&mut self, value: &str) {
        self.inner.set_animation(value);
    }

    #[wasm_bindgen(js_name = "toggleAccessory")]
    pub fn toggle_accessory(&mut self, value: &str) -> bool {
        self.inner.toggle_accessory(value)
    }

    /// Legacy `data:` URI of the pending configuration.
    #[wasm_bindgen(js_name = "previewDataUri")]
    pub fn preview_data_uri(&self, options: JsValue) -> Result<String, JsError> {
        Ok(self.inner.preview_data_uri(None, &options_from(options)?))
    }

    /// Serialized configuration ready to persist.
    pub fn commit(&self) -> Result<String, JsError> {
        self.inner
            .commit()
            .to_json()
            .map_err(|e| JsError::new(&e.to_string()))
    }
}
