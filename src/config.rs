//! Page configuration
//!
//! Selectors, class names and labels the controller binds to. Every field has
//! a default matching the stock prompt library markup; a page can override
//! any subset by defining `window.promptDeckConfig` before the module loads:
//!
//! ```js
//! window.promptDeckConfig = { feedbackWindowMs: 1500, copiedLabel: "Done" };
//! ```

use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::Window;

use crate::error::ControllerError;

/// Name of the optional global holding configuration overrides
pub const CONFIG_GLOBAL: &str = "promptDeckConfig";

/// `display` value applied to cards outside the active category
pub const HIDDEN_DISPLAY: &str = "none";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ControllerConfig {
    pub category_button_selector: String,
    pub card_selector: String,
    pub copy_button_selector: String,
    /// Looked up inside the card enclosing a copy button
    pub text_field_selector: String,
    pub category_attribute: String,
    pub active_class: String,
    pub copied_class: String,
    pub idle_label: String,
    pub copied_label: String,
    /// `display` value applied to cards in the active category
    pub shown_display: String,
    pub failure_message: String,
    pub feedback_window_ms: u32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            category_button_selector: ".cat-btn".to_string(),
            card_selector: ".card".to_string(),
            copy_button_selector: ".copy-btn".to_string(),
            text_field_selector: ".prompt-text".to_string(),
            category_attribute: "data-category".to_string(),
            active_class: "active".to_string(),
            copied_class: "copied".to_string(),
            idle_label: "Copy".to_string(),
            copied_label: "Copied!".to_string(),
            shown_display: "flex".to_string(),
            failure_message: "Failed to copy text.".to_string(),
            feedback_window_ms: 2000,
        }
    }
}

impl ControllerConfig {
    /// Parse overrides from a JS object
    pub fn from_js(value: JsValue) -> Result<Self, ControllerError> {
        serde_wasm_bindgen::from_value(value).map_err(|e| ControllerError::Config(e.to_string()))
    }
}

/// Load configuration from `window.promptDeckConfig`, falling back to defaults
pub fn load(window: &Window) -> ControllerConfig {
    let value = match js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => {
            log::debug!("No {} global, using default configuration", CONFIG_GLOBAL);
            return ControllerConfig::default();
        }
    };

    match ControllerConfig::from_js(value) {
        Ok(config) => {
            log::info!("Loaded configuration overrides from {}", CONFIG_GLOBAL);
            config
        }
        Err(e) => {
            log::warn!("Ignoring {}: {}", CONFIG_GLOBAL, e);
            ControllerConfig::default()
        }
    }
}
