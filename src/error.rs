//! Controller error types
//!
//! Structural problems with the page (missing attributes, orphaned copy
//! buttons) and failures crossing the JS boundary. Clipboard failures have
//! their own type in [`crate::utils::clipboard::ClipboardError`].

use std::fmt;

use wasm_bindgen::{JsCast, JsValue};

/// Error raised while binding the controller to the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    // ==========================================================================
    // Environment Errors
    // ==========================================================================
    NoWindow,
    NoDocument,

    // ==========================================================================
    // Page Structure Errors
    // ==========================================================================
    /// An element matched by `selector` has no category attribute
    MissingCategory { selector: String, attribute: String },
    /// A copy button is not nested inside any card
    MissingCard { copy_selector: String, card_selector: String },
    /// A card holding a copy button has no text field
    MissingTextField { card_selector: String, field_selector: String },
    /// A selector matched something that is not an HTML element
    NotHtmlElement { selector: String },

    // ==========================================================================
    // Boundary Errors
    // ==========================================================================
    Dom(String),
    Config(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "No window available"),
            Self::NoDocument => write!(f, "No document available"),

            Self::MissingCategory { selector, attribute } => {
                write!(f, "Element matching '{}' has no '{}' attribute", selector, attribute)
            }
            Self::MissingCard { copy_selector, card_selector } => {
                write!(f, "Copy button '{}' is not inside a '{}' card", copy_selector, card_selector)
            }
            Self::MissingTextField { card_selector, field_selector } => {
                write!(f, "Card '{}' has no '{}' text field", card_selector, field_selector)
            }
            Self::NotHtmlElement { selector } => {
                write!(f, "Element matching '{}' is not an HTML element", selector)
            }

            Self::Dom(msg) => write!(f, "DOM error: {}", msg),
            Self::Config(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<JsValue> for ControllerError {
    fn from(value: JsValue) -> Self {
        Self::Dom(js_error_message(&value))
    }
}

/// Result type alias for controller operations
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Best-effort human readable message for a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_messages() {
        let err = ControllerError::MissingCard {
            copy_selector: ".copy-btn".to_string(),
            card_selector: ".card".to_string(),
        };
        assert_eq!(err.to_string(), "Copy button '.copy-btn' is not inside a '.card' card");

        let err = ControllerError::MissingCategory {
            selector: ".cat-btn".to_string(),
            attribute: "data-category".to_string(),
        };
        assert!(err.to_string().contains("data-category"));
    }

    #[test]
    fn test_boundary_error_messages() {
        assert_eq!(ControllerError::Dom("boom".into()).to_string(), "DOM error: boom");
        assert_eq!(
            ControllerError::Config("bad window".into()).to_string(),
            "Invalid configuration: bad window"
        );
    }
}
