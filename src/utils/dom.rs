//! DOM bindings for the page elements the controller drives

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::config::{ControllerConfig, HIDDEN_DISPLAY};
use crate::error::{js_error_message, ControllerError, ControllerResult};
use crate::stores::feedback::{CopyState, FeedbackTarget};
use crate::stores::filter::{Card, CategoryButton, CategoryId, Visibility};

/// All elements matching `selector`, in document order
pub fn query_all(root: &Document, selector: &str) -> ControllerResult<Vec<HtmlElement>> {
    let nodes = root.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let element = node
            .dyn_into::<HtmlElement>()
            .map_err(|_| ControllerError::NotHtmlElement { selector: selector.to_string() })?;
        elements.push(element);
    }
    Ok(elements)
}

fn category_of(element: &Element, selector: &str, config: &ControllerConfig) -> ControllerResult<CategoryId> {
    element
        .get_attribute(&config.category_attribute)
        .map(CategoryId::new)
        .ok_or_else(|| ControllerError::MissingCategory {
            selector: selector.to_string(),
            attribute: config.category_attribute.clone(),
        })
}

pub struct DomCategoryButton {
    element: HtmlElement,
    category: CategoryId,
    config: Rc<ControllerConfig>,
}

impl DomCategoryButton {
    pub fn bind(element: HtmlElement, config: Rc<ControllerConfig>) -> ControllerResult<Self> {
        let category = category_of(&element, &config.category_button_selector, &config)?;
        Ok(Self { element, category, config })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl CategoryButton for DomCategoryButton {
    fn category(&self) -> &CategoryId {
        &self.category
    }

    fn is_marked_active(&self) -> bool {
        self.element.class_list().contains(&self.config.active_class)
    }

    fn set_active(&self, active: bool) {
        let classes = self.element.class_list();
        let result = if active {
            classes.add_1(&self.config.active_class)
        } else {
            classes.remove_1(&self.config.active_class)
        };
        if let Err(e) = result {
            log::error!("Failed to toggle '{}' class: {}", self.config.active_class, js_error_message(&e));
        }
    }
}

pub struct DomCard {
    element: HtmlElement,
    category: CategoryId,
    config: Rc<ControllerConfig>,
}

impl DomCard {
    pub fn bind(element: HtmlElement, config: Rc<ControllerConfig>) -> ControllerResult<Self> {
        let category = category_of(&element, &config.card_selector, &config)?;
        Ok(Self { element, category, config })
    }
}

impl Card for DomCard {
    fn category(&self) -> &CategoryId {
        &self.category
    }

    fn set_visibility(&self, visibility: Visibility) {
        let display = match visibility {
            Visibility::Shown => self.config.shown_display.as_str(),
            Visibility::Hidden => HIDDEN_DISPLAY,
        };
        if let Err(e) = self.element.style().set_property("display", display) {
            log::error!("Failed to set card display: {}", js_error_message(&e));
        }
    }
}

/// Field a copy button reads its payload from
#[derive(Clone)]
pub enum TextField {
    TextArea(HtmlTextAreaElement),
    Input(HtmlInputElement),
    Other(Element),
}

impl TextField {
    fn from_element(element: Element) -> Self {
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(textarea) => return Self::TextArea(textarea),
            Err(element) => element,
        };
        match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => Self::Input(input),
            Err(element) => Self::Other(element),
        }
    }

    /// Current payload; edits made in the page are picked up
    pub fn value(&self) -> String {
        match self {
            Self::TextArea(textarea) => textarea.value(),
            Self::Input(input) => input.value(),
            Self::Other(element) => element.text_content().unwrap_or_default(),
        }
    }
}

#[derive(Clone)]
pub struct DomCopyButton {
    element: HtmlElement,
    text_field: TextField,
    config: Rc<ControllerConfig>,
}

impl DomCopyButton {
    /// Resolve the card around `element` and the text field inside it
    pub fn bind(element: HtmlElement, config: Rc<ControllerConfig>) -> ControllerResult<Self> {
        let card = element
            .closest(&config.card_selector)?
            .ok_or_else(|| ControllerError::MissingCard {
                copy_selector: config.copy_button_selector.clone(),
                card_selector: config.card_selector.clone(),
            })?;
        let field = card
            .query_selector(&config.text_field_selector)?
            .ok_or_else(|| ControllerError::MissingTextField {
                card_selector: config.card_selector.clone(),
                field_selector: config.text_field_selector.clone(),
            })?;

        Ok(Self { element, text_field: TextField::from_element(field), config })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    pub fn text(&self) -> String {
        self.text_field.value()
    }
}

impl FeedbackTarget for DomCopyButton {
    fn show_state(&self, state: CopyState) {
        let classes = self.element.class_list();
        let (result, label) = match state {
            CopyState::Copied => (classes.add_1(&self.config.copied_class), &self.config.copied_label),
            CopyState::Idle => (classes.remove_1(&self.config.copied_class), &self.config.idle_label),
        };
        if let Err(e) = result {
            log::error!("Failed to toggle '{}' class: {}", self.config.copied_class, js_error_message(&e));
        }
        self.element.set_text_content(Some(label.as_str()));
    }
}
