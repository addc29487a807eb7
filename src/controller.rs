//! Interaction controller
//!
//! Binds category buttons, cards and copy buttons found on the page, applies
//! the pre-selected category and wires click listeners. The returned
//! [`InteractionController`] owns every listener: [`InteractionController::dispose`]
//! detaches them, [`InteractionController::forget`] keeps them for the life of
//! the page.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlElement};

use crate::config::ControllerConfig;
use crate::error::{js_error_message, ControllerResult};
use crate::stores::feedback::CopyServices;
use crate::stores::filter::{self, CategoryId, CategorySelection};
use crate::utils::dom::{self, DomCard, DomCategoryButton, DomCopyButton};

/// The three element collections the controller drives
pub struct PageElements {
    pub category_buttons: Vec<HtmlElement>,
    pub cards: Vec<HtmlElement>,
    pub copy_buttons: Vec<HtmlElement>,
}

impl PageElements {
    pub fn collect(document: &Document, config: &ControllerConfig) -> ControllerResult<Self> {
        Ok(Self {
            category_buttons: dom::query_all(document, &config.category_button_selector)?,
            cards: dom::query_all(document, &config.card_selector)?,
            copy_buttons: dom::query_all(document, &config.copy_button_selector)?,
        })
    }
}

/// A registered event listener, removed on drop
struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: EventTarget, event: &'static str, callback: Closure<dyn FnMut(Event)>) -> ControllerResult<Self> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self { target, event, callback })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {}", self.event, js_error_message(&e));
        }
    }
}

pub struct InteractionController {
    selection: Rc<RefCell<CategorySelection>>,
    listeners: Vec<Listener>,
}

impl InteractionController {
    /// Validate the page, apply the initial category and attach listeners.
    ///
    /// Fails without attaching anything if a button or card lacks a category,
    /// or a copy button has no enclosing card or text field.
    pub fn attach(
        elements: PageElements,
        config: Rc<ControllerConfig>,
        services: Rc<CopyServices>,
    ) -> ControllerResult<Self> {
        let buttons = elements
            .category_buttons
            .into_iter()
            .map(|el| DomCategoryButton::bind(el, config.clone()))
            .collect::<ControllerResult<Vec<_>>>()?;
        let cards = elements
            .cards
            .into_iter()
            .map(|el| DomCard::bind(el, config.clone()))
            .collect::<ControllerResult<Vec<_>>>()?;
        let copy_buttons = elements
            .copy_buttons
            .into_iter()
            .map(|el| DomCopyButton::bind(el, config.clone()))
            .collect::<ControllerResult<Vec<_>>>()?;

        let buttons = Rc::new(buttons);
        let cards = Rc::new(cards);
        let selection = filter::initial_selection(buttons.as_slice(), cards.as_slice());
        match selection.active_category() {
            Some(category) => log::info!("Initial category: {}", category),
            None => log::info!("No category pre-selected, showing all cards"),
        }
        let selection = Rc::new(RefCell::new(selection));

        let mut listeners = Vec::with_capacity(buttons.len() + copy_buttons.len());

        for index in 0..buttons.len() {
            let target: EventTarget = buttons[index].element().clone().into();
            let buttons = buttons.clone();
            let cards = cards.clone();
            let selection = selection.clone();

            let callback = Closure::wrap(Box::new(move |_event: Event| {
                let category = filter::select_button(&mut selection.borrow_mut(), buttons.as_slice(), cards.as_slice(), index);
                if let Some(category) = category {
                    log::debug!("Category selected: {}", category);
                }
            }) as Box<dyn FnMut(Event)>);

            listeners.push(Listener::attach(target, "click", callback)?);
        }

        for button in copy_buttons {
            let target: EventTarget = button.element().clone().into();
            let services = services.clone();

            let callback = Closure::wrap(Box::new(move |_event: Event| {
                // The write starts here, inside the click; only feedback is deferred
                let pending = services.copy_with_feedback(&button.text(), button.clone());
                wasm_bindgen_futures::spawn_local(async move {
                    pending.await;
                });
            }) as Box<dyn FnMut(Event)>);

            listeners.push(Listener::attach(target, "click", callback)?);
        }

        log::info!(
            "Controller attached: {} category buttons, {} cards, {} copy buttons",
            buttons.len(),
            cards.len(),
            listeners.len() - buttons.len()
        );

        Ok(Self { selection, listeners })
    }

    pub fn active_category(&self) -> Option<CategoryId> {
        self.selection.borrow().active_category().cloned()
    }

    /// Detach every listener
    #[allow(dead_code)]
    pub fn dispose(self) {
        log::info!("Detaching {} listeners", self.listeners.len());
        drop(self);
    }

    /// Keep listeners attached for the life of the page
    pub fn forget(self) {
        std::mem::forget(self);
    }
}
