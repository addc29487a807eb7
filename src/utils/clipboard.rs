//! Clipboard utilities for copying text
//!
//! Two writers share the [`ClipboardWriter`] interface: the Web Clipboard API
//! when the browser exposes it, and a `document.execCommand("copy")` fallback
//! for older browsers. [`detect`] picks one at startup.
//!
//! Writers start their platform call before returning, so both the
//! `writeText` call and the whole `execCommand` round trip happen inside the
//! click handler; only the result is awaited.

use std::fmt;
use std::rc::Rc;

use futures::future::{self, FutureExt, LocalBoxFuture};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlDocument, HtmlTextAreaElement, Window};

use crate::error::{js_error_message, ControllerError};

/// Why a clipboard write did not happen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// `navigator.clipboard.writeText` rejected
    Rejected(String),
    /// `execCommand("copy")` threw, or the scratch textarea could not be set up
    CommandFailed(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected(msg) => write!(f, "Clipboard write rejected: {}", msg),
            Self::CommandFailed(msg) => write!(f, "Copy command failed: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

pub trait ClipboardWriter {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Start writing `text`; the returned future resolves with the outcome
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}

/// Writer backed by `navigator.clipboard`
pub struct AsyncClipboard {
    clipboard: web_sys::Clipboard,
}

impl AsyncClipboard {
    pub fn new(clipboard: web_sys::Clipboard) -> Self {
        Self { clipboard }
    }
}

impl ClipboardWriter for AsyncClipboard {
    fn name(&self) -> &'static str {
        "clipboard-api"
    }

    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let promise = self.clipboard.write_text(text);
        async move {
            wasm_bindgen_futures::JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|e| ClipboardError::Rejected(js_error_message(&e)))
        }
        .boxed_local()
    }
}

/// Writer that selects a temporary textarea and runs `execCommand("copy")`
pub struct LegacyClipboard {
    document: HtmlDocument,
}

impl LegacyClipboard {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }

    fn attach_scratch(&self, text: &str) -> Result<ScopedElement<web_sys::Element>, ClipboardError> {
        let failed = |e: JsValue| ClipboardError::CommandFailed(js_error_message(&e));

        let body = self
            .document
            .body()
            .ok_or_else(|| ClipboardError::CommandFailed("document has no body".to_string()))?;
        let textarea: HtmlTextAreaElement = self
            .document
            .create_element("textarea")
            .map_err(failed)?
            .dyn_into()
            .map_err(|_| ClipboardError::CommandFailed("textarea is not a textarea".to_string()))?;

        textarea.set_value(text);
        textarea.set_read_only(true);
        textarea
            .set_attribute("style", "position: fixed; top: 0; left: 0; opacity: 0;")
            .map_err(failed)?;
        body.append_child(&textarea).map_err(failed)?;

        // From here on the guard owns removal
        let scratch = ScopedElement::new(textarea.unchecked_into::<web_sys::Element>());
        if let Some(textarea) = scratch.dyn_ref::<HtmlTextAreaElement>() {
            textarea.select();
        }
        Ok(scratch)
    }
}

impl ClipboardWriter for LegacyClipboard {
    fn name(&self) -> &'static str {
        "exec-command"
    }

    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let result = self.attach_scratch(text).and_then(|scratch| {
            run_copy_command(scratch, |_| {
                self.document
                    .exec_command("copy")
                    .map_err(|e| ClipboardError::CommandFailed(js_error_message(&e)))
            })
        });
        future::ready(result).boxed_local()
    }
}

/// Something that can be taken out of the document
pub trait Detach {
    fn detach(&self);
}

impl Detach for web_sys::Element {
    fn detach(&self) {
        self.remove();
    }
}

/// Element that is detached when the guard goes out of scope
pub struct ScopedElement<E: Detach> {
    element: E,
}

impl<E: Detach> ScopedElement<E> {
    pub fn new(element: E) -> Self {
        Self { element }
    }
}

impl<E: Detach> std::ops::Deref for ScopedElement<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.element
    }
}

impl<E: Detach> Drop for ScopedElement<E> {
    fn drop(&mut self) {
        self.element.detach();
    }
}

/// Run a synchronous copy command against `scratch`, detaching it afterwards.
///
/// A command that reports `false` without throwing still counts as copied.
pub fn run_copy_command<E, F>(scratch: ScopedElement<E>, command: F) -> Result<(), ClipboardError>
where
    E: Detach,
    F: FnOnce(&E) -> Result<bool, ClipboardError>,
{
    let copied = command(&scratch)?;
    if !copied {
        log::warn!("execCommand(\"copy\") reported no copy; treating as copied");
    }
    Ok(())
}

/// Pick the Clipboard API when `navigator.clipboard.writeText` exists, the legacy command otherwise
pub fn detect(window: &Window, document: &Document) -> Result<Rc<dyn ClipboardWriter>, ControllerError> {
    let navigator = window.navigator();
    let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null());

    if let Some(clipboard) = clipboard {
        let has_write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map(|f| f.is_function())
            .unwrap_or(false);
        if has_write_text {
            log::info!("Using Clipboard API for copy");
            return Ok(Rc::new(AsyncClipboard::new(clipboard.unchecked_into())));
        }
    }

    log::info!("Clipboard API unavailable, using execCommand fallback");
    let document: HtmlDocument = document
        .clone()
        .dyn_into()
        .map_err(|_| ControllerError::Dom("document is not an HTML document".to_string()))?;
    Ok(Rc::new(LegacyClipboard::new(document)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeScratch {
        attached: Rc<Cell<bool>>,
    }

    impl Detach for FakeScratch {
        fn detach(&self) {
            self.attached.set(false);
        }
    }

    fn scratch() -> (ScopedElement<FakeScratch>, Rc<Cell<bool>>) {
        let attached = Rc::new(Cell::new(true));
        (ScopedElement::new(FakeScratch { attached: attached.clone() }), attached)
    }

    #[test]
    fn test_scratch_removed_after_successful_command() {
        let (element, attached) = scratch();
        let result = run_copy_command(element, |e| {
            assert!(e.attached.get());
            Ok(true)
        });
        assert_eq!(result, Ok(()));
        assert!(!attached.get());
    }

    #[test]
    fn test_scratch_removed_when_command_throws() {
        let (element, attached) = scratch();
        let result = run_copy_command(element, |_| {
            Err(ClipboardError::CommandFailed("SecurityError".to_string()))
        });
        assert_eq!(result, Err(ClipboardError::CommandFailed("SecurityError".to_string())));
        assert!(!attached.get());
    }

    #[test]
    fn test_false_command_result_counts_as_copied() {
        let (element, attached) = scratch();
        assert_eq!(run_copy_command(element, |_| Ok(false)), Ok(()));
        assert!(!attached.get());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ClipboardError::Rejected("NotAllowedError".into()).to_string(),
            "Clipboard write rejected: NotAllowedError"
        );
        assert_eq!(
            ClipboardError::CommandFailed("x".into()).to_string(),
            "Copy command failed: x"
        );
    }
}
