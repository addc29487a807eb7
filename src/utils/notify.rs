//! Blocking user notifications

use web_sys::Window;

use crate::error::js_error_message;

pub trait Notifier {
    fn notify_failure(&self, message: &str);
}

/// Shows failures with `window.alert`
pub struct AlertNotifier {
    window: Window,
}

impl AlertNotifier {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Notifier for AlertNotifier {
    fn notify_failure(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("Failed to show alert: {}", js_error_message(&e));
        }
    }
}
