//! Copy-to-clipboard with transient button feedback
//!
//! A successful copy flips the button into [`CopyState::Copied`] and schedules
//! a single-shot revert to [`CopyState::Idle`]. Reverts are never cancelled: a
//! second click inside the window schedules a second revert, and since both
//! restore the same baseline the end state is the same.

use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_timers::callback::Timeout;

use crate::config::ControllerConfig;
use crate::utils::clipboard::ClipboardWriter;
use crate::utils::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Copied,
}

/// A copy button that can render its feedback state
pub trait FeedbackTarget {
    fn show_state(&self, state: CopyState);
}

pub trait RevertScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>);
}

/// Runs tasks on a browser `setTimeout`
pub struct TimeoutScheduler;

impl RevertScheduler for TimeoutScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, task).forget();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed,
}

/// Everything a copy click needs besides the button and the text
pub struct CopyServices {
    writer: Rc<dyn ClipboardWriter>,
    notifier: Rc<dyn Notifier>,
    scheduler: Rc<dyn RevertScheduler>,
    window_ms: u32,
    failure_message: String,
}

impl CopyServices {
    pub fn new(
        writer: Rc<dyn ClipboardWriter>,
        notifier: Rc<dyn Notifier>,
        scheduler: Rc<dyn RevertScheduler>,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            writer,
            notifier,
            scheduler,
            window_ms: config.feedback_window_ms,
            failure_message: config.failure_message.clone(),
        }
    }

    /// Copy `text` and drive `target` through its feedback cycle.
    ///
    /// The clipboard write starts before this returns, so calling it from a
    /// click handler keeps the platform call inside the user gesture. The
    /// returned future only waits for the outcome and updates the button.
    pub fn copy_with_feedback<T>(self: &Rc<Self>, text: &str, target: T) -> LocalBoxFuture<'static, CopyOutcome>
    where
        T: FeedbackTarget + Clone + 'static,
    {
        let write = self.writer.write_text(text);
        let chars = text.chars().count();
        let services = self.clone();

        async move {
            match write.await {
                Ok(()) => {
                    log::debug!("Copied {} chars via {}", chars, services.writer.name());
                    target.show_state(CopyState::Copied);

                    let revert = target.clone();
                    services.scheduler.schedule(
                        services.window_ms,
                        Box::new(move || revert.show_state(CopyState::Idle)),
                    );
                    CopyOutcome::Copied
                }
                Err(e) => {
                    log::warn!("Copy via {} failed: {}", services.writer.name(), e);
                    services.notifier.notify_failure(&services.failure_message);
                    CopyOutcome::Failed
                }
            }
        }
        .boxed_local()
    }
}
