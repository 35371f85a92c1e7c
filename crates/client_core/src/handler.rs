//! Submit handling for the create-recipe form.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError,
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::{
    api::{CreateResponse, RecipeApi},
    form::{FormField, FormPage, NotificationKind},
};

pub const SUCCESS_MESSAGE: &str = "Recipe created successfully!";
pub const ERROR_PREFIX: &str = "Error creating recipe: ";
pub const CONNECTION_ERROR_MESSAGE: &str = "Error connecting to server";
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Rejected { status: u16, body: String },
    Unreachable,
    /// Another submission was still in flight; nothing was sent.
    Busy,
}

/// Owns the single pending hide of the notification, if any.
#[derive(Default)]
pub struct HideTimer {
    pending: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl HideTimer {
    /// Schedules a hide after `delay`, aborting any hide already pending.
    pub fn schedule(&self, delay: Duration, page: Arc<Mutex<FormPage>>) {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            page.lock().await.notification.hide();
            debug!("notification hidden");
        });
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(task);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Aborts the pending hide. Returns whether one was still running.
    pub fn cancel(&self) -> bool {
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        match previous {
            Some(task) if !task.is_finished() => {
                task.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = pending {
            task.abort();
        }
    }
}

struct SubmissionGuard<'a>(&'a AtomicBool);

impl<'a> SubmissionGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct FormHandler {
    api: Arc<dyn RecipeApi>,
    page: Arc<Mutex<FormPage>>,
    submitting: AtomicBool,
    hide_timer: HideTimer,
    hide_delay: Duration,
}

impl FormHandler {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self {
            api,
            page: Arc::new(Mutex::new(FormPage::default())),
            submitting: AtomicBool::new(false),
            hide_timer: HideTimer::default(),
            hide_delay: DEFAULT_HIDE_DELAY,
        }
    }

    pub fn with_hide_delay(mut self, hide_delay: Duration) -> Self {
        self.hide_delay = hide_delay;
        self
    }

    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_pending()
    }

    pub async fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.page.lock().await.form.set(field, value);
    }

    pub async fn snapshot(&self) -> FormPage {
        self.page.lock().await.clone()
    }

    /// Submits the current form once. Every outcome except `Busy` replaces
    /// the notification.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = SubmissionGuard::acquire(&self.submitting) else {
            debug!("submission already in flight; ignoring submit");
            return SubmitOutcome::Busy;
        };

        let recipe = self.page.lock().await.form.to_recipe();
        info!(
            title = %recipe.title,
            ingredients = recipe.ingredients.len(),
            cooking_time = %recipe.cooking_time,
            "submitting recipe"
        );

        let result = self.api.create_recipe(&recipe).await;

        let mut page = self.page.lock().await;
        match result {
            Ok(CreateResponse::Created { status }) => {
                info!(status, "recipe created");
                page.notification.show(NotificationKind::Success, SUCCESS_MESSAGE);
                page.form.reset();
                self.hide_timer.schedule(self.hide_delay, Arc::clone(&self.page));
                SubmitOutcome::Created
            }
            Ok(CreateResponse::Rejected { status, body }) => {
                warn!(status, "recipe rejected by server");
                self.hide_timer.cancel();
                page.notification
                    .show(NotificationKind::Error, format!("{ERROR_PREFIX}{body}"));
                SubmitOutcome::Rejected { status, body }
            }
            Err(err) => {
                error!(error = %err, "Error: could not reach recipe server");
                self.hide_timer.cancel();
                page.notification.show(NotificationKind::Error, CONNECTION_ERROR_MESSAGE);
                SubmitOutcome::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_page() -> Arc<Mutex<FormPage>> {
        let mut page = FormPage::default();
        page.notification.show(NotificationKind::Success, SUCCESS_MESSAGE);
        Arc::new(Mutex::new(page))
    }

    #[tokio::test(start_paused = true)]
    async fn hides_after_delay() {
        let page = visible_page();
        let timer = HideTimer::default();
        timer.schedule(DEFAULT_HIDE_DELAY, Arc::clone(&page));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(page.lock().await.notification.is_visible());
        assert!(timer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!page.lock().await.notification.is_visible());
        assert!(!timer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_replaces_pending_hide() {
        let page = visible_page();
        let timer = HideTimer::default();
        timer.schedule(Duration::from_millis(3000), Arc::clone(&page));

        tokio::time::sleep(Duration::from_millis(2000)).await;
        timer.schedule(Duration::from_millis(3000), Arc::clone(&page));

        // The first hide would have fired at 3000ms.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(page.lock().await.notification.is_visible());

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(!page.lock().await.notification.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_pending_hide() {
        let page = visible_page();
        let timer = HideTimer::default();
        timer.schedule(Duration::from_millis(100), Arc::clone(&page));

        assert!(timer.cancel());
        assert!(!timer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(page.lock().await.notification.is_visible());
    }

    #[test]
    fn guard_rejects_reentry_until_dropped() {
        let flag = AtomicBool::new(false);
        let guard = SubmissionGuard::acquire(&flag).expect("first acquire");
        assert!(SubmissionGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(SubmissionGuard::acquire(&flag).is_some());
    }
}
