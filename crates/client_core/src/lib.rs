//! Client side of the create-recipe form: builds the recipe payload from form
//! values, posts it with the stored bearer token and reports the outcome on a
//! notification.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod form;
pub mod handler;

pub use api::{CreateResponse, HttpRecipeApi, RecipeApi};
pub use config::{load_settings, ClientSettings};
pub use credentials::{CredentialProvider, StaticCredentials, TokenStore};
pub use error::ClientError;
pub use form::{FormField, FormPage, Notification, NotificationKind, RecipeForm};
pub use handler::{FormHandler, HideTimer, SubmissionState, SubmitOutcome};

/// Wires an HTTP-backed form handler from settings.
pub fn build_form_handler(
    settings: &ClientSettings,
    credentials: Arc<dyn CredentialProvider>,
) -> Result<FormHandler, ClientError> {
    let api = HttpRecipeApi::new(&settings.server_url, credentials)?;
    Ok(FormHandler::new(Arc::new(api)).with_hide_delay(settings.notification_hide))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
