//! Checkout preferences service.

use tracing::instrument;

use crate::core::{
    resource_path, FormParams, HttpMethod, RequestBody, RestClient, READ_STATUSES, WRITE_STATUSES,
};
use crate::error::{MercadoPagoError, MercadoPagoResult};
use crate::types::{AuthMode, Preference};

/// Resource path of checkout preferences.
pub const PREFERENCES_PATH: &str = "/checkout/preferences";

/// Preferences are authenticated with the cached bearer token.
const AUTH: AuthMode = AuthMode::CachedBearer;

/// Service for creating and reading checkout preferences.
#[derive(Debug, Clone)]
pub struct PreferencesService {
    rest: RestClient,
}

impl PreferencesService {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Creates a checkout preference.
    #[instrument(skip(self, preference), fields(external_reference = ?preference.external_reference))]
    pub async fn create(&self, preference: &Preference) -> MercadoPagoResult<Preference> {
        self.rest
            .call(
                HttpMethod::Post,
                PREFERENCES_PATH,
                RequestBody::json(preference)?,
                AUTH,
                WRITE_STATUSES,
            )
            .await
    }

    /// Gets a checkout preference by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> MercadoPagoResult<Preference> {
        let path = preference_path(id)?;
        self.rest
            .call(
                HttpMethod::Get,
                &path,
                RequestBody::Form(FormParams::new()),
                AUTH,
                READ_STATUSES,
            )
            .await
    }

    /// Replaces the fields of an existing preference.
    #[instrument(skip(self, preference))]
    pub async fn update(&self, id: &str, preference: &Preference) -> MercadoPagoResult<Preference> {
        let path = preference_path(id)?;
        self.rest
            .call(
                HttpMethod::Put,
                &path,
                RequestBody::json(preference)?,
                AUTH,
                WRITE_STATUSES,
            )
            .await
    }
}

fn preference_path(id: &str) -> MercadoPagoResult<String> {
    if id.trim().is_empty() {
        return Err(MercadoPagoError::validation("Preference ID is required"));
    }
    resource_path(PREFERENCES_PATH, id)
}
