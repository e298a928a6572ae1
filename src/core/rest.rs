//! REST call orchestration: resolve credentials, build, send, check status,
//! decode.

use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::request::{RequestBody, RequestBuilder};
use super::transport::{HttpMethod, HttpResponse, HttpTransport};
use crate::error::{ApiStatusError, DecodeError, MercadoPagoResult};
use crate::token::CredentialStore;
use crate::types::AuthMode;

/// Statuses accepted by read operations.
pub const READ_STATUSES: &[u16] = &[200];

/// Statuses accepted by create and update operations.
pub const WRITE_STATUSES: &[u16] = &[200, 201];

/// Executes authenticated calls against the API.
#[derive(Clone)]
pub struct RestClient {
    builder: RequestBuilder,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
}

impl RestClient {
    pub fn new(
        builder: RequestBuilder,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            builder,
            transport,
            credentials,
        }
    }

    /// Send a request and return the raw response, whatever its status.
    ///
    /// Nothing is sent when the credential for `auth` cannot be obtained.
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        auth: AuthMode,
    ) -> MercadoPagoResult<HttpResponse> {
        let token = self.credentials.resolve(auth).await?;
        let request = self.builder.build(method, path, body, token.as_deref());
        tracing::debug!(method = %method, path, auth = %auth, "sending request");
        let response = self.transport.send(request).await?;
        tracing::debug!(status = response.status, path, "response received");
        Ok(response)
    }

    /// Send a request and decode a JSON response with a status in `expected`.
    ///
    /// Any other status yields [`ApiStatusError`] with the body left undecoded.
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        body: RequestBody,
        auth: AuthMode,
        expected: &[u16],
    ) -> MercadoPagoResult<R> {
        let response = self.execute(method, path, body, auth).await?;

        if !expected.contains(&response.status) {
            return Err(ApiStatusError {
                status: response.status,
                status_line: response.status_line(),
                body: response.body,
            }
            .into());
        }

        serde_json::from_str(&response.body)
            .map_err(|e| DecodeError::new(short_type_name::<R>(), e).into())
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.builder.base_url().as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
