//! Payments service.

use tracing::instrument;

use crate::core::{
    resource_path, FormParams, HttpMethod, RequestBody, RestClient, READ_STATUSES, WRITE_STATUSES,
};
use crate::error::{MercadoPagoError, MercadoPagoResult};
use crate::types::{AuthMode, Payment, PaymentSearch};

/// Resource path of payments.
pub const PAYMENTS_PATH: &str = "/v1/payments";

/// Resource path of the payment search.
pub const PAYMENTS_SEARCH_PATH: &str = "/v1/payments/search";

/// Payments are authenticated with the caller-supplied static token.
const AUTH: AuthMode = AuthMode::StaticProvided;

/// Service for creating, reading and searching payments.
#[derive(Debug, Clone)]
pub struct PaymentsService {
    rest: RestClient,
}

impl PaymentsService {
    pub fn new(rest: RestClient) -> Self {
        Self { rest }
    }

    /// Creates a payment.
    #[instrument(skip(self, payment), fields(external_reference = ?payment.external_reference))]
    pub async fn create(&self, payment: &Payment) -> MercadoPagoResult<Payment> {
        self.rest
            .call(
                HttpMethod::Post,
                PAYMENTS_PATH,
                RequestBody::json(payment)?,
                AUTH,
                WRITE_STATUSES,
            )
            .await
    }

    /// Gets a payment by id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> MercadoPagoResult<Payment> {
        if id.trim().is_empty() {
            return Err(MercadoPagoError::validation("Payment ID is required"));
        }
        let path = resource_path(PAYMENTS_PATH, id)?;
        self.rest
            .call(
                HttpMethod::Get,
                &path,
                RequestBody::empty_json(),
                AUTH,
                READ_STATUSES,
            )
            .await
    }

    /// Searches payments by external reference.
    #[instrument(skip(self))]
    pub async fn search_by_external_reference(
        &self,
        external_reference: &str,
    ) -> MercadoPagoResult<PaymentSearch> {
        self.search(FormParams::new().with("external_reference", external_reference))
            .await
    }

    /// Searches payments with arbitrary filters such as `status`, `sort`,
    /// `criteria`, `limit` or `offset`.
    #[instrument(skip(self, filters), fields(filters = filters.len()))]
    pub async fn search(&self, filters: FormParams) -> MercadoPagoResult<PaymentSearch> {
        self.rest
            .call(
                HttpMethod::Get,
                PAYMENTS_SEARCH_PATH,
                RequestBody::Form(filters),
                AUTH,
                READ_STATUSES,
            )
            .await
    }
}
