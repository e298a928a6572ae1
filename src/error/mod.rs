//! Mercado Pago Error Types
//!
//! Error hierarchy separating "could not authenticate", "the remote rejected the
//! request" and "the response could not be parsed".

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root error type for the Mercado Pago client.
#[derive(Error, Debug)]
pub enum MercadoPagoError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("API error: {0}")]
    Api(#[from] ApiStatusError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl MercadoPagoError {
    /// Get error code for telemetry.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "MP_CONFIG",
            Self::Authentication(_) => "MP_AUTH",
            Self::Network(_) => "MP_NETWORK",
            Self::Api(_) => "MP_API_STATUS",
            Self::Decode(_) => "MP_DECODE",
            Self::Serialization { .. } => "MP_SERIALIZATION",
            Self::Validation { .. } => "MP_VALIDATION",
        }
    }

    /// Check if the caller should obtain a fresh access token before trying again.
    pub fn needs_reauth(&self) -> bool {
        match self {
            Self::Authentication(_) => true,
            Self::Api(e) => e.status == 401,
            _ => false,
        }
    }

    /// HTTP status of the rejected response, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Authentication(AuthenticationError::ExchangeRejected { status, .. }) => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("HTTP client could not be created: {message}")]
    HttpClient { message: String },
}

/// Token acquisition error.
#[derive(Error, Debug)]
pub enum AuthenticationError {
    #[error("Token exchange rejected: Bad status received in HTTP response: {status_line}")]
    ExchangeRejected { status: u16, status_line: String },

    #[error("Token exchange failed to reach the authorization endpoint")]
    Unreachable {
        #[source]
        source: NetworkError,
    },

    #[error("Token exchange response could not be decoded: {message}")]
    InvalidResponse { message: String },

    #[error("Token exchange returned an empty access token")]
    EmptyToken,

    #[error("No static access token configured")]
    MissingStaticToken,
}

/// Network/transport error.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out: {message}")]
    Timeout { message: String },

    #[error("Request could not be sent: {message}")]
    RequestFailed { message: String },

    #[error("Response body could not be read: {message}")]
    BodyRead { message: String },
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else if err.is_body() || err.is_decode() {
            NetworkError::BodyRead {
                message: err.to_string(),
            }
        } else {
            NetworkError::RequestFailed {
                message: err.to_string(),
            }
        }
    }
}

/// Response received with a status outside the operation's accepted set.
///
/// The body is kept verbatim; it is only parsed when the caller asks for it
/// through [`ApiStatusError::api_error`].
#[derive(Error, Debug, Clone)]
#[error("Bad status received in HTTP response: {status_line}")]
pub struct ApiStatusError {
    /// Numeric status code.
    pub status: u16,
    /// Status line, e.g. `404 Not Found`.
    pub status_line: String,
    /// Raw response body.
    pub body: String,
}

impl ApiStatusError {
    /// Parse the body as the API's error document.
    ///
    /// Falls back to an [`ApiErrorBody`] carrying this response's status when the
    /// body is not a JSON error document.
    pub fn api_error(&self) -> ApiErrorBody {
        match serde_json::from_str::<ApiErrorBody>(&self.body) {
            Ok(mut parsed) => {
                if parsed.status == 0 {
                    parsed.status = self.status;
                }
                parsed
            }
            Err(_) => ApiErrorBody::new(String::new(), self.status),
        }
    }
}

/// Response body decoding error.
#[derive(Error, Debug)]
#[error("Failed to decode {target}: {message}")]
pub struct DecodeError {
    /// Name of the record being decoded.
    pub target: &'static str,
    /// Underlying parser message.
    pub message: String,
}

impl DecodeError {
    pub(crate) fn new(target: &'static str, err: serde_json::Error) -> Self {
        Self {
            target,
            message: err.to_string(),
        }
    }
}

/// Result type for Mercado Pago operations.
pub type MercadoPagoResult<T> = Result<T, MercadoPagoError>;

/// Error document returned by the Mercado Pago API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default = "default_error_name")]
    pub name: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub cause: Vec<serde_json::Value>,
}

fn default_error_name() -> String {
    "MercadoPagoError".to_string()
}

impl ApiErrorBody {
    /// Create an error document, substituting defaults for an empty message or
    /// a missing status.
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        let message = message.into();
        Self {
            name: default_error_name(),
            message: if message.is_empty() {
                "MercadoPago Unknown error".to_string()
            } else {
                message
            },
            error: None,
            stack: None,
            status: if status > 0 { status } else { 500 },
            cause: Vec::new(),
        }
    }
}
