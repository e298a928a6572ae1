//! Core Infrastructure
//!
//! HTTP transport, request building and call orchestration.

pub mod request;
pub mod rest;
pub mod transport;

pub use request::{
    resource_path, Encoding, FormParams, RequestBody, RequestBuilder, ACCESS_TOKEN_PARAM,
    MIME_FORM, MIME_JSON,
};
pub use rest::{RestClient, READ_STATUSES, WRITE_STATUSES};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport, ReqwestHttpTransport,
};
