//! Request Builder
//!
//! Turns a verb, a resource path, a payload and an optional token into an
//! [`HttpRequest`]. Form payloads carry the token as a form field; JSON
//! payloads carry it as an `access_token` query parameter.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use url::Url;

use super::transport::{HttpMethod, HttpRequest};
use crate::error::{MercadoPagoError, MercadoPagoResult};
use crate::types::user_agent;

/// MIME type of JSON bodies.
pub const MIME_JSON: &str = "application/json";

/// MIME type of URL-encoded form bodies.
pub const MIME_FORM: &str = "application/x-www-form-urlencoded";

/// Name of the token field and query parameter.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Join `collection` and `id` into a resource path, encoding `id` as a
/// single path segment.
///
/// Dot segments are rejected since they would be normalized away.
pub fn resource_path(collection: &str, id: &str) -> MercadoPagoResult<String> {
    if id.trim().is_empty() || id == "." || id == ".." {
        return Err(MercadoPagoError::validation(format!(
            "Invalid resource ID: {:?}",
            id
        )));
    }
    let segment: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    Ok(format!("{}/{}", collection, segment.replace('+', "%20")))
}

/// Body encoding of a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Form,
    Json,
}

impl Encoding {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form => MIME_FORM,
            Self::Json => MIME_JSON,
        }
    }
}

/// String to string form parameters. Encoded with keys in sorted order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormParams(BTreeMap<String, String>);

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style [`FormParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// URL-encode the parameters.
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Payload of a request together with its encoding.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// URL-encoded form.
    Form(FormParams),
    /// Serialized JSON document; `None` is sent as `{}`.
    Json(Option<String>),
}

impl RequestBody {
    /// Serialize a record as a JSON body.
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> MercadoPagoResult<Self> {
        let body = serde_json::to_string(payload).map_err(|e| MercadoPagoError::Serialization {
            message: e.to_string(),
        })?;
        Ok(Self::Json(Some(body)))
    }

    /// JSON body with no payload.
    pub fn empty_json() -> Self {
        Self::Json(None)
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Form(_) => Encoding::Form,
            Self::Json(_) => Encoding::Json,
        }
    }
}

/// Builds outbound requests against a fixed base origin.
#[derive(Clone, Debug)]
pub struct RequestBuilder {
    base_url: Url,
    user_agent: String,
}

impl RequestBuilder {
    /// `base_url` must be a hierarchical URL such as `https://host`.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            user_agent: user_agent(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a resource path against the base origin.
    ///
    /// The base path and query are replaced; a query carried by `resource`
    /// is kept.
    pub fn resolve(&self, resource: &str) -> Url {
        let mut url = self.base_url.clone();
        let (path, query) = match resource.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (resource, None),
        };
        url.set_path(path);
        url.set_query(query.filter(|q| !q.is_empty()));
        url.set_fragment(None);
        url
    }

    /// Build a request. `token` is attached according to the body encoding.
    pub fn build(
        &self,
        method: HttpMethod,
        resource: &str,
        body: RequestBody,
        token: Option<&str>,
    ) -> HttpRequest {
        let mut url = self.resolve(resource);
        let encoding = body.encoding();

        let payload = match body {
            RequestBody::Form(mut params) => {
                if let Some(token) = token {
                    params.insert(ACCESS_TOKEN_PARAM, token);
                }
                params.encode()
            }
            RequestBody::Json(payload) => {
                if let Some(token) = token {
                    url.query_pairs_mut().append_pair(ACCESS_TOKEN_PARAM, token);
                }
                payload.unwrap_or_else(|| "{}".to_string())
            }
        };

        let mut headers = HashMap::new();
        headers.insert("Content-Length".to_string(), payload.len().to_string());
        headers.insert("User-Agent".to_string(), self.user_agent.clone());
        headers.insert("Accept".to_string(), MIME_JSON.to_string());
        headers.insert(
            "Content-Type".to_string(),
            encoding.content_type().to_string(),
        );

        HttpRequest {
            method,
            url: url.into(),
            headers,
            body: Some(payload),
        }
    }
}
