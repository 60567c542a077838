//! Request and response descriptors.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use ecomap_core::error::ApiError;
use ecomap_core::{AccessToken, Result};

use crate::endpoints::ErrorResponse;

pub(crate) const AUTHORIZATION: &str = "authorization";

/// An API call before it is sent.
///
/// Header names are stored lower-cased. The `retried` marker records that
/// the request already went through one token refresh, so a second
/// rejection is returned to the caller instead of refreshing again.
#[derive(Clone)]
pub struct OutboundRequest {
    method: Method,
    path: String,
    headers: BTreeMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    retried: bool,
}

impl OutboundRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Set `Authorization: Bearer <token>`.
    pub fn set_bearer(&mut self, token: &AccessToken) {
        self.set_header(AUTHORIZATION, token.bearer());
    }

    /// The token of a `Bearer` authorization header, if one is set.
    pub fn bearer_token(&self) -> Option<&str> {
        self.header_value(AUTHORIZATION)?.strip_prefix("Bearer ")
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub(crate) fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    /// Mark the request as already recovered once.
    pub fn mark_retried(&mut self) {
        self.retried = true;
    }
}

impl fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: BTreeMap<&str, &str> = self
            .headers
            .iter()
            .map(|(name, value)| {
                let value = if name == AUTHORIZATION {
                    "[REDACTED]"
                } else {
                    value.as_str()
                };
                (name.as_str(), value)
            })
            .collect();

        f.debug_struct("OutboundRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("headers", &headers)
            .field("query", &self.query)
            .field("has_body", &self.body.is_some())
            .field("retried", &self.retried)
            .finish()
    }
}

/// A fully read API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Split into success or an [`ApiError`] parsed from the error body.
    pub fn into_result(self) -> std::result::Result<Self, ApiError> {
        if self.is_success() {
            return Ok(self);
        }

        let (detail, code) = match serde_json::from_slice::<ErrorResponse>(&self.body) {
            Ok(body) => (body.detail, body.code),
            Err(_) => (None, None),
        };
        Err(ApiError::new(self.status, detail, code, self.text()))
    }
}
