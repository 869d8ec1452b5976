//! Shared reqwest client for the Codefolio REST API.
//!
//! The client owns transport details only: URL joining, the session cookie
//! store, timeouts, status mapping, and envelope-tolerant JSON decoding.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Span, debug, field, instrument};
use uuid::Uuid;

use crate::domain::ports::ServiceError;

const REQUEST_ID_HEADER: &str = "x-request-id";
const USER_AGENT: &str = concat!("codefolio-frontend/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to one API base URL.
///
/// Cloning is cheap and shares the connection pool and cookie store, so every
/// adapter built from the same client sends the same session cookie.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client with a cookie store and an explicit request timeout.
    ///
    /// A base URL with a path prefix such as `https://host/v1` keeps that
    /// prefix for every endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
        })
    }

    /// Base URL every path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path such as `/api/wishlist` below the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Transport`] when the path does not form a URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| ServiceError::transport(format!("invalid api path '{path}': {error}")))
    }

    /// `GET` a path and decode the JSON response.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ServiceError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.client.get(url).query(query);
        let body = self.execute(Method::GET, path, request).await?;
        decode_body(&body)
    }

    /// Send a JSON body with `method` and decode the JSON response.
    pub async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        let request = self.client.request(method.clone(), url).json(body);
        let response = self.execute(method, path, request).await?;
        decode_body(&response)
    }

    /// Send a JSON body with `method`, ignoring any response body.
    pub async fn send_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<(), ServiceError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path)?;
        let request = self.client.request(method.clone(), url).json(body);
        self.execute(method, path, request).await.map(drop)
    }

    /// `DELETE` a path, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ServiceError> {
        let url = self.endpoint(path)?;
        let request = self.client.delete(url);
        self.execute(Method::DELETE, path, request).await.map(drop)
    }

    #[instrument(
        name = "api.request",
        skip_all,
        fields(method = %method, path = %path, request_id = field::Empty, status = field::Empty)
    )]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Vec<u8>, ServiceError> {
        let request_id = Uuid::new_v4();
        Span::current().record("request_id", field::display(request_id));

        let response = request
            .header(header::ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, request_id.to_string())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        Span::current().record("status", status.as_u16());
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            debug!(bytes = body.len(), "api call failed");
            return Err(map_status_error(status, body.as_ref()));
        }
        debug!(bytes = body.len(), "api call succeeded");
        Ok(body.to_vec())
    }
}

/// Relative joins replace the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Decode a JSON payload that may be bare or wrapped in `{"data": ...}`.
pub(crate) fn decode_body<T>(body: &[u8]) -> Result<T, ServiceError>
where
    T: DeserializeOwned,
{
    let value: Value = serde_json::from_slice(body)
        .map_err(|error| ServiceError::decode(format!("invalid JSON payload: {error}")))?;

    if let Some(decoded) = value
        .get("data")
        .and_then(|inner| T::deserialize(inner).ok())
    {
        return Ok(decoded);
    }

    serde_json::from_value(value)
        .map_err(|error| ServiceError::decode(format!("unexpected response shape: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::timeout(error.to_string())
    } else if error.is_decode() {
        ServiceError::decode(error.to_string())
    } else {
        ServiceError::transport(error.to_string())
    }
}

pub(crate) fn map_status_error(status: StatusCode, body: &[u8]) -> ServiceError {
    let detail = api_message(body).unwrap_or_else(|| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        detail
    };

    match status {
        StatusCode::UNAUTHORIZED => ServiceError::unauthorized(message),
        StatusCode::FORBIDDEN => ServiceError::forbidden(message),
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::timeout(message),
        _ if status.is_client_error() => ServiceError::rejected(status.as_u16(), message),
        _ => ServiceError::server(status.as_u16(), message),
    }
}

/// The backend reports failures as `{"message": "..."}`.
fn api_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_owned())
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
