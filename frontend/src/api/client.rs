use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::{api::types::ApiError, config, state::session::SessionStore};

/// Outbound payload. The variant decides the encoding and content type.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as JSON, `Content-Type: application/json`.
    Json(Value),
    /// Sent as is, `Content-Type: application/x-www-form-urlencoded`.
    Form(String),
    /// Passed through untouched; no content type is forced so multipart
    /// boundaries set by the caller survive.
    Binary(Vec<u8>),
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        serde_json::to_value(value)
            .map(Self::Json)
            .map_err(|e| ApiError::validation(format!("Failed to encode request: {}", e)))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    /// Skip the bearer header (login).
    pub anonymous: bool,
    /// The request is a repeat of one that already failed; a 401 here does
    /// not clear the session a second time.
    pub is_retry: bool,
}

impl RequestOptions {
    pub fn anonymous() -> Self {
        Self {
            anonymous: true,
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: SessionStore,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
            timeout: None,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: SessionStore) -> Self {
        Self {
            client: Client::new(),
            base_url: Some(base_url.into().trim_end_matches('/').to_string()),
            session,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    fn request_timeout(&self) -> Duration {
        self.timeout.unwrap_or_else(config::request_timeout)
    }

    fn get_auth_headers(&self) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.session.access_token() {
            headers.insert(
                header::AUTHORIZATION,
                format!("Bearer {}", token)
                    .parse()
                    .map_err(|_| ApiError::validation("Invalid token format"))?,
            );
        }
        Ok(headers)
    }

    fn handle_unauthorized_status(&self, status: StatusCode, options: &RequestOptions) {
        if status == StatusCode::UNAUTHORIZED && !options.is_retry {
            log::warn!("Received 401, clearing session");
            self.session.clear_session();
        }
    }

    /// Sends one request through the shared pipeline: credential injection,
    /// body encoding, timeout and 401 handling. Non-success statuses come
    /// back as `Err`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Response, ApiError> {
        let builder = self.prepare(method, path, body, &options).await?;
        let response = self.send_with_timeout(builder).await?;
        let status = response.status();
        self.handle_unauthorized_status(status, &options);
        if status.is_success() {
            Ok(response)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::from_response(status.as_u16(), &text))
        }
    }

    /// Everything [`Self::request`] puts on the wire before sending.
    pub(crate) async fn prepare(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
        options: &RequestOptions,
    ) -> Result<RequestBuilder, ApiError> {
        let base_url = self.resolved_base_url().await;
        let url = format!("{}{}", base_url, path);
        log::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, &url);
        if !options.anonymous {
            builder = builder.headers(self.get_auth_headers()?);
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        Ok(encode_body(builder, body))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, None, options).await?;
        read_json(response).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn send_with_timeout(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let timeout = self.request_timeout();
        builder
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_with_timeout(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        use futures::future::{select, Either};

        let timeout = self.request_timeout();
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let send = Box::pin(builder.send());
        let deadline = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));
        match select(send, deadline).await {
            Either::Left((result, _)) => result.map_err(|e| transport_error(e, timeout)),
            Either::Right(_) => Err(timeout_error(timeout)),
        }
    }
}

fn encode_body(builder: RequestBuilder, body: Option<RequestBody>) -> RequestBuilder {
    match body {
        None => builder,
        Some(RequestBody::Json(value)) => builder.json(&value),
        Some(RequestBody::Form(encoded)) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(encoded),
        Some(RequestBody::Binary(bytes)) => builder.body(bytes),
    }
}

fn timeout_error(timeout: Duration) -> ApiError {
    ApiError::timeout(format!(
        "Request timed out after {} ms",
        timeout.as_millis()
    ))
}

fn transport_error(error: reqwest::Error, timeout: Duration) -> ApiError {
    if error.is_timeout() {
        timeout_error(timeout)
    } else {
        ApiError::network(format!("Request failed: {}", error))
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json()
        .await
        .map_err(|e| ApiError::decode(format!("Failed to parse response: {}", e)))
}
