use std::sync::Arc;

use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, RequestBuilder, Response,
};
use shared::{domain::TermEntry, error::ErrorResponse};
use tracing::{debug, info};

use crate::{
    base_url::{resolve_for_location, PageLocation},
    error::ClientError,
};

pub const TERMS_PATH: &str = "/terms";

/// Hook run on every response before it reaches the caller.
///
/// `on_response` only sees 2xx responses; everything else, including
/// non-2xx statuses, goes through `on_error`.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, response: Response) -> Result<Response, ClientError> {
        Ok(response)
    }

    fn on_error(&self, error: ClientError) -> ClientError {
        error
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughInterceptor;

impl ResponseInterceptor for PassthroughInterceptor {}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    interceptor: Arc<dyn ResponseInterceptor>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            interceptor: Arc::new(PassthroughInterceptor),
        })
    }

    /// Resolves the base URL once; later language or location changes do not affect it.
    pub fn for_location(location: &PageLocation) -> Result<Self, ClientError> {
        let base_url = resolve_for_location(location);
        info!(%base_url, hostname = %location.hostname, "resolved api base url");
        Self::new(base_url)
    }

    pub fn with_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.interceptor = Arc::new(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Response, ClientError> {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        debug!(%url, "GET");
        match dispatch(self.http.get(&url)).await {
            Ok(response) => self.interceptor.on_response(response),
            Err(error) => Err(self.interceptor.on_error(error)),
        }
    }
}

async fn dispatch(request: RequestBuilder) -> Result<Response, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let (message, code) = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => (err.error, Some(err.code)),
        Err(_) => (body, None),
    };
    Err(ClientError::Status {
        status,
        message,
        code,
    })
}

#[derive(Clone)]
pub struct TermsApi {
    client: ApiClient,
}

impl TermsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// `GET <base>/terms`, handed back untouched.
    pub async fn get_all(&self) -> Result<Response, ClientError> {
        self.client.get(TERMS_PATH).await
    }

    pub async fn list_terms(&self) -> Result<Vec<TermEntry>, ClientError> {
        let terms = self.get_all().await?.json().await?;
        Ok(terms)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
