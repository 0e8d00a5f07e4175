//! Authenticated HTTP access to the backend API.

use crate::auth::{StaticToken, TokenProvider};
use crate::error::{ApiError, ConfigError};
use crate::settings::ClientSettings;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;
use std::sync::Arc;

/// Cheap to clone: the reqwest client and token provider are shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish()
    }
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> Result<Self, ConfigError> {
        Self::with_http_client(reqwest::Client::new(), base_url, tokens)
    }

    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ConfigError> {
        Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(ApiClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// Build from settings; the static token (if any) becomes the token provider.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::Validation(format!("http client: {}", e)))?;
        let tokens: Arc<dyn TokenProvider> = match &settings.token {
            Some(t) => Arc::new(StaticToken::new(t.clone())),
            None => Arc::new(StaticToken::none()),
        };
        Self::with_http_client(http, &settings.base_url, tokens)
    }

    /// Replace the session provider, keeping the HTTP client and base URL.
    pub fn with_tokens(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current session token, looked up fresh on every call.
    pub async fn token(&self) -> Option<String> {
        self.tokens.access_token().await
    }

    /// Absolute URL for an API path plus query pairs. Absolute `http(s)://` paths are used as-is.
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ConfigError> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl {
            url: raw.clone(),
            reason: e.to_string(),
        })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Issue one request with the session token and JSON content type merged into `headers`.
    ///
    /// Non-2xx responses are logged and returned as [`ApiError::Http`]. A 204, a
    /// `content-length: 0`, a non-JSON content type, or an empty body resolve to `Ok(None)`.
    pub async fn fetch_with_auth(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        mut headers: HeaderMap,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url(path, query)?;
        if let Some(token) = self.token().await {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ConfigError::Validation("session token is not a valid header value".into()))?;
            headers.insert(AUTHORIZATION, value);
        }
        headers
            .entry(CONTENT_TYPE)
            .or_insert(HeaderValue::from_static("application/json"));

        tracing::debug!(method = %method, url = %url, "request");
        let mut request = self.http.request(method, url.clone()).headers(headers);
        if let Some(b) = body {
            request = request.body(serde_json::to_vec(b)?);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %text, url = %url, "API error");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body: text,
            });
        }
        if status == StatusCode::NO_CONTENT || !has_json_body(response.headers()) {
            return Ok(None);
        }
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Option<Value>, ApiError> {
        self.fetch_with_auth(Method::GET, path, query, None, HeaderMap::new()).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        self.fetch_with_auth(Method::POST, path, &[], Some(body), HeaderMap::new()).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Option<Value>, ApiError> {
        self.fetch_with_auth(Method::PUT, path, &[], Some(body), HeaderMap::new()).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.fetch_with_auth(Method::DELETE, path, &[], None, HeaderMap::new()).await
    }
}

fn has_json_body(headers: &HeaderMap) -> bool {
    let empty = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim() == "0")
        .unwrap_or(false);
    if empty {
        return false;
    }
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8080/", Arc::new(StaticToken::none())).unwrap()
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = ApiClient::new("not a url", Arc::new(StaticToken::none())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn joins_paths_and_encodes_query() {
        let c = client();
        let url = c
            .url(
                "/api/items",
                &[("filter".to_string(), r#"{"key":"value"}"#.to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/items?filter=%7B%22key%22%3A%22value%22%7D"
        );
        assert_eq!(c.url("api/items", &[]).unwrap().as_str(), "http://localhost:8080/api/items");
    }

    #[test]
    fn empty_query_adds_no_question_mark() {
        let url = client().url("/api/items", &[]).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn json_body_detection() {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(has_json_body(&h));
        h.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        assert!(!has_json_body(&h));

        let mut text = HeaderMap::new();
        text.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_body(&text));
        assert!(!has_json_body(&HeaderMap::new()));
    }
}
