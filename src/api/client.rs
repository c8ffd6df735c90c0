use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("stayhub-client/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over the marketplace REST API: one method per UI action,
/// one HTTP call each. The bearer token is shared behind a lock so the
/// session can swap it while clones of the client are in use.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|slot| slot.clone())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, url);
        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// GET with the global read-retry policy: one automatic retry on a
    /// transport error. Mutations never go through here.
    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let send = || async {
            let mut req = self.request(Method::GET, path);
            if let Some(query) = query {
                req = req.query(query);
            }
            req.send().await
        };

        let response = match send().await {
            Ok(response) => response,
            Err(err) if err.is_connect() || err.is_timeout() => {
                warn!("GET {} failed ({}), retrying once", path, err);
                send().await?
            }
            Err(err) => return Err(err.into()),
        };

        Self::handle_response(response).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("POST {}", path);
        let response = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    pub(crate) async fn put_json<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!("PUT {}", path);
        let response = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!("DELETE {}", path);
        let response = self.request(Method::DELETE, path).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }
        response.json().await.map_err(Into::into)
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Map a non-success status to the error taxonomy, pulling the message out
/// of the API's `{"detail": ...}` envelope when present.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.to_string()
            } else {
                body.to_string()
            }
        });

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Authentication(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Validation(message)
        }
        other => ApiError::Server {
            status: other.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn token_round_trip() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        assert_eq!(client.token(), None);
        client.set_token("abc");
        assert_eq!(client.token(), Some("abc".to_string()));

        // Clones share the token cell; the session relies on this.
        let clone = client.clone();
        client.clear_token();
        assert_eq!(clone.token(), None);
    }

    #[test]
    fn classifies_statuses_and_extracts_detail() {
        let err = classify_error(StatusCode::UNAUTHORIZED, r#"{"detail":"Bad credentials"}"#);
        assert!(matches!(err, ApiError::Authentication(ref m) if m == "Bad credentials"));

        let err = classify_error(StatusCode::NOT_FOUND, r#"{"detail":"Listing not found"}"#);
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = classify_error(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail":[{"loc":["body"]}]}"#);
        assert!(matches!(err, ApiError::Validation(_)));

        let err = classify_error(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, ApiError::Server { status: 502, .. }));
    }

    #[test]
    fn falls_back_to_raw_body_when_detail_is_missing() {
        let err = classify_error(StatusCode::BAD_REQUEST, "plain text failure");
        assert_eq!(err.message(), "plain text failure");
    }
}
