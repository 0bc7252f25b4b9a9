//! Thin JSON-over-HTTP client shared by the gateways.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::domain::{AuthToken, GatewayError};

/// Failure of a single HTTP exchange
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<HttpError> for GatewayError {
    fn from(e: HttpError) -> Self {
        GatewayError::Unavailable(e.to_string())
    }
}

/// Build the `reqwest::Client` shared by every gateway.
pub fn build_reqwest_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// JSON client bound to one service's base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Result<Self, HttpError> {
        let base_url =
            Url::parse(base_url).map_err(|e| HttpError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    /// Append percent-encoded path segments to the base URL.
    pub fn url(&self, segments: &[&str]) -> Result<Url, HttpError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        token: Option<&AuthToken>,
    ) -> Result<T, HttpError> {
        let request = self.client.get(self.url(segments)?);
        self.send(request, token).await
    }

    pub async fn post_json<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        token: Option<&AuthToken>,
    ) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(segments)?).json(body);
        self.send(request, token).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&AuthToken>,
    ) -> Result<T, HttpError> {
        let request = match token {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| HttpError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::gateway::test_support::{client_for, spawn_fake_service};
    use axum::{Json, Router, http::HeaderMap, routing::get};
    use serde_json::{Value, json};

    #[test]
    fn test_url_encodes_segments() {
        // テスト項目: パスセグメントがパーセントエンコードされ、ベース URL のパスに追加される
        // given (前提条件):
        let client = client_for("http://localhost:3200/");

        // when (操作):
        let url = client.url(&["api", "v1", "users", "a b/c", "connections"]).unwrap();

        // then (期待する結果):
        assert_eq!(
            url.as_str(),
            "http://localhost:3200/api/v1/users/a%20b%2Fc/connections"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        // テスト項目: 不正なベース URL はエラーになる
        // given (前提条件):
        let client = build_reqwest_client(Duration::from_secs(1)).unwrap();

        // when (操作):
        let result = HttpClient::new(client, "not a url");

        // then (期待する結果):
        assert!(matches!(result, Err(HttpError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_get_json_sends_bearer_token() {
        // テスト項目: トークンが Authorization ヘッダーで送られる
        // given (前提条件):
        let router = Router::new().route(
            "/echo",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "authorization": auth }))
            }),
        );
        let client = client_for(&spawn_fake_service(router).await);
        let token = AuthToken::new("jwt".to_string()).unwrap();

        // when (操作):
        let body: Value = client.get_json(&["echo"], Some(&token)).await.unwrap();

        // then (期待する結果):
        assert_eq!(body["authorization"], "Bearer jwt");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        // テスト項目: 2xx 以外の応答は Status エラーになる
        // given (前提条件):
        let router = Router::new().route(
            "/fail",
            get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = client_for(&spawn_fake_service(router).await);

        // when (操作):
        let result: Result<Value, HttpError> = client.get_json(&["fail"], None).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(HttpError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        // テスト項目: タイムアウトを超えた応答は Transport エラーになる
        // given (前提条件):
        let router = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        );
        let client = client_for(&spawn_fake_service(router).await);

        // when (操作):
        let result: Result<Value, HttpError> = client.get_json(&["slow"], None).await;

        // then (期待する結果):
        assert!(matches!(result, Err(HttpError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_gateway_unavailable() {
        // テスト項目: 接続できないサービスは GatewayError::Unavailable に変換される
        // given (前提条件):
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client_for(&format!("http://{}", addr));

        // when (操作):
        let result: Result<Value, HttpError> = client.get_json(&["anything"], None).await;

        // then (期待する結果):
        let gateway_error: GatewayError = result.unwrap_err().into();
        assert!(matches!(gateway_error, GatewayError::Unavailable(_)));
    }
}
