use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use tracing::{debug, warn};

use hwstatus_core::config::PracticumConfig;
use hwstatus_core::{BotError, DataShapeError, Result};

/// Anything that can answer "what changed since `from_date`".
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    /// Fetch the raw, unvalidated API answer for updates after `from_date`.
    async fn get_api_answer(&self, from_date: i64) -> Result<serde_json::Value>;
}

/// HTTP client for the Practicum homework-status endpoint.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(token: String, config: &PracticumConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(client_build_error)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token,
        })
    }
}

/// A client that cannot be built is a startup failure, not a transient one.
fn client_build_error(e: reqwest::Error) -> BotError {
    BotError::Config(format!("failed to build HTTP client: {e}"))
}

#[async_trait]
impl HomeworkSource for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<serde_json::Value> {
        debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");

        let resp = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), endpoint = %self.endpoint, "homework API returned non-OK status");
            return Err(BotError::Protocol {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
            });
        }

        let body = resp.bytes().await?;
        let answer: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| DataShapeError::InvalidJson(e.to_string()))?;

        debug!(bytes = body.len(), "homework API answered");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode as AxumStatus};
    use axum::routing::get;
    use axum::Router;

    #[derive(Default)]
    struct Seen {
        authorization: Option<String>,
        from_date: Option<String>,
    }

    /// Serve `status` + `body` on an ephemeral port; returns the endpoint URL.
    async fn serve(status: u16, body: &'static str, seen: Arc<Mutex<Seen>>) -> String {
        let app = Router::new()
            .route(
                "/api/user_api/homework_statuses/",
                get(
                    move |State(seen): State<Arc<Mutex<Seen>>>,
                          headers: HeaderMap,
                          Query(params): Query<HashMap<String, String>>| async move {
                        let mut seen = seen.lock().unwrap();
                        seen.authorization = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from);
                        seen.from_date = params.get("from_date").cloned();
                        (AxumStatus::from_u16(status).unwrap(), body)
                    },
                ),
            )
            .with_state(seen);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api/user_api/homework_statuses/")
    }

    fn client(endpoint: String) -> PracticumClient {
        let config = PracticumConfig {
            endpoint,
            request_timeout_secs: 5,
        };
        PracticumClient::new("secret".to_string(), &config).unwrap()
    }

    #[tokio::test]
    async fn sends_oauth_header_and_cursor() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let endpoint = serve(
            200,
            r#"{"homeworks": [], "current_date": 1700000000}"#,
            Arc::clone(&seen),
        )
        .await;

        let answer = client(endpoint).get_api_answer(1699990000).await.unwrap();
        assert_eq!(answer["current_date"], 1700000000);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.authorization.as_deref(), Some("OAuth secret"));
        assert_eq!(seen.from_date.as_deref(), Some("1699990000"));
    }

    #[tokio::test]
    async fn non_ok_status_is_a_protocol_error() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let endpoint = serve(503, "unavailable", seen).await;

        let err = client(endpoint).get_api_answer(0).await.unwrap_err();
        assert!(matches!(err, BotError::Protocol { status: 503, .. }));
    }

    #[tokio::test]
    async fn other_success_codes_are_not_ok() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let endpoint = serve(204, "", seen).await;

        let err = client(endpoint).get_api_answer(0).await.unwrap_err();
        assert_eq!(err.code(), "PROTOCOL_ERROR");
    }

    #[tokio::test]
    async fn invalid_json_body_is_a_data_shape_error() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let endpoint = serve(200, "<html>not json</html>", seen).await;

        let err = client(endpoint).get_api_answer(0).await.unwrap_err();
        assert_eq!(err.code(), "INVALID_JSON");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        // Bind then drop a listener so the port is closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(format!("http://{addr}/"))
            .get_api_answer(0)
            .await
            .unwrap_err();
        assert!(err.is_transient());
        assert!(matches!(err, BotError::Network(_)));
    }

    #[tokio::test]
    async fn client_build_failure_is_a_config_error() {
        // reqwest::Error has no public constructor; take one from a refused connection.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = reqwest::get(format!("http://{addr}/")).await.unwrap_err();

        let err = client_build_error(source);
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert!(!err.is_transient());
        assert!(err.to_string().contains("failed to build HTTP client"));
    }

    #[tokio::test]
    async fn body_is_returned_untrusted() {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let endpoint = serve(200, r#"["not", "a", "dict"]"#, seen).await;

        let answer = client(endpoint).get_api_answer(0).await.unwrap();
        assert!(answer.is_array());
    }
}
