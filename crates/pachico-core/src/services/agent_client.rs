use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::attachments::Attachment;
use super::error::{ClientError, ClientResult};
use crate::settings::AppConfig;

/// Route of the chat endpoint relative to the base URL
const CHAT_ROUTE: &str = "/api/chat";

/// Body of a chat request
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
    thread_id: &'a str,
}

/// Agent reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    #[serde(default)]
    pub file_paths: Vec<String>,
}

/// Anything that can answer a chat message for a thread
#[async_trait]
pub trait AgentBackend: Send + Sync + 'static {
    async fn send_message(&self, message: &str, thread_id: &str) -> ClientResult<ChatResponse>;
}

/// HTTP client for the agent service
#[derive(Clone)]
pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl AgentClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let http = reqwest::Client::builder()
            .user_agent("Pachico/1.0 (Chat Client)")
            .build()
            .map_err(|e| ClientError::Request(format!("Failed to build HTTP client: {}", e)))?;

        info!(base_url = %base_url, timeout_secs = timeout.as_secs_f64(), "Agent client ready");

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &AppConfig) -> ClientResult<Self> {
        Self::new(config.api_url.clone(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of a server-relative file path
    pub fn file_url(&self, relative_path: &str) -> String {
        let normalized = relative_path.replace('\\', "/");
        format!("{}/{}", self.base_url, normalized)
    }

    /// Resolve a file path returned by the agent into a renderable attachment
    pub fn attachment(&self, relative_path: &str) -> Attachment {
        Attachment::new(relative_path, self.file_url(relative_path))
    }

    async fn post_chat(&self, request: &ChatRequest<'_>) -> ClientResult<ChatResponse> {
        let url = format!("{}{}", self.base_url, CHAT_ROUTE);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "Received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unreachable {
                base_url: self.base_url.clone(),
            }
        } else {
            ClientError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl AgentBackend for AgentClient {
    async fn send_message(&self, message: &str, thread_id: &str) -> ClientResult<ChatResponse> {
        let request = ChatRequest { message, thread_id };

        debug!(thread_id = %thread_id, message_len = message.len(), "Sending chat request");

        // The timer is dropped together with the request future on every path
        let result = match tokio::time::timeout(self.timeout, self.post_chat(&request)).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout),
        };

        match &result {
            Ok(response) => debug!(
                thread_id = %thread_id,
                files = response.file_paths.len(),
                "Chat request succeeded"
            ),
            Err(e) => warn!(thread_id = %thread_id, error = %e, "Chat request failed"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer, timeout: Duration) -> AgentClient {
        AgentClient::new(server.uri(), timeout).unwrap()
    }

    #[tokio::test]
    async fn test_file_url_normalizes_backslashes() {
        let client = AgentClient::new("http://x", Duration::from_secs(1)).unwrap();
        assert_eq!(client.file_url("exports\\foo.png"), "http://x/exports/foo.png");
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_stripped() {
        let client = AgentClient::new("http://x/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://x");
        assert_eq!(client.file_url("exports/a.csv"), "http://x/exports/a.csv");
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"message": "What should I eat?", "thread_id": "t-1"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "text": "Eat a pear.",
                "file_paths": ["exports/pear.png"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let response = client.send_message("What should I eat?", "t-1").await.unwrap();

        assert_eq!(response.text, "Eat a pear.");
        assert_eq!(response.file_paths, vec!["exports/pear.png".to_string()]);
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("agent crashed"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.send_message("hi", "t-1").await.unwrap_err();

        match &err {
            ClientError::Api { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, "agent crashed");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(err.to_string(), "API error 500: agent crashed");
    }

    #[tokio::test]
    async fn test_empty_error_body_falls_back_to_reason() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.send_message("hi", "t-1").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Api { status: 503, ref body } if body == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.send_message("hi", "t-1").await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_slow_agent_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"text": "late", "file_paths": []}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(200));
        let started = Instant::now();
        let err = client.send_message("hi", "t-1").await.unwrap_err();

        assert!(matches!(err, ClientError::Timeout));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(
            err.to_string(),
            "Request timed out: the agent took too long to respond."
        );
    }

    #[tokio::test]
    async fn test_unreachable_names_base_url() {
        // Bind then release a port so nothing is listening on it
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{}", port);

        let client = AgentClient::new(base_url.clone(), Duration::from_secs(5)).unwrap();
        let err = client.send_message("hi", "t-1").await.unwrap_err();

        assert!(matches!(err, ClientError::Unreachable { .. }));
        assert!(err.to_string().contains(&base_url));
    }
}
