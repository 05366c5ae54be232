//! Outbound submissions: the JSON form relay for the contact form and the
//! mailing-list post for the waitlist.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy};
use serde::Serialize;
use url::Url;

use crate::config::RelayConfig;
use crate::form::WaitlistSubmission;
use crate::{Error, Result};

const CLIENT_USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Body posted to the form relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionPayload {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Anything that can deliver a contact submission
///
/// Transport failures and non-success answers are both errors; callers do
/// not distinguish between them.
#[async_trait::async_trait]
pub trait SubmissionRelay: Send + Sync {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()>;
}

/// Build HTTP client with optional proxy
fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

    let mut builder = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref proxy) = proxy_url {
        let proxy = Proxy::all(proxy)
            .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
        builder = builder.proxy(proxy);
        tracing::info!("Using HTTP proxy for submissions");
    }

    builder.build().map_err(Error::Http)
}

/// JSON relay over HTTP
pub struct HttpRelay {
    client: Client,
    endpoint: Url,
}

impl HttpRelay {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = build_client(config.request_timeout_secs, &config.proxy_url)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl SubmissionRelay for HttpRelay {
    async fn submit(&self, payload: &SubmissionPayload) -> Result<()> {
        tracing::debug!(endpoint = %self.endpoint, "Posting contact submission");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Relay(format!("relay answered {}", status)))
        }
    }
}

/// Posts waitlist sign-ups the way the browser form would
pub struct WaitlistClient {
    client: Client,
}

impl WaitlistClient {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = build_client(config.request_timeout_secs, &config.proxy_url)?;
        Ok(Self { client })
    }

    pub async fn post(&self, submission: &WaitlistSubmission) -> Result<()> {
        let url = Url::parse(&submission.action_url)?;
        tracing::debug!(host = ?url.host_str(), "Posting waitlist sign-up");

        let response = self
            .client
            .post(url)
            .form(&submission.fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!("Waitlist sign-up accepted");
            Ok(())
        } else {
            Err(Error::Relay(format!("mailing list answered {}", status)))
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one request with a fixed status line, returning the raw request
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let length = text[..head_end]
                        .lines()
                        .find_map(|line| {
                            let (key, value) = line.split_once(':')?;
                            key.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!("HTTP/1.1 {}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n", status_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (format!("http://{}/submit", addr), handle)
    }

    fn payload() -> SubmissionPayload {
        SubmissionPayload {
            access_key: "site-key".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello".to_string(),
        }
    }

    fn relay_for(endpoint: String) -> HttpRelay {
        HttpRelay::new(&RelayConfig {
            endpoint,
            request_timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_payload_json_shape() {
        let value = serde_json::to_value(payload()).unwrap();
        assert_eq!(value["access_key"], "site-key");
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["message"], "Hello");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = HttpRelay::new(&RelayConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, Error::UrlParse(_)));
    }

    #[tokio::test]
    async fn test_success_status() {
        let (endpoint, server) = serve_once("200 OK").await;
        relay_for(endpoint).submit(&payload()).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("POST /submit"));
        assert!(request.contains("\"access_key\":\"site-key\""));
    }

    #[tokio::test]
    async fn test_non_success_status_is_relay_error() {
        let (endpoint, server) = serve_once("500 Internal Server Error").await;
        let err = relay_for(endpoint).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, Error::Relay(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_is_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let result = relay_for(format!("http://{}/submit", addr)).submit(&payload()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_waitlist_posts_form_fields() {
        let (endpoint, server) = serve_once("200 OK").await;
        let client = WaitlistClient::new(&RelayConfig::default()).unwrap();
        let submission = WaitlistSubmission {
            action_url: endpoint,
            fields: vec![
                ("EMAIL".to_string(), "ada@example.com".to_string()),
                ("b_hidden".to_string(), String::new()),
            ],
        };
        client.post(&submission).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.contains("application/x-www-form-urlencoded"));
        assert!(request.contains("EMAIL=ada%40example.com&b_hidden="));
    }
}
