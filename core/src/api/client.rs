//! REST client for the SafeBite backend
//!
//! Every request carries the stored bearer token. A rejected session is
//! cleared and reported as [`ApiError::Unauthorized`] so the caller can
//! redirect to the login page; nothing is retried.

use super::credentials::CredentialStore;
use crate::config::ApiSettings;
use crate::error::{ApiError, Result};
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Backend API client
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    settings: ApiSettings,
    credentials: CredentialStore,
}

impl ApiClient {
    /// Create a new client from resolved API settings
    pub fn new(settings: ApiSettings, credentials: CredentialStore) -> Result<Self> {
        let mut raw = settings.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| ApiError::InvalidBaseUrl {
            url: settings.base_url.clone(),
            message: e.to_string(),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            settings,
            credentials,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Absolute URL of a backend path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                message: e.to_string(),
            })?;
        Ok(url)
    }

    /// Start a request with the session token attached
    pub async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        match self.credentials.load().await? {
            Some(session) => builder = builder.bearer_auth(session.token),
            None => tracing::debug!("No stored session, sending '{}' unauthenticated", path),
        }

        Ok(builder)
    }

    /// GET a JSON document
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path).await?;
        self.execute(path, builder).await
    }

    async fn execute<T: DeserializeOwned>(&self, path: &str, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!("Session rejected for '{}' ({}), clearing credentials", path, status);
            self.credentials.clear().await?;
            return Err(ApiError::Unauthorized {
                redirect_to: self.settings.login_page.clone(),
            }
            .into());
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Request to '{}' failed with {}", path, status);
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::credentials::{Role, Session};
    use crate::error::Error;
    use reqwest::header::AUTHORIZATION;
    use tempfile::TempDir;

    fn client(dir: &TempDir, base_url: &str) -> ApiClient {
        let settings = ApiSettings {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        ApiClient::new(settings, CredentialStore::new(dir.path().join("session.json")))
            .expect("Failed to create client")
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, "https://safebite.example/api");

        assert_eq!(
            client.endpoint("/devices").unwrap().as_str(),
            "https://safebite.example/api/devices"
        );
        assert_eq!(
            client.endpoint("logs/activity?page=2").unwrap().as_str(),
            "https://safebite.example/api/logs/activity?page=2"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let dir = TempDir::new().unwrap();
        let settings = ApiSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let err = ApiClient::new(settings, CredentialStore::new(dir.path().join("s.json"))).unwrap_err();
        assert!(err.to_string().contains("Invalid API base URL"));
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, "http://localhost:8000/api");
        client
            .credentials()
            .save(&Session::new("abc123", Role::Admin, "admin"))
            .await
            .unwrap();

        let request = client.request(Method::GET, "users").await.unwrap().build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            Some("Bearer abc123")
        );
        assert_eq!(
            request.headers().get(ACCEPT).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    /// Serve one canned HTTP response on a local port; returns the API base URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = vec![0u8; 8192];
            let _ = socket.read(&mut request).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn test_rejected_session_is_cleared() {
        let dir = TempDir::new().unwrap();
        let base_url = serve_once("401 Unauthorized", r#"{"detail":"token expired"}"#).await;
        let client = client(&dir, &base_url);
        client
            .credentials()
            .save(&Session::new("stale", Role::User, "kim"))
            .await
            .unwrap();

        let err = client.get_json::<serde_json::Value>("/devices").await.unwrap_err();
        match err {
            Error::Api(ApiError::Unauthorized { redirect_to }) => assert_eq!(redirect_to, "login"),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
        assert!(client.credentials().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let dir = TempDir::new().unwrap();
        let base_url = serve_once("500 Internal Server Error", r#"{"detail":"sensor db down"}"#).await;
        let client = client(&dir, &base_url);
        client
            .credentials()
            .save(&Session::new("fresh", Role::Admin, "ana"))
            .await
            .unwrap();

        let err = client.get_json::<serde_json::Value>("devices").await.unwrap_err();
        match err {
            Error::Api(ApiError::Status { path, status, message }) => {
                assert_eq!(path, "devices");
                assert_eq!(status, 500);
                assert!(message.contains("sensor db down"));
            }
            other => panic!("expected Status, got {:?}", other),
        }
        assert!(client.credentials().load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_success_decodes_json() {
        let dir = TempDir::new().unwrap();
        let base_url = serve_once("200 OK", r#"[{"id":1,"name":"fridge-01"}]"#).await;
        let client = client(&dir, &base_url);

        let devices: serde_json::Value = client.get_json("devices").await.unwrap();
        assert_eq!(devices[0]["name"], "fridge-01");
    }

    #[tokio::test]
    async fn test_no_token_without_session() {
        let dir = TempDir::new().unwrap();
        let client = client(&dir, "http://localhost:8000/api");

        let request = client.request(Method::GET, "food-items").await.unwrap().build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }
}
