//! # Doubles Client SDK
//!
//! Typed Rust clients for the Order Issues and Payments test doubles, the
//! way a system under test would call them.

mod issues;
mod payments;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};

pub use issues::IssuesClient;
pub use payments::PaymentsClient;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// `true` for the 500 produced by fault injection.
    pub fn is_upstream_failure(&self) -> bool {
        self.status() == Some(500)
    }
}

/// Transport shared by both clients.
#[derive(Debug, Clone)]
struct Transport {
    base_url: String,
    http: Client,
}

impl Transport {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.request(Method::GET, "/health").send().await?;
        Ok(resp.status().is_success())
    }

    async fn get<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ClientError> {
        let resp = self.request(Method::GET, path).query(query).send().await?;
        handle_response(resp).await
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.request(method, path).json(body).send().await?;
        handle_response(resp).await
    }

    async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        simulate_conflict: bool,
    ) -> Result<T, ClientError> {
        let mut req = self.request(Method::DELETE, path);
        if simulate_conflict {
            req = req.query(&[("conflict", "true")]);
        }
        handle_response(req.send().await?).await
    }
}

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    } else {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_trims_trailing_slash() {
        let transport = Transport::new("http://localhost:8081/");
        assert_eq!(transport.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_error_classification() {
        let err = ClientError::Api {
            status: 409,
            message: "Simulated conflict".into(),
        };
        assert!(err.is_conflict());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "API error: 409 - Simulated conflict");
    }
}
