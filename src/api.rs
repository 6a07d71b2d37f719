//! REST client for the library backend.
//!
//! Every call maps to one endpoint of the Flask-style API. Errors collapse
//! into a single [`ApiError`]; callers only ever branch on success vs.
//! failure, never on error subtype.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use thiserror::Error;

use crate::models::{Book, ChatReply, GuideAck, RobotStatus};

/// Default backend address, overridable via settings.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not build HTTP client: {0}")]
    Build(reqwest::Error),
}

/// The chat boundary: one question in, one reply out.
///
/// The transcript engine is tested against a stub implementation; the
/// production implementation is [`ApiClient`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, question: &str) -> Result<ChatReply, ApiError>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Build)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Search books by title or author.
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, ApiError> {
        let books = self
            .http
            .get(self.url("/api/search"))
            .query(&[("query", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(books)
    }

    /// Start a shelf scan.
    pub async fn start_scan(&self) -> Result<(), ApiError> {
        self.http
            .post(self.url("/api/scan"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Stop the running shelf scan.
    pub async fn stop_scan(&self) -> Result<(), ApiError> {
        self.http
            .post(self.url("/api/scan_exit"))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Current robot state.
    pub async fn robot_status(&self) -> Result<RobotStatus, ApiError> {
        #[derive(serde::Deserialize)]
        struct StatusBody {
            status: RobotStatus,
        }
        let body: StatusBody = self
            .http
            .get(self.url("/api/robot_status"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(body.status)
    }

    /// Force the robot state (used to rearm the panel after a scan).
    pub async fn set_robot_status(&self, status: RobotStatus) -> Result<(), ApiError> {
        self.http
            .post(self.url("/api/set_robot_status"))
            .json(&json!({ "status": status }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Ask the robot to guide the user to a book.
    pub async fn book_guide(&self, barcode: &str, title: &str) -> Result<GuideAck, ApiError> {
        let ack = self
            .http
            .post(self.url("/api/book-click"))
            .json(&json!({
                "id": barcode,
                "title": title,
                "timestamp": chrono::Local::now().to_rfc3339(),
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(ack)
    }

    /// Cancel an in-progress guidance run.
    pub async fn book_guide_cancel(
        &self,
        barcode: &str,
        request_id: Option<&str>,
    ) -> Result<(), ApiError> {
        self.http
            .post(self.url("/api/book-cancel"))
            .json(&json!({
                "id": barcode,
                "requestId": request_id,
                "timestamp": chrono::Local::now().to_rfc3339(),
            }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for ApiClient {
    async fn send(&self, question: &str) -> Result<ChatReply, ApiError> {
        #[derive(serde::Deserialize)]
        struct ChatBody {
            answer: String,
            #[serde(default)]
            sources: Vec<serde_json::Value>,
            #[serde(default)]
            usage: Option<serde_json::Value>,
        }
        let body: ChatBody = self
            .http
            .post(self.url("/api/chat"))
            .json(&json!({ "message": question, "history": [] }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(ChatReply {
            content: body.answer,
            sources: body.sources,
            usage: body.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client = ApiClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("/api/search"), "http://localhost:8000/api/search");

        let client = ApiClient::new(DEFAULT_API_BASE).unwrap();
        assert_eq!(client.url("/api/chat"), "http://localhost:8000/api/chat");
    }
}
