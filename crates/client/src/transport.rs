use async_trait::async_trait;
use thiserror::Error;

/// Multipart payload for a single submission attempt.
#[derive(Debug, Clone)]
pub struct SubmitPayload {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre: String,
    pub available_copies: String,
    pub image_name: String,
    pub image_bytes: Vec<u8>,
}

/// A response that reached the client, successful or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created {
        message: String,
        book_id: Option<String>,
    },
    /// Rejected with the server's `error` code, when one was parseable.
    Rejected { code: Option<String> },
}

/// No response was received at all.
#[derive(Debug, Error)]
#[error("no response received: {message}")]
pub struct TransportError {
    pub message: String,
}

/// Network seam of the form controller. Production code uses
/// [`HttpTransport`]; tests substitute a stub that records calls.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitOutcome, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitOutcome, TransportError> {
        (**self).submit(payload).await
    }
}

/// Submits the form to the `/addBook` endpoint over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `endpoint` is the full URL of the add-book route,
    /// e.g. `http://localhost:5500/addBook`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitOutcome, TransportError> {
        let form = reqwest::multipart::Form::new()
            .text("title", payload.title.clone())
            .text("author", payload.author.clone())
            .text("isbn", payload.isbn.clone())
            .text("genre", payload.genre.clone())
            .text("availableCopies", payload.available_copies.clone())
            .part(
                "image",
                reqwest::multipart::Part::bytes(payload.image_bytes.clone())
                    .file_name(payload.image_name.clone()),
            );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "add-book request failed to send");
                TransportError {
                    message: err.to_string(),
                }
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();

        if status.is_success() {
            Ok(SubmitOutcome::Created {
                message: body["message"].as_str().unwrap_or_default().to_string(),
                book_id: body["bookId"].as_str().map(str::to_string),
            })
        } else {
            Ok(SubmitOutcome::Rejected {
                code: body["error"].as_str().map(str::to_string),
            })
        }
    }
}
