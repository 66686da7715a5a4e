//! How an upload session reaches the analyze endpoint.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::analysis::handlers::FILE_FIELD;

/// A file picked by the user, held in memory until submission.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Reads a file from disk, keeping only its file name.
    pub async fn load(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        Ok(Self::new(name, data))
    }
}

/// What the endpoint answered, once the exchange itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeReply {
    Analysis(String),
    Failed(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response from server: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait AnalyzeTransport: Send + Sync {
    async fn send(&self, file: &SelectedFile) -> Result<AnalyzeReply, TransportError>;
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    analysis: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Interprets a response body by status class, the same way the browser form does.
pub fn decode_reply(success: bool, body: &[u8]) -> Result<AnalyzeReply, TransportError> {
    if success {
        let body: SuccessBody = serde_json::from_slice(body)?;
        Ok(AnalyzeReply::Analysis(body.analysis))
    } else {
        let body: ErrorBody = serde_json::from_slice(body)?;
        Ok(AnalyzeReply::Failed(body.error))
    }
}

/// Multipart POST to `<base>/api/analyze`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/api/analyze", base_url.trim_end_matches('/')),
        }
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalyzeTransport for HttpTransport {
    async fn send(&self, file: &SelectedFile) -> Result<AnalyzeReply, TransportError> {
        let part = Part::bytes(file.data.to_vec())
            .file_name(file.name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let success = response.status().is_success();
        let body = response.bytes().await?;

        decode_reply(success, &body)
    }
}
