//! Fakes shared by handler, pipeline and session tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::extraction::{ExtractError, TextExtractor};
use crate::llm_client::{LanguageModel, LlmError};
use crate::state::AppState;

pub enum FakeExtractor {
    Text(String),
    Fail(String),
    Panic(String),
}

impl FakeExtractor {
    pub fn text(text: &str) -> Self {
        FakeExtractor::Text(text.to_string())
    }

    pub fn failing(message: &str) -> Self {
        FakeExtractor::Fail(message.to_string())
    }

    pub fn panicking(message: &str) -> Self {
        FakeExtractor::Panic(message.to_string())
    }
}

impl TextExtractor for FakeExtractor {
    fn extract(&self, _document: &[u8]) -> Result<String, ExtractError> {
        match self {
            FakeExtractor::Text(text) => Ok(text.clone()),
            FakeExtractor::Fail(message) => Err(ExtractError::Pdf(message.clone())),
            FakeExtractor::Panic(message) => panic!("{}", message),
        }
    }
}

/// Scripted model that records every prompt it receives.
pub struct FakeModel {
    reply: Result<String, (u16, String)>,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_with_status(status: u16, message: &str) -> Self {
        Self {
            reply: Err((status, message.to_string())),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for FakeModel {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err((status, message)) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }

    fn model_id(&self) -> &str {
        "fake-model"
    }
}

pub fn test_config() -> Config {
    Config {
        gemini_api_key: None,
        gemini_model: "fake-model".to_string(),
        gemini_api_base: "http://127.0.0.1:9".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        max_upload_bytes: None,
        max_transcript_chars: None,
        llm_timeout_secs: None,
    }
}

pub fn test_state(extractor: impl TextExtractor + 'static, model: Arc<FakeModel>) -> AppState {
    AppState {
        analyzer: Arc::new(Analyzer::new(Arc::new(extractor), model)),
        config: test_config(),
    }
}

pub const BOUNDARY: &str = "----resume-analyzer-test-boundary";

/// Hand-assembles a `multipart/form-data` body. Parts are `(name, file_name, bytes)`.
/// Returns the `Content-Type` header value and the body.
pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
            }
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
