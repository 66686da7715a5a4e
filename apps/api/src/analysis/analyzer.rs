//! Analysis pipeline shared by every request.
//!
//! Flow: extract transcript (blocking thread) → reject blank transcripts →
//!       optional truncation → build prompt → one model call.
//!
//! The analyzer holds no per-request state; concurrent requests only share the
//! injected extractor and model handles.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::TextExtractor;
use crate::llm_client::prompts::build_analysis_prompt;
use crate::llm_client::LanguageModel;

pub struct Analyzer {
    extractor: Arc<dyn TextExtractor>,
    model: Arc<dyn LanguageModel>,
    max_transcript_chars: Option<usize>,
}

impl Analyzer {
    pub fn new(extractor: Arc<dyn TextExtractor>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            extractor,
            model,
            max_transcript_chars: None,
        }
    }

    pub fn with_max_transcript_chars(mut self, limit: Option<usize>) -> Self {
        self.max_transcript_chars = limit;
        self
    }

    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Runs the full pipeline over one uploaded document and returns the model's answer.
    pub async fn analyze(&self, document: Bytes) -> Result<String, AppError> {
        let transcript = self.extract_transcript(document).await?;

        if transcript.trim().is_empty() {
            return Err(AppError::no_text());
        }

        let transcript = match self.max_transcript_chars {
            Some(limit) => truncate_chars(&transcript, limit),
            None => transcript.as_str(),
        };

        let prompt = build_analysis_prompt(transcript);
        debug!(
            "Prompting {} with {} transcript chars",
            self.model.model_id(),
            transcript.chars().count()
        );

        let analysis = self
            .model
            .generate(&prompt)
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?;

        info!("Analysis complete: {} chars", analysis.len());
        Ok(analysis)
    }

    async fn extract_transcript(&self, document: Bytes) -> Result<String, AppError> {
        let extractor = Arc::clone(&self.extractor);
        // pdf-extract is synchronous and may panic on malformed input; both cases
        // come back through the JoinHandle.
        let joined = tokio::task::spawn_blocking(move || extractor.extract(&document)).await;

        match joined {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(AppError::Internal(e.to_string())),
            Err(join_err) => Err(AppError::Internal(panic_message(join_err))),
        }
    }
}

fn panic_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "PDF extraction panicked".to_string())
}

/// Cuts `text` to at most `limit` chars, on a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            warn!("Transcript truncated to {limit} chars");
            &text[..byte_idx]
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeExtractor, FakeModel};

    fn analyzer(extractor: FakeExtractor, model: Arc<FakeModel>) -> Analyzer {
        Analyzer::new(Arc::new(extractor), model)
    }

    #[tokio::test]
    async fn test_prompt_embeds_transcript_verbatim() {
        let model = Arc::new(FakeModel::replying("Rating: 7/10"));
        let transcript = "Jane Roe\nStaff Engineer\n\tKubernetes, Go";
        let analyzer = analyzer(FakeExtractor::text(transcript), model.clone());

        let analysis = analyzer.analyze(Bytes::from_static(b"%PDF")).await.unwrap();

        assert_eq!(analysis, "Rating: 7/10");
        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Analyze this resume and provide:"));
        assert!(prompts[0].ends_with(transcript));
    }

    #[tokio::test]
    async fn test_whitespace_transcript_is_extraction_failure() {
        let model = Arc::new(FakeModel::replying("unused"));
        let analyzer = analyzer(FakeExtractor::text(" \n\t \n"), model.clone());

        let err = analyzer.analyze(Bytes::new()).await.unwrap_err();

        assert!(matches!(err, AppError::ExtractionFailed(_)));
        assert!(model.prompts().is_empty(), "model must not be called");
    }

    #[tokio::test]
    async fn test_extractor_error_is_internal() {
        let model = Arc::new(FakeModel::replying("unused"));
        let analyzer = analyzer(FakeExtractor::failing("bad xref table"), model);

        let err = analyzer.analyze(Bytes::new()).await.unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(
            err.to_string(),
            "Failed to analyze resume: PDF extraction error: bad xref table"
        );
    }

    #[tokio::test]
    async fn test_extractor_panic_is_internal() {
        let model = Arc::new(FakeModel::replying("unused"));
        let analyzer = analyzer(FakeExtractor::panicking("unexpected object"), model);

        let err = analyzer.analyze(Bytes::new()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to analyze resume: unexpected object");
    }

    #[tokio::test]
    async fn test_model_error_message_is_carried() {
        let model = Arc::new(FakeModel::failing_with_status(429, "Resource has been exhausted"));
        let analyzer = analyzer(FakeExtractor::text("Some resume"), model);

        let err = analyzer.analyze(Bytes::new()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to analyze resume: API error (status 429): Resource has been exhausted"
        );
    }

    #[tokio::test]
    async fn test_transcript_limit_truncates_before_prompting() {
        let model = Arc::new(FakeModel::replying("ok"));
        let analyzer = analyzer(FakeExtractor::text("héllo wörld"), model.clone())
            .with_max_transcript_chars(Some(5));

        analyzer.analyze(Bytes::new()).await.unwrap();

        assert!(model.prompts()[0].ends_with("Resume:\nhéllo"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("ünïcödé", 3), "ünï");
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("exact", 5), "exact");
    }
}
