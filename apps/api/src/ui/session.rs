//! Upload session state machine shared by the terminal client.
//!
//! At most one analysis is in flight per session: `begin_submit` refuses while
//! loading, and `submit` holds `&mut self` across the request.

use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use crate::ui::progress::{ProgressTicker, ANALYSIS_STEPS};
use crate::ui::transport::{AnalyzeReply, AnalyzeTransport, SelectedFile, TransportError};

pub const ERROR_PREFIX: &str = "Error: ";

/// Result of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Nothing selected, or a request was already in flight.
    NotSent,
    Succeeded,
    Failed,
}

pub struct UploadSession {
    selected_file: Option<SelectedFile>,
    analysis_text: String,
    is_loading: bool,
    progress: ProgressTicker,
}

impl UploadSession {
    pub fn new(step_interval: Duration) -> Self {
        Self {
            selected_file: None,
            analysis_text: String::new(),
            is_loading: false,
            progress: ProgressTicker::new(ANALYSIS_STEPS, step_interval),
        }
    }

    #[cfg(test)]
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    /// Empty when there is nothing to show.
    pub fn analysis_text(&self) -> &str {
        &self.analysis_text
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[cfg(test)]
    pub fn current_step(&self) -> usize {
        self.progress.current()
    }

    pub fn steps(&self) -> &'static [&'static str] {
        self.progress.steps()
    }

    pub fn watch_steps(&self) -> watch::Receiver<usize> {
        self.progress.subscribe()
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        debug!("Selected {} ({} bytes)", file.name, file.data.len());
        self.selected_file = Some(file);
        self.analysis_text.clear();
    }

    /// Drops the displayed result. The one-shot terminal client never needs it.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.analysis_text.clear();
    }

    pub fn can_submit(&self) -> bool {
        self.selected_file.is_some() && !self.is_loading
    }

    /// Enters the loading state and returns the file to send, or `None` when
    /// submission is not allowed right now.
    pub fn begin_submit(&mut self) -> Option<SelectedFile> {
        if !self.can_submit() {
            return None;
        }
        let file = self.selected_file.clone()?;

        self.is_loading = true;
        self.analysis_text.clear();
        self.progress.start();
        Some(file)
    }

    /// Leaves the loading state and records what to display.
    pub fn finish(&mut self, outcome: Result<AnalyzeReply, TransportError>) {
        self.progress.stop();
        self.is_loading = false;
        self.analysis_text = match outcome {
            Ok(AnalyzeReply::Analysis(text)) => text,
            Ok(AnalyzeReply::Failed(error)) => format!("{ERROR_PREFIX}{error}"),
            Err(e) => format!("{ERROR_PREFIX}{e}"),
        };
    }

    /// Sends the selected file once. Returns `NotSent` without touching the
    /// network when submission is not allowed.
    pub async fn submit(&mut self, transport: &dyn AnalyzeTransport) -> SubmitStatus {
        let Some(file) = self.begin_submit() else {
            return SubmitStatus::NotSent;
        };
        let outcome = transport.send(&file).await;
        let status = match outcome {
            Ok(AnalyzeReply::Analysis(_)) => SubmitStatus::Succeeded,
            _ => SubmitStatus::Failed,
        };
        self.finish(outcome);
        status
    }
}
