//! Cosmetic progress indicator for an in-flight analysis.
//!
//! The steps are NOT derived from backend progress: a timer task walks a fixed
//! label list while the request is pending and is aborted when it settles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Labels shown while waiting. Kept in sync with `static/index.html`.
pub const ANALYSIS_STEPS: &[&str] = &[
    "Uploading resume",
    "Extracting text",
    "Reviewing experience",
    "Scoring resume",
    "Preparing feedback",
];

/// Milliseconds between steps unless overridden. Kept in sync with `static/index.html`.
pub const DEFAULT_STEP_INTERVAL_MS: u64 = 1500;

/// Owns the timer task that advances the current step index.
///
/// Invariant: once `stop()` returns, the index is 0 and no tick from the
/// previous run can change it.
pub struct ProgressTicker {
    steps: &'static [&'static str],
    interval: Duration,
    step_tx: Arc<watch::Sender<usize>>,
    run: Option<TickerRun>,
}

struct TickerRun {
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl ProgressTicker {
    pub fn new(steps: &'static [&'static str], interval: Duration) -> Self {
        let (step_tx, _) = watch::channel(0);
        Self {
            steps,
            // tokio intervals panic on a zero period
            interval: interval.max(Duration::from_millis(1)),
            step_tx: Arc::new(step_tx),
            run: None,
        }
    }

    pub fn steps(&self) -> &'static [&'static str] {
        self.steps
    }

    pub fn final_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    #[cfg(test)]
    pub fn current(&self) -> usize {
        *self.step_tx.borrow()
    }

    #[cfg(test)]
    pub fn current_label(&self) -> Option<&'static str> {
        self.steps.get(self.current()).copied()
    }

    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.step_tx.subscribe()
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Resets to step 0 and starts advancing. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let active = Arc::new(AtomicBool::new(true));
        let task = tokio::spawn(advance(
            Arc::clone(&self.step_tx),
            Arc::clone(&active),
            self.interval,
            self.final_index(),
        ));
        self.run = Some(TickerRun { active, task });
    }

    /// Cancels the timer task (if any) and resets to step 0.
    pub fn stop(&mut self) {
        if let Some(run) = self.run.take() {
            run.active.store(false, Ordering::SeqCst);
            run.task.abort();
        }
        self.step_tx.send_replace(0);
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            run.active.store(false, Ordering::SeqCst);
            run.task.abort();
        }
    }
}

async fn advance(
    step_tx: Arc<watch::Sender<usize>>,
    active: Arc<AtomicBool>,
    interval: Duration,
    final_index: usize,
) {
    let mut ticks = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
    loop {
        ticks.tick().await;
        // The flag is checked under the channel lock, so a tick racing with
        // `stop()` either lands before the reset or not at all.
        let advanced = step_tx.send_if_modified(|step| {
            if !active.load(Ordering::SeqCst) || *step >= final_index {
                return false;
            }
            *step += 1;
            true
        });
        if !advanced {
            break;
        }
    }
}
