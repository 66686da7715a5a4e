mod analysis;
mod cli;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod testing;
mod ui;

use std::net::SocketAddr;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::extraction::PdfTextExtractor;
use crate::llm_client::{GeminiClient, LanguageModel};
use crate::routes::build_router;
use crate::state::AppState;
use crate::ui::{HttpTransport, SelectedFile, SubmitStatus, UploadSession};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            serve().await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Analyze {
            file,
            server,
            step_interval_ms,
        } => analyze_file(&file, &server, Duration::from_millis(step_interval_ms)).await,
    }
}

/// Structured logging; `RUST_LOG` wins over the fallback level.
fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn serve() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.rust_log);

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every analysis will fail until it is configured");
    }

    // Initialize LLM client
    let model = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
        config.llm_timeout_secs.map(Duration::from_secs),
    )?;
    info!("LLM client initialized (model: {})", model.model_id());

    let analyzer = Analyzer::new(Arc::new(PdfTextExtractor), Arc::new(model))
        .with_max_transcript_chars(config.max_transcript_chars);

    match config.max_upload_bytes {
        Some(limit) => info!("Upload limit: {limit} bytes"),
        None => info!("Upload limit: none"),
    }

    let state = AppState {
        analyzer: Arc::new(analyzer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Terminal counterpart of the browser form: one upload, progress on stderr,
/// the analysis (or `Error: ...`) on stdout.
async fn analyze_file(path: &Path, server: &str, step_interval: Duration) -> Result<ExitCode> {
    init_tracing("warn");

    let transport = HttpTransport::new(server);
    let mut session = UploadSession::new(step_interval);
    session.select_file(SelectedFile::load(path).await?);

    let steps = session.steps();
    let mut step_rx = session.watch_steps();
    eprintln!("[1/{}] {}", steps.len(), steps[0]);
    let printer = tokio::spawn(async move {
        let mut last = 0;
        while step_rx.changed().await.is_ok() {
            let step = *step_rx.borrow_and_update();
            // The reset to 0 on completion is not a new step.
            if step > last {
                last = step;
                eprintln!("[{}/{}] {}", step + 1, steps.len(), steps[step]);
            }
        }
    });

    let status = session.submit(&transport).await;
    printer.abort();

    println!("{}", session.analysis_text());
    Ok(match status {
        SubmitStatus::Succeeded => ExitCode::SUCCESS,
        SubmitStatus::NotSent | SubmitStatus::Failed => ExitCode::FAILURE,
    })
}
