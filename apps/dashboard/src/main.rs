use std::{future::Future, io, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dashboard_core::{
    render_json, render_text, DashboardSession, DashboardSettings, DashboardSnapshot,
    HttpDashboardSource, LoadPhase,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(about = "Read-only AI RMF attestation dashboard")]
struct Args {
    /// Backend API base, e.g. http://localhost:8000/api
    #[arg(long)]
    api_base: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = DashboardSettings::load()?.with_api_base(args.api_base);
    let source = HttpDashboardSource::new(&settings.api_base)
        .with_context(|| format!("cannot use api base '{}'", settings.api_base))?;
    info!(api_base = %source.endpoints().base(), "loading dashboard");

    let snapshot = load(DashboardSession::mount(Arc::new(source))).await?;
    match snapshot.phase {
        LoadPhase::Failed => error!(
            reason = snapshot.failure.as_deref().unwrap_or_default(),
            "dashboard data unavailable"
        ),
        LoadPhase::Cancelled => info!("dashboard load cancelled"),
        LoadPhase::Ready | LoadPhase::Loading => {}
    }

    let report = match args.format {
        OutputFormat::Text => render_text(&snapshot.view),
        OutputFormat::Json => render_json(&snapshot.view)?,
    };
    println!("{}", report.trim_end());
    Ok(())
}

/// Joins the session, cancelling it on Ctrl-C.
async fn load(session: DashboardSession) -> Result<DashboardSnapshot> {
    load_until(session, tokio::signal::ctrl_c()).await
}

/// Joins the session, cancelling it if `interrupt` fires first. An interrupt
/// that cannot be listened for is logged and the load runs to completion.
async fn load_until<F>(mut session: DashboardSession, interrupt: F) -> Result<DashboardSnapshot>
where
    F: Future<Output = io::Result<()>>,
{
    let interrupted = tokio::select! {
        _ = session.settled() => false,
        signal = interrupt => match signal {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "cannot listen for Ctrl-C; waiting for the load to settle");
                false
            }
        },
    };
    if interrupted {
        session.cancel();
    }
    Ok(session.join().await?)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use dashboard_core::{DashboardSource, Endpoint, FetchError};
    use serde_json::{json, Value};

    use super::*;

    #[test]
    fn defaults_to_text_without_base_override() {
        let args = Args::try_parse_from(["dashboard"]).expect("args");
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.api_base.is_none());
    }

    #[test]
    fn accepts_json_format_and_base() {
        let args = Args::try_parse_from([
            "dashboard",
            "--format",
            "json",
            "--api-base",
            "http://127.0.0.1:8000/api",
        ])
        .expect("args");
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.api_base.as_deref(), Some("http://127.0.0.1:8000/api"));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["dashboard", "--format", "html"]).is_err());
    }

    struct SlowSource {
        delay: Option<Duration>,
    }

    #[async_trait]
    impl DashboardSource for SlowSource {
        async fn fetch(&self, _endpoint: Endpoint) -> Result<Value, FetchError> {
            match self.delay {
                Some(delay) => tokio::time::sleep(delay).await,
                None => std::future::pending::<()>().await,
            }
            Ok(json!([]))
        }
    }

    #[tokio::test]
    async fn interrupt_cancels_a_pending_load() {
        let session = DashboardSession::mount(Arc::new(SlowSource { delay: None }));

        let snapshot = load_until(session, std::future::ready(Ok(())))
            .await
            .expect("load");

        assert_eq!(snapshot.phase, LoadPhase::Cancelled);
    }

    #[tokio::test]
    async fn unavailable_signal_handler_waits_for_the_load() {
        let session = DashboardSession::mount(Arc::new(SlowSource {
            delay: Some(Duration::from_millis(20)),
        }));
        let no_handler = std::future::ready(Err(io::Error::other("signal unavailable")));

        let snapshot = load_until(session, no_handler).await.expect("load");

        assert_eq!(snapshot.phase, LoadPhase::Ready);
    }
}
