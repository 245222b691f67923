use anyhow::Result;
use clap::Parser;
use statseries::cli::{Cli, Command};
use statseries::normalize::{NormalizeOptions, normalize_with};
use statseries::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    match Cli::parse().command {
        None => collect().await,
        Some(Command::Normalize {
            input,
            output,
            max_backfill,
        }) => {
            let output = output.unwrap_or_else(|| input.clone());
            let options = NormalizeOptions {
                max_backfill_seconds: match max_backfill {
                    Some(limit) => Some(limit),
                    None => configured_backfill_limit()?,
                },
            };
            let (rows_before, rows_after) = series_repo::normalize_file(&input, &output, &options)?;
            tracing::info!(
                input = %input.display(),
                output = %output.display(),
                rows_before,
                rows_after,
                max_backfill_seconds = ?options.max_backfill_seconds,
                "series normalized"
            );
            Ok(())
        }
        Some(Command::Show { input, limit }) => {
            let series = series_repo::load(&input)?;
            let rows: Vec<_> = series.rows.iter().take(limit).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
            Ok(())
        }
    }
}

/// `output.max_backfill_seconds` from the config file, if one exists.
fn configured_backfill_limit() -> Result<Option<u64>> {
    if !Path::new(&config::config_path()).exists() {
        return Ok(None);
    }
    Ok(config::AppConfig::load()?.output.max_backfill_seconds)
}

async fn collect() -> Result<()> {
    let app_config = config::AppConfig::load()?;
    let source = Arc::new(sysinfo_repo::SysinfoSource::from_config(&app_config.subject)?);

    let series = models::Series::new(
        app_config.subject.pid.map(i64::from).unwrap_or(0),
        &app_config.subject.disk_device,
        &app_config.subject.network_interface,
    );
    let capacity = worker::accumulator_channel_capacity(app_config.sampling.channel_capacity);
    let (write_tx, write_rx) = tokio::sync::mpsc::channel(capacity);
    let accumulator_handle = worker::spawn_accumulator(write_rx, series);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            source,
            write_tx,
            samples_collected_total: Arc::new(AtomicU64::new(0)),
            samples_failed_total: Arc::new(AtomicU64::new(0)),
            shutdown_rx,
        },
        worker::WorkerConfig {
            sample_interval_ms: app_config.sampling.sample_interval_ms,
            stats_log_interval_secs: app_config.sampling.stats_log_interval_secs,
        },
    );
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        interval_ms = app_config.sampling.sample_interval_ms,
        duration_secs = app_config.sampling.duration_secs,
        "collecting"
    );

    let duration_secs = app_config.sampling.duration_secs;
    let collect_for = async move {
        if duration_secs == 0 {
            std::future::pending::<()>().await
        } else {
            tokio::time::sleep(std::time::Duration::from_secs(duration_secs)).await
        }
    };
    tokio::select! {
        _ = collect_for => {
            tracing::info!("Collection duration elapsed");
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    worker_handle
        .await
        .map_err(|e| anyhow::anyhow!("worker join: {}", e))?;
    let mut series = accumulator_handle
        .await
        .map_err(|e| anyhow::anyhow!("accumulator join: {}", e))?;
    if series.pid == 0
        && let Some(first) = series.rows.first()
    {
        series.pid = first.proc.pid;
    }

    let options = NormalizeOptions {
        max_backfill_seconds: app_config.output.max_backfill_seconds,
    };
    let normalized = normalize_with(&series, &options)?;
    let path = PathBuf::from(&app_config.output.path);
    series_repo::save(&path, &normalized)?;
    tracing::info!(
        path = %path.display(),
        collected = series.len(),
        saved = normalized.len(),
        "series saved"
    );
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
