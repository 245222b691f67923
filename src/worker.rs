// Background sampling worker.
// Collection runs in the worker; the series is owned by a dedicated accumulator task (channel),
// which hands it back when the worker stops.

use crate::models::{Sample, Series};
use crate::sysinfo_repo::SampleSource;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Channel capacity between worker and accumulator (backpressure if the accumulator lags).
pub fn accumulator_channel_capacity(configured: usize) -> usize {
    configured.max(8)
}

/// Source, channel, counters and shutdown for the worker.
pub struct WorkerDeps<S: SampleSource> {
    pub source: Arc<S>,
    pub write_tx: mpsc::Sender<Sample>,
    pub samples_collected_total: Arc<AtomicU64>,
    pub samples_failed_total: Arc<AtomicU64>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub sample_interval_ms: u64,
    /// How often to log collector stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Spawns the task that owns the series. Every received sample is appended with
/// `Series::push`; when all senders are dropped the series is returned.
pub fn spawn_accumulator(
    mut write_rx: mpsc::Receiver<Sample>,
    mut series: Series,
) -> tokio::task::JoinHandle<Series> {
    tokio::spawn(async move {
        while let Some(sample) = write_rx.recv().await {
            series.push(sample);
        }
        tracing::debug!(rows = series.len(), "Accumulator shutting down");
        series
    })
}

pub fn spawn<S: SampleSource>(
    deps: WorkerDeps<S>,
    config: WorkerConfig,
) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        source,
        write_tx,
        samples_collected_total,
        samples_failed_total,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        sample_interval_ms,
        stats_log_interval_secs,
    } = config;

    let stats_log_interval = Duration::from_secs(stats_log_interval_secs);

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", sample_interval_ms);

    tokio::spawn(async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(stats_log_interval);
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let unix_nanosecond = match now_unix_nanosecond() {
                        Ok(ns) => ns,
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "get_timestamp",
                                "system time error"
                            );
                            samples_failed_total.fetch_add(1, Ordering::Relaxed);
                            continue;
                        }
                    };

                    let src = source.clone();
                    let result = tokio::task::spawn_blocking(move || src.sample(unix_nanosecond))
                        .await
                        .map_err(|e| anyhow::anyhow!("sample task join: {}", e))
                        .and_then(|r| r);
                    let sample = match result {
                        Ok(s) => s,
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "sample",
                                "sample failed"
                            );
                            samples_failed_total.fetch_add(1, Ordering::Relaxed);
                            continue;
                        }
                    };

                    if write_tx.send(sample).await.is_err() {
                        tracing::debug!("Accumulator channel closed");
                        break;
                    }
                    samples_collected_total.fetch_add(1, Ordering::Relaxed);
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        samples_collected_total = samples_collected_total.load(Ordering::Relaxed),
                        samples_failed_total = samples_failed_total.load(Ordering::Relaxed),
                        "collector stats"
                    );
                }
            }
        }
    }
    .instrument(worker_span))
}

fn now_unix_nanosecond() -> anyhow::Result<i64> {
    let d = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH)?;
    Ok(i64::try_from(d.as_nanos())?)
}
