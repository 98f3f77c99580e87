use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reactor_app_core::PerformanceMonitor;
use reactor_core::PerformanceSample;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::ServiceError;

const SAMPLE_CHANNEL_CAPACITY: usize = 16;

struct Shared {
    frames: AtomicU64,
    paused: AtomicBool,
    latest: Mutex<PerformanceSample>,
    samples: broadcast::Sender<PerformanceSample>,
    period: watch::Sender<Duration>,
}

struct Sampler {
    token: CancellationToken,
    task: JoinHandle<()>,
}

/// Samples frame rate (from frames the host reports) and resident memory on
/// a tokio interval.
pub struct SamplingPerformanceMonitor {
    shared: Arc<Shared>,
    sampler: Mutex<Option<Sampler>>,
}

impl SamplingPerformanceMonitor {
    pub fn new(period: Duration) -> Self {
        let (samples, _) = broadcast::channel(SAMPLE_CHANNEL_CAPACITY);
        let (period, _) = watch::channel(period);
        Self {
            shared: Arc::new(Shared {
                frames: AtomicU64::new(0),
                paused: AtomicBool::new(false),
                latest: Mutex::new(PerformanceSample::now(0.0, 0.0)),
                samples,
                period,
            }),
            sampler: Mutex::new(None),
        }
    }

    /// Called by the host once per rendered frame.
    pub fn record_frame(&self) {
        self.shared.frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.sampler
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .is_some_and(|s| !s.task.is_finished())
    }

    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::SeqCst)
    }

    pub fn update_frequency(&self) -> Duration {
        *self.shared.period.borrow()
    }

    fn require_running(&self) -> Result<(), ServiceError> {
        if self.is_running() {
            Ok(())
        } else {
            Err(ServiceError::NotRunning("performance monitor"))
        }
    }
}

#[async_trait]
impl PerformanceMonitor for SamplingPerformanceMonitor {
    async fn start_monitoring(&self) -> anyhow::Result<()> {
        let mut sampler = self.sampler.lock().unwrap_or_else(|p| p.into_inner());
        if sampler.as_ref().is_some_and(|s| !s.task.is_finished()) {
            return Ok(());
        }

        let token = CancellationToken::new();
        let task = tokio::spawn(run_sampler(self.shared.clone(), token.clone()));
        *sampler = Some(Sampler { token, task });
        tracing::debug!(period = ?self.update_frequency(), "performance sampling started");
        Ok(())
    }

    async fn stop_monitoring(&self) -> anyhow::Result<()> {
        let sampler = self
            .sampler
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take();
        let Some(sampler) = sampler else {
            tracing::debug!("performance monitor was not running");
            return Ok(());
        };

        sampler.token.cancel();
        if let Err(e) = sampler.task.await {
            anyhow::bail!("performance sampler ended abnormally: {e}");
        }
        Ok(())
    }

    fn pause_monitoring(&self) -> anyhow::Result<()> {
        self.require_running()?;
        self.shared.paused.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn resume_monitoring(&self) -> anyhow::Result<()> {
        self.require_running()?;
        self.shared.paused.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn set_update_frequency(&self, period: Duration) -> anyhow::Result<()> {
        if period.is_zero() {
            return Err(ServiceError::InvalidPeriod(period).into());
        }
        self.shared.period.send_replace(period);
        Ok(())
    }

    fn current_metrics(&self) -> PerformanceSample {
        *self.shared.latest.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn subscribe(&self) -> broadcast::Receiver<PerformanceSample> {
        self.shared.samples.subscribe()
    }
}

async fn run_sampler(shared: Arc<Shared>, token: CancellationToken) {
    let mut period_rx = shared.period.subscribe();
    let mut ticker = interval(*period_rx.borrow_and_update());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            changed = period_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let period = *period_rx.borrow_and_update();
                ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // The fresh interval ticks immediately; skip that one.
                ticker.reset();
            }
            _ = ticker.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                let frames = shared.frames.swap(0, Ordering::Relaxed);
                if shared.paused.load(Ordering::SeqCst) {
                    continue;
                }

                let fps = frames as f64 / elapsed.as_secs_f64().max(1e-3);
                let sample = PerformanceSample::now(fps, memory_usage_mb());
                *shared.latest.lock().unwrap_or_else(|p| p.into_inner()) = sample;
                let _ = shared.samples.send(sample);
            }
        }
    }
}

/// Resident set size of this process, from `/proc/self/status`.
#[cfg(target_os = "linux")]
fn memory_usage_mb() -> f64 {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|status| resident_mb(&status))
        .unwrap_or(0.0)
}

#[cfg(not(target_os = "linux"))]
fn memory_usage_mb() -> f64 {
    0.0
}

/// Reads the `VmRSS` line, which the kernel reports in kB regardless of page size.
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn resident_mb(status: &str) -> Option<f64> {
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb = line.split_whitespace().nth(1)?.parse::<u64>().ok()?;
    Some(kb as f64 / 1024.0)
}
