#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reactor_app_core::{
    AnimationEngine, LifecycleOrchestrator, NavigationService, PerformanceMonitor,
    ServiceContext, ShellConfig, ShellKernel, ShellViewModel, StateManager,
};
use reactor_core::{PerformanceSample, QualityLevel, ViewDescriptor};
use tokio::sync::broadcast;

/// One object standing in for all four services, recording every call.
pub struct FakeServices {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, String>>,
    navigation_delay: Mutex<Option<Duration>>,
    delays: Mutex<HashMap<String, Duration>>,
    last_parameters: Mutex<Option<serde_json::Value>>,
    in_flight_navigations: AtomicUsize,
    max_in_flight_navigations: AtomicUsize,
    samples: broadcast::Sender<PerformanceSample>,
    quality: Mutex<Option<QualityLevel>>,
    frequency: Mutex<Option<Duration>>,
}

impl FakeServices {
    pub fn new() -> Arc<Self> {
        let (samples, _) = broadcast::channel(16);
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
            navigation_delay: Mutex::new(None),
            delays: Mutex::new(HashMap::new()),
            last_parameters: Mutex::new(None),
            in_flight_navigations: AtomicUsize::new(0),
            max_in_flight_navigations: AtomicUsize::new(0),
            samples,
            quality: Mutex::new(None),
            frequency: Mutex::new(None),
        })
    }

    /// Makes every later call to `op` fail with `message`.
    pub fn fail(self: &Arc<Self>, op: &str, message: &str) -> Arc<Self> {
        self.failures
            .lock()
            .unwrap()
            .insert(op.to_string(), message.to_string());
        self.clone()
    }

    pub fn delay_navigation(self: &Arc<Self>, delay: Duration) -> Arc<Self> {
        *self.navigation_delay.lock().unwrap() = Some(delay);
        self.clone()
    }

    /// Makes `op` sleep for `delay` before it records itself.
    pub fn delay(self: &Arc<Self>, op: &str, delay: Duration) -> Arc<Self> {
        self.delays.lock().unwrap().insert(op.to_string(), delay);
        self.clone()
    }

    pub fn last_parameters(&self) -> Option<serde_json::Value> {
        self.last_parameters.lock().unwrap().clone()
    }

    pub fn context(self: &Arc<Self>) -> ServiceContext {
        ServiceContext::new(self.clone(), self.clone(), self.clone(), self.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == entry).count()
    }

    pub fn position(&self, entry: &str) -> Option<usize> {
        self.calls().iter().position(|c| c.as_str() == entry)
    }

    pub fn max_concurrent_navigations(&self) -> usize {
        self.max_in_flight_navigations.load(Ordering::SeqCst)
    }

    pub fn quality(&self) -> Option<QualityLevel> {
        *self.quality.lock().unwrap()
    }

    pub fn frequency(&self) -> Option<Duration> {
        *self.frequency.lock().unwrap()
    }

    pub fn emit(&self, sample: PerformanceSample) {
        let _ = self.samples.send(sample);
    }

    fn call(&self, op: &str, entry: String) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(entry);
        match self.failures.lock().unwrap().get(op) {
            Some(message) => Err(anyhow::anyhow!(message.clone())),
            None => Ok(()),
        }
    }

    fn record(&self, op: &str) -> anyhow::Result<()> {
        self.call(op, op.to_string())
    }

    async fn pause(&self, op: &str) {
        let delay = self.delays.lock().unwrap().get(op).copied();
        match delay {
            Some(d) => tokio::time::sleep(d).await,
            None => tokio::task::yield_now().await,
        }
    }
}

#[async_trait]
impl NavigationService for FakeServices {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.pause("navigation.initialize").await;
        self.record("navigation.initialize")
    }

    async fn navigate_to(
        &self,
        view_name: &str,
        parameters: Option<&serde_json::Value>,
    ) -> anyhow::Result<ViewDescriptor> {
        *self.last_parameters.lock().unwrap() = parameters.cloned();
        let now = self.in_flight_navigations.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_navigations.fetch_max(now, Ordering::SeqCst);

        let delay = *self.navigation_delay.lock().unwrap();
        match delay {
            Some(d) => tokio::time::sleep(d).await,
            None => tokio::task::yield_now().await,
        }

        self.in_flight_navigations.fetch_sub(1, Ordering::SeqCst);
        self.call(
            "navigation.navigate_to",
            format!("navigation.navigate_to:{view_name}"),
        )?;
        Ok(ViewDescriptor::new(view_name, view_name.to_uppercase()))
    }
}

#[async_trait]
impl AnimationEngine for FakeServices {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.pause("animation.initialize").await;
        self.record("animation.initialize")
    }

    fn set_hardware_acceleration(&self, enabled: bool) {
        let _ = self.call(
            "animation.set_hardware_acceleration",
            format!("animation.set_hardware_acceleration:{enabled}"),
        );
    }

    fn set_quality_level(&self, level: QualityLevel) {
        *self.quality.lock().unwrap() = Some(level);
        let _ = self.call(
            "animation.set_quality_level",
            format!("animation.set_quality_level:{level:?}"),
        );
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.pause("animation.stop").await;
        self.record("animation.stop")
    }
}

#[async_trait]
impl StateManager for FakeServices {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.pause("state.initialize").await;
        self.record("state.initialize")
    }

    async fn load_state(&self) -> anyhow::Result<()> {
        self.pause("state.load_state").await;
        self.record("state.load_state")
    }

    async fn save_state(&self) -> anyhow::Result<()> {
        self.pause("state.save_state").await;
        self.record("state.save_state")
    }
}

#[async_trait]
impl PerformanceMonitor for FakeServices {
    async fn start_monitoring(&self) -> anyhow::Result<()> {
        self.pause("performance.start_monitoring").await;
        self.record("performance.start_monitoring")
    }

    async fn stop_monitoring(&self) -> anyhow::Result<()> {
        self.pause("performance.stop_monitoring").await;
        self.record("performance.stop_monitoring")
    }

    fn pause_monitoring(&self) -> anyhow::Result<()> {
        self.record("performance.pause_monitoring")
    }

    fn resume_monitoring(&self) -> anyhow::Result<()> {
        self.record("performance.resume_monitoring")
    }

    fn set_update_frequency(&self, period: Duration) -> anyhow::Result<()> {
        self.call(
            "performance.set_update_frequency",
            format!("performance.set_update_frequency:{}ms", period.as_millis()),
        )?;
        *self.frequency.lock().unwrap() = Some(period);
        Ok(())
    }

    fn current_metrics(&self) -> PerformanceSample {
        PerformanceSample::now(60.0, 128.0)
    }

    fn subscribe(&self) -> broadcast::Receiver<PerformanceSample> {
        self.samples.subscribe()
    }
}

pub struct Harness {
    pub kernel: ShellKernel,
    pub services: Arc<FakeServices>,
    pub orchestrator: Arc<LifecycleOrchestrator>,
}

impl Harness {
    /// Must be called from inside a tokio runtime.
    pub fn new(services: Arc<FakeServices>) -> Self {
        let (kernel, requests) = ShellKernel::new();
        let orchestrator = LifecycleOrchestrator::new(
            services.context(),
            kernel.ui_handle(),
            requests,
            ShellConfig::default(),
            tokio::runtime::Handle::current(),
        );
        Self {
            kernel,
            services,
            orchestrator,
        }
    }

    pub fn vm(&self) -> &ShellViewModel {
        self.kernel.view_model()
    }

    /// Ticks the UI kernel until `pred` holds or two seconds pass.
    pub async fn settle_until(&mut self, pred: impl Fn(&ShellViewModel) -> bool) -> bool {
        for _ in 0..200 {
            self.kernel.tick();
            if pred(self.kernel.view_model()) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Lets spawned tasks run for a moment, then applies what they posted.
    pub async fn drain(&mut self) {
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.kernel.tick();
    }
}
