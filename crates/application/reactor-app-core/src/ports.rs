use std::time::Duration;

use async_trait::async_trait;
use reactor_core::{PerformanceSample, QualityLevel, ViewDescriptor};
use tokio::sync::broadcast;

#[async_trait]
pub trait NavigationService: Send + Sync + 'static {
    async fn initialize(&self) -> anyhow::Result<()>;

    /// Resolves `view_name` and mounts it, returning what is now current.
    async fn navigate_to(
        &self,
        view_name: &str,
        parameters: Option<&serde_json::Value>,
    ) -> anyhow::Result<ViewDescriptor>;
}

#[async_trait]
pub trait AnimationEngine: Send + Sync + 'static {
    async fn initialize(&self) -> anyhow::Result<()>;
    fn set_hardware_acceleration(&self, enabled: bool);
    fn set_quality_level(&self, level: QualityLevel);
    async fn stop(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait StateManager: Send + Sync + 'static {
    async fn initialize(&self) -> anyhow::Result<()>;
    async fn load_state(&self) -> anyhow::Result<()>;
    async fn save_state(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait PerformanceMonitor: Send + Sync + 'static {
    async fn start_monitoring(&self) -> anyhow::Result<()>;
    async fn stop_monitoring(&self) -> anyhow::Result<()>;
    fn pause_monitoring(&self) -> anyhow::Result<()>;
    fn resume_monitoring(&self) -> anyhow::Result<()>;
    fn set_update_frequency(&self, period: Duration) -> anyhow::Result<()>;
    fn current_metrics(&self) -> PerformanceSample;

    /// Stream of samples as they are produced. Slow receivers may lag and
    /// miss samples; only the latest one matters.
    fn subscribe(&self) -> broadcast::Receiver<PerformanceSample>;
}
