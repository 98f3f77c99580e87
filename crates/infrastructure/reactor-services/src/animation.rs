use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reactor_app_core::AnimationEngine;
use reactor_core::QualityLevel;

/// Holds the rendering knobs the UI reads each frame to gate its effects.
pub struct ShellAnimationEngine {
    running: AtomicBool,
    hardware_acceleration: AtomicBool,
    quality: Mutex<QualityLevel>,
}

impl Default for ShellAnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellAnimationEngine {
    pub fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
            hardware_acceleration: AtomicBool::new(false),
            quality: Mutex::new(QualityLevel::High),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn hardware_acceleration(&self) -> bool {
        self.hardware_acceleration.load(Ordering::SeqCst)
    }

    pub fn quality(&self) -> QualityLevel {
        *self.quality.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Whether animated effects (spinners, pulsing indicators) should draw.
    pub fn effects_enabled(&self) -> bool {
        self.is_running() && self.quality() > QualityLevel::Low
    }
}

#[async_trait]
impl AnimationEngine for ShellAnimationEngine {
    async fn initialize(&self) -> anyhow::Result<()> {
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn set_hardware_acceleration(&self, enabled: bool) {
        self.hardware_acceleration.store(enabled, Ordering::SeqCst);
        tracing::debug!(enabled, "hardware acceleration");
    }

    fn set_quality_level(&self, level: QualityLevel) {
        let mut quality = self.quality.lock().unwrap_or_else(|p| p.into_inner());
        if *quality != level {
            tracing::debug!(?level, "animation quality changed");
            *quality = level;
        }
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }
}
