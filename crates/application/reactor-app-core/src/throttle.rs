use std::time::Duration;

use reactor_core::{QualityLevel, WindowState};

/// Maps window geometry to sampling period and animation quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    pub active_interval: Duration,
    pub minimized_interval: Duration,
    /// Widths strictly below this get `reduced_quality`.
    pub min_full_quality_width: u32,
    /// Heights strictly below this get `reduced_quality`.
    pub min_full_quality_height: u32,
    pub reduced_quality: QualityLevel,
    pub full_quality: QualityLevel,
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self {
            active_interval: reactor_config::ACTIVE_SAMPLING_INTERVAL,
            minimized_interval: reactor_config::MINIMIZED_SAMPLING_INTERVAL,
            min_full_quality_width: reactor_config::REDUCED_QUALITY_MAX_WIDTH,
            min_full_quality_height: reactor_config::REDUCED_QUALITY_MAX_HEIGHT,
            reduced_quality: QualityLevel::Medium,
            full_quality: QualityLevel::High,
        }
    }
}

impl ThrottlePolicy {
    pub fn sampling_interval(&self, state: WindowState) -> Duration {
        match state {
            WindowState::Minimized => self.minimized_interval,
            WindowState::Normal | WindowState::Maximized => self.active_interval,
        }
    }

    pub fn quality_for(&self, width: u32, height: u32) -> QualityLevel {
        if width < self.min_full_quality_width || height < self.min_full_quality_height {
            self.reduced_quality
        } else {
            self.full_quality
        }
    }
}
