use serde::{Deserialize, Serialize};

pub mod lifecycle;
pub mod reports;
pub mod window;

pub use lifecycle::{InitializationStep, LifecycleState};
pub use reports::{ErrorKind, ErrorReport, NavigationRequest, StatusReport};
pub use window::{QualityLevel, WindowGeometry, WindowState};

pub type ViewName = String;

/// Metadata for the view currently mounted in the shell's content area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewDescriptor {
    pub name: ViewName,
    pub title: String,
}

impl ViewDescriptor {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
        }
    }
}

/// One delivery from the performance monitor. Overwritten on every update.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PerformanceSample {
    pub frames_per_second: f64,
    pub memory_usage_mb: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl PerformanceSample {
    pub fn now(frames_per_second: f64, memory_usage_mb: f64) -> Self {
        Self {
            frames_per_second,
            memory_usage_mb,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Operator-entered reactor targets. Display and persistence only; nothing here
/// talks to hardware.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReactorSetpoints {
    pub temperature_c: f32,
    pub stirrer_rpm: u32,
    pub dosing_ml_per_min: f32,
    pub jacket_temperature_c: f32,
}

impl Default for ReactorSetpoints {
    fn default() -> Self {
        Self {
            temperature_c: 25.0,
            stirrer_rpm: 200,
            dosing_ml_per_min: 0.0,
            jacket_temperature_c: 20.0,
        }
    }
}
