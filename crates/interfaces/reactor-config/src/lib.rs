//! Central configuration constants for the reactor shell.

use std::time::Duration;

/// View the shell navigates to once startup completes.
pub const DEFAULT_VIEW: &str = "Overview";

/// Status line shown after a successful startup.
pub const READY_STATUS_MESSAGE: &str = "System ready";

/// Performance sampling period while the window is visible.
pub const ACTIVE_SAMPLING_INTERVAL: Duration = Duration::from_millis(100);

/// Performance sampling period while the window is minimized.
pub const MINIMIZED_SAMPLING_INTERVAL: Duration = Duration::from_secs(2);

/// Client areas narrower than this render animations at reduced quality.
pub const REDUCED_QUALITY_MAX_WIDTH: u32 = 800;

/// Client areas shorter than this render animations at reduced quality.
pub const REDUCED_QUALITY_MAX_HEIGHT: u32 = 600;

/// Capacity of the bounded view-model event channel.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Initial and minimum window size (logical pixels).
pub const INITIAL_WINDOW_SIZE: [f32; 2] = [1024.0, 720.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [640.0, 480.0];

/// Identity used to resolve per-user directories.
pub const APP_QUALIFIER: &str = "com";
pub const APP_ORG: &str = "reactor";
pub const APP_NAME: &str = "control";

/// Overrides the directory holding persisted shell state.
pub const STATE_DIR_ENV: &str = "REACTOR_STATE_DIR";

/// Stirrer RPM the setpoint editors allow.
pub const MIN_STIRRER_RPM: u32 = 0;
pub const MAX_STIRRER_RPM: u32 = 2000;

/// Editable setpoint ranges.
pub const REACTOR_TEMPERATURE_RANGE_C: std::ops::RangeInclusive<f32> = 0.0..=150.0;
pub const JACKET_TEMPERATURE_RANGE_C: std::ops::RangeInclusive<f32> = -20.0..=180.0;
pub const MAX_DOSING_ML_PER_MIN: f32 = 50.0;

/// Convenience function to clamp a stirrer value into the allowed range.
pub fn clamp_rpm(v: u32) -> u32 {
    v.clamp(MIN_STIRRER_RPM, MAX_STIRRER_RPM)
}
