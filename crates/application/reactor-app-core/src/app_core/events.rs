use std::time::Duration;

use reactor_core::{
    InitializationStep, LifecycleState, PerformanceSample, QualityLevel, StatusReport,
    ViewDescriptor,
};

/// Mutations marshaled onto the UI thread. Everything the shell shows changes
/// through one of these.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    // Lifecycle
    LifecycleChanged(LifecycleState),

    // Startup
    LoadingProgress(InitializationStep),
    StartupCompleted {
        status_message: String,
    },
    StartupFailed {
        message: String,
    },

    // Navigation
    NavigationStarted {
        view_name: String,
    },
    NavigationCompleted(ViewDescriptor),
    NavigationAborted,

    // Status and errors
    StatusUpdated(StatusReport),
    StatusMessage(String),
    ConnectionLost {
        message: String,
    },
    EmergencyActivated {
        message: String,
    },

    // Performance and throttling
    PerformanceUpdated(PerformanceSample),
    SamplingIntervalChanged(Duration),
    AnimationQualityChanged(QualityLevel),

    // Shutdown
    CloseAllowed,
}
