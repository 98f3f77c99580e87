use std::time::Duration;

use reactor_core::{
    ErrorReport, LifecycleState, NavigationRequest, PerformanceSample, QualityLevel,
    StatusReport, ViewDescriptor,
};
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::app_core::ViewModelEvent;

/// Observable shell state. Owned by [`crate::ShellKernel`] and mutated only on
/// the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellViewModel {
    pub lifecycle: LifecycleState,

    pub is_loading: bool,
    pub loading_text: String,
    pub loading_progress: f32,

    pub status_message: String,
    pub system_status: String,
    pub is_online: bool,

    pub is_emergency_mode: bool,
    pub emergency_message: String,
    pub error_dialog: Option<String>,

    pub is_navigating: bool,
    pub current_view: Option<ViewDescriptor>,

    pub performance: Option<PerformanceSample>,
    pub sampling_interval: Duration,
    pub animation_quality: QualityLevel,

    pub close_permitted: bool,
}

impl Default for ShellViewModel {
    fn default() -> Self {
        Self {
            lifecycle: LifecycleState::Uninitialized,
            is_loading: true,
            loading_text: "Starting...".to_string(),
            loading_progress: 0.0,
            status_message: String::new(),
            system_status: "OFFLINE".to_string(),
            is_online: false,
            is_emergency_mode: false,
            emergency_message: String::new(),
            error_dialog: None,
            is_navigating: false,
            current_view: None,
            performance: None,
            sampling_interval: reactor_config::ACTIVE_SAMPLING_INTERVAL,
            animation_quality: QualityLevel::High,
            close_permitted: false,
        }
    }
}

impl ShellViewModel {
    pub fn current_view_name(&self) -> Option<&str> {
        self.current_view.as_ref().map(|v| v.name.as_str())
    }

    /// Whether panels should accept operator input.
    pub fn is_interactive(&self) -> bool {
        !self.is_loading && !self.is_emergency_mode && !self.lifecycle.is_shutting_down()
    }
}

/// Raises view-model events towards the orchestrator. Cheap to clone; panels
/// each hold one.
#[derive(Debug, Clone)]
pub struct ViewModelEvents {
    tx: mpsc::Sender<ViewModelEvent>,
}

impl ViewModelEvents {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ViewModelEvent>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn request_navigation(&self, request: NavigationRequest) -> bool {
        self.raise(ViewModelEvent::NavigationRequested(request))
    }

    pub fn report_error(&self, report: ErrorReport) -> bool {
        self.raise(ViewModelEvent::ErrorOccurred(report))
    }

    pub fn report_status(&self, status: StatusReport) -> bool {
        self.raise(ViewModelEvent::StatusChanged(status))
    }

    fn raise(&self, ev: ViewModelEvent) -> bool {
        match self.tx.try_send(ev) {
            Ok(()) => true,
            Err(TrySendError::Full(ev)) => {
                tracing::warn!(?ev, "view-model event queue is full; dropping event");
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!("view-model events are no longer subscribed");
                false
            }
        }
    }
}
