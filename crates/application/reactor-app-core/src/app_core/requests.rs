use reactor_core::{ErrorReport, NavigationRequest, StatusReport};

/// Raised by the view-model, consumed by the orchestrator's router.
#[derive(Debug, Clone)]
pub enum ViewModelEvent {
    NavigationRequested(NavigationRequest),
    ErrorOccurred(ErrorReport),
    StatusChanged(StatusReport),
}
