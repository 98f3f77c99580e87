use std::sync::Arc;

use crate::ports::{AnimationEngine, NavigationService, PerformanceMonitor, StateManager};

/// The four services a shell window runs on, resolved once by the host and
/// handed to the orchestrator at construction.
#[derive(Clone)]
pub struct ServiceContext {
    pub navigation: Arc<dyn NavigationService>,
    pub animation: Arc<dyn AnimationEngine>,
    pub state: Arc<dyn StateManager>,
    pub performance: Arc<dyn PerformanceMonitor>,
}

impl ServiceContext {
    pub fn new(
        navigation: Arc<dyn NavigationService>,
        animation: Arc<dyn AnimationEngine>,
        state: Arc<dyn StateManager>,
        performance: Arc<dyn PerformanceMonitor>,
    ) -> Self {
        Self {
            navigation,
            animation,
            state,
            performance,
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}
