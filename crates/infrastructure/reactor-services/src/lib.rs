//! In-process implementations of the shell's four services.

mod animation;
mod error;
mod navigation;
mod performance;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

pub use animation::ShellAnimationEngine;
pub use error::*;
pub use navigation::{ViewRegistry, REACTOR_VIEWS};
pub use performance::SamplingPerformanceMonitor;
pub use state::{resolve_state_dir, FileStateManager, PersistedState, STATE_FILE_NAME};

use reactor_app_core::ServiceContext;

/// Concrete services kept alongside the type-erased context so the UI can
/// reach the parts that are not on the ports (frame counting, setpoints).
#[derive(Clone)]
pub struct DefaultServices {
    pub navigation: Arc<ViewRegistry>,
    pub animation: Arc<ShellAnimationEngine>,
    pub state: Arc<FileStateManager>,
    pub performance: Arc<SamplingPerformanceMonitor>,
}

impl DefaultServices {
    pub fn new(state_dir: PathBuf) -> Self {
        Self {
            navigation: Arc::new(ViewRegistry::reactor_views()),
            animation: Arc::new(ShellAnimationEngine::new()),
            state: Arc::new(FileStateManager::new(state_dir)),
            performance: Arc::new(SamplingPerformanceMonitor::new(
                reactor_config::ACTIVE_SAMPLING_INTERVAL,
            )),
        }
    }

    pub fn context(&self) -> ServiceContext {
        ServiceContext::new(
            self.navigation.clone(),
            self.animation.clone(),
            self.state.clone(),
            self.performance.clone(),
        )
    }
}
