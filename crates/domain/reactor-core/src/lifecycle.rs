use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifecycleState {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    Navigating,
    Saving,
    Stopping,
    Closed,
    EmergencyMode,
}

impl LifecycleState {
    pub fn label(self) -> &'static str {
        match self {
            LifecycleState::Uninitialized => "UNINITIALIZED",
            LifecycleState::Initializing => "INITIALIZING",
            LifecycleState::Ready => "READY",
            LifecycleState::Navigating => "NAVIGATING",
            LifecycleState::Saving => "SAVING",
            LifecycleState::Stopping => "STOPPING",
            LifecycleState::Closed => "CLOSED",
            LifecycleState::EmergencyMode => "EMERGENCY",
        }
    }

    /// States entered by the shutdown protocol. Nothing moves out of them
    /// except forward through the protocol.
    pub fn is_shutting_down(self) -> bool {
        matches!(
            self,
            LifecycleState::Saving | LifecycleState::Stopping | LifecycleState::Closed
        )
    }
}

/// Transient progress record produced while the startup sequence runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializationStep {
    /// 1-based position of the step.
    pub index: usize,
    pub total: usize,
    pub label: String,
}

impl InitializationStep {
    pub fn new(index: usize, total: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            total,
            label: label.into(),
        }
    }

    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.index as f32 / self.total as f32) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_percent_is_fraction_of_total() {
        assert_eq!(InitializationStep::new(1, 4, "a").percent(), 25.0);
        assert_eq!(InitializationStep::new(4, 4, "b").percent(), 100.0);
        assert_eq!(InitializationStep::new(0, 0, "c").percent(), 0.0);
    }
}
