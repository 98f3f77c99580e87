use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    #[default]
    Normal,
    Maximized,
    Minimized,
}

/// Read-only snapshot of the host window. The shell never writes this back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowGeometry {
    pub state: WindowState,
    pub width: u32,
    pub height: u32,
}

impl WindowGeometry {
    pub fn new(state: WindowState, width: u32, height: u32) -> Self {
        Self {
            state,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum QualityLevel {
    Low,
    Medium,
    #[default]
    High,
}

impl QualityLevel {
    pub fn label(self) -> &'static str {
        match self {
            QualityLevel::Low => "LOW",
            QualityLevel::Medium => "MEDIUM",
            QualityLevel::High => "HIGH",
        }
    }
}
