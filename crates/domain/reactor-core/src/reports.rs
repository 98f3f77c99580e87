use serde::{Deserialize, Serialize};

/// Raised by the view-model when the user asks for another panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
    pub view_name: String,
    pub parameters: Option<serde_json::Value>,
}

impl NavigationRequest {
    pub fn new(view_name: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Navigation,
    DataSave,
    SerialCommunication,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub kind: ErrorKind,
    pub cause: Option<String>,
}

impl ErrorReport {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub message: String,
    pub system_status: String,
    pub is_online: bool,
}

impl StatusReport {
    pub fn new(message: impl Into<String>, system_status: impl Into<String>, is_online: bool) -> Self {
        Self {
            message: message.into(),
            system_status: system_status.into(),
            is_online,
        }
    }
}
