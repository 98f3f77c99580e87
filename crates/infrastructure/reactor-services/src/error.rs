#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("unknown view '{0}'")]
    UnknownView(String),
    #[error("{0} has not been initialized")]
    NotInitialized(&'static str),
    #[error("{0} is not running")]
    NotRunning(&'static str),
    #[error("invalid sampling period: {0:?}")]
    InvalidPeriod(std::time::Duration),
    #[error("could not determine a directory for shell state")]
    NoStateDir,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceErrorKind {
    UnknownView,
    NotReady,
    InvalidInput,
    Config,
    Io,
    Codec,
}

impl ServiceError {
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            ServiceError::UnknownView(_) => ServiceErrorKind::UnknownView,
            ServiceError::NotInitialized(_) | ServiceError::NotRunning(_) => {
                ServiceErrorKind::NotReady
            }
            ServiceError::InvalidPeriod(_) => ServiceErrorKind::InvalidInput,
            ServiceError::NoStateDir => ServiceErrorKind::Config,
            ServiceError::Io(_) => ServiceErrorKind::Io,
            ServiceError::Serde(_) => ServiceErrorKind::Codec,
        }
    }
}
