pub mod app_core;
pub mod async_runtime;
pub mod context;
pub mod kernel;
pub mod orchestrator;
pub mod ports;
mod router;
pub mod throttle;
pub mod viewmodel;

pub use app_core::*;
pub use context::ServiceContext;
pub use kernel::{ShellKernel, UiHandle};
pub use orchestrator::{
    CloseDecision, LifecycleOrchestrator, ShellConfig, ShutdownOutcome, StartupOutcome,
};
pub use ports::*;
pub use router::Subscription;
pub use throttle::ThrottlePolicy;
pub use viewmodel::*;
