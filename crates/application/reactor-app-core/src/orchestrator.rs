use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use futures::FutureExt;
use reactor_core::{
    ErrorKind, ErrorReport, InitializationStep, LifecycleState, NavigationRequest,
    PerformanceSample, ViewDescriptor, WindowGeometry, WindowState,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::app_core::{ShellEvent, ViewModelEvent};
use crate::context::ServiceContext;
use crate::kernel::UiHandle;
use crate::router::Subscription;
use crate::throttle::ThrottlePolicy;

const STARTUP_STEPS: usize = 4;

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub default_view: String,
    pub ready_message: String,
    pub hardware_acceleration: bool,
    pub throttle: ThrottlePolicy,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_view: reactor_config::DEFAULT_VIEW.to_string(),
            ready_message: reactor_config::READY_STATUS_MESSAGE.to_string(),
            hardware_acceleration: true,
            throttle: ThrottlePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    Completed,
    AlreadyInitialized,
    /// A close request arrived first; the remaining steps were skipped.
    Interrupted,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// The protocol ran to the end and the window may close. `saved` is false
    /// when the state could not be written.
    Closed { saved: bool },
    AlreadyClosing,
    AlreadyClosed,
}

/// What the host should do with a native close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    Allow,
    Cancel,
}

/// Owns one window's startup sequence, shutdown protocol, event fan-in and
/// geometry-driven throttling.
pub struct LifecycleOrchestrator {
    services: ServiceContext,
    ui: UiHandle,
    config: ShellConfig,
    runtime: Handle,

    state: Mutex<LifecycleState>,
    is_initialized: AtomicBool,
    is_closing: AtomicBool,
    close_permitted: AtomicBool,
    state_loaded: AtomicBool,

    /// Held for the whole startup sequence; shutdown waits on it before saving.
    startup_gate: tokio::sync::Mutex<()>,
    navigation_gate: tokio::sync::Mutex<()>,
    geometry: Mutex<Option<WindowGeometry>>,
    subscription: Mutex<Option<Subscription>>,
}

impl LifecycleOrchestrator {
    /// Builds the orchestrator and registers its handlers for view-model
    /// events and performance samples on `runtime`.
    pub fn new(
        services: ServiceContext,
        ui: UiHandle,
        requests: mpsc::Receiver<ViewModelEvent>,
        config: ShellConfig,
        runtime: Handle,
    ) -> Arc<Self> {
        let samples = services.performance.subscribe();
        let orchestrator = Arc::new(Self {
            services,
            ui,
            config,
            runtime: runtime.clone(),
            state: Mutex::new(LifecycleState::Uninitialized),
            is_initialized: AtomicBool::new(false),
            is_closing: AtomicBool::new(false),
            close_permitted: AtomicBool::new(false),
            state_loaded: AtomicBool::new(false),
            startup_gate: tokio::sync::Mutex::new(()),
            navigation_gate: tokio::sync::Mutex::new(()),
            geometry: Mutex::new(None),
            subscription: Mutex::new(None),
        });

        let subscription =
            Subscription::spawn(Arc::downgrade(&orchestrator), requests, samples, &runtime);
        *lock(&orchestrator.subscription) = Some(subscription);
        orchestrator
    }

    pub fn state(&self) -> LifecycleState {
        *lock(&self.state)
    }

    pub fn is_subscribed(&self) -> bool {
        lock(&self.subscription)
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn is_closing(&self) -> bool {
        self.is_closing.load(Ordering::SeqCst)
    }

    // --- Startup ---

    /// Brings the services online in order. Repeat calls are no-ops.
    pub async fn run_startup(&self) -> StartupOutcome {
        if self.is_initialized.swap(true, Ordering::SeqCst) {
            tracing::debug!("startup already ran; ignoring repeated shown notification");
            return StartupOutcome::AlreadyInitialized;
        }

        let _startup = self.startup_gate.lock().await;
        if self.close_started() {
            tracing::info!("window is closing; skipping startup");
            return StartupOutcome::Interrupted;
        }

        tracing::info!("starting shell services");
        self.set_state(LifecycleState::Initializing);

        match self.startup_sequence().await {
            Ok(()) => {
                tracing::info!("shell ready");
                StartupOutcome::Completed
            }
            Err(StartupError::Interrupted) => {
                tracing::info!("close requested during startup; remaining steps skipped");
                StartupOutcome::Interrupted
            }
            Err(StartupError::Failed(e)) => {
                let message = format!("{e:#}");
                tracing::error!(error = %message, "startup failed");
                // Services that already started stay up; the close protocol
                // stops them.
                self.transition_if(LifecycleState::Initializing, LifecycleState::EmergencyMode);
                self.ui.post(ShellEvent::StartupFailed {
                    message: message.clone(),
                });
                StartupOutcome::Failed(message)
            }
        }
    }

    fn close_started(&self) -> bool {
        self.is_closing.load(Ordering::SeqCst) || self.close_permitted.load(Ordering::SeqCst)
    }

    fn checkpoint(&self) -> Result<(), StartupError> {
        if self.close_started() {
            Err(StartupError::Interrupted)
        } else {
            Ok(())
        }
    }

    /// Spawns [`Self::run_startup`] for hosts that cannot await.
    pub fn start(self: &Arc<Self>) {
        let this = self.clone();
        self.runtime.spawn(async move {
            this.run_startup().await;
        });
    }

    async fn startup_sequence(&self) -> Result<(), StartupError> {
        let services = &self.services;

        self.checkpoint()?;
        self.report_step(1, "Initializing navigation...");
        services
            .navigation
            .initialize()
            .await
            .context("navigation service failed to initialize")?;

        self.checkpoint()?;
        self.report_step(2, "Starting animation engine...");
        services
            .animation
            .initialize()
            .await
            .context("animation engine failed to initialize")?;
        services
            .animation
            .set_hardware_acceleration(self.config.hardware_acceleration);

        self.checkpoint()?;
        self.report_step(3, "Loading saved state...");
        services
            .state
            .initialize()
            .await
            .context("state manager failed to initialize")?;
        services
            .state
            .load_state()
            .await
            .context("failed to load saved state")?;
        self.state_loaded.store(true, Ordering::SeqCst);

        self.checkpoint()?;
        self.report_step(4, "Starting performance monitor...");
        services
            .performance
            .start_monitoring()
            .await
            .context("performance monitor failed to start")?;

        self.checkpoint()?;
        let default_view = self.config.default_view.clone();
        if let Err(e) = self.navigate(NavigationRequest::new(default_view)).await {
            tracing::warn!(error = %e, "default view unavailable after startup");
        }

        self.ui.post(ShellEvent::StartupCompleted {
            status_message: self.config.ready_message.clone(),
        });
        self.transition_if(LifecycleState::Initializing, LifecycleState::Ready);
        Ok(())
    }

    fn report_step(&self, index: usize, label: &str) {
        tracing::debug!(step = index, total = STARTUP_STEPS, "{label}");
        self.ui.post(ShellEvent::LoadingProgress(InitializationStep::new(
            index,
            STARTUP_STEPS,
            label,
        )));
    }

    // --- Shutdown ---

    /// Host hook for a native close request. Returns `Cancel` until the state
    /// has been saved and services stopped; the shell then posts
    /// [`ShellEvent::CloseAllowed`] and the next request gets `Allow`.
    pub fn on_close_requested(self: &Arc<Self>) -> CloseDecision {
        if self.close_permitted.load(Ordering::SeqCst) {
            return CloseDecision::Allow;
        }
        if self.is_closing.load(Ordering::SeqCst) {
            tracing::debug!("close already in progress");
            return CloseDecision::Cancel;
        }

        let this = self.clone();
        self.runtime.spawn(async move {
            this.shutdown().await;
        });
        CloseDecision::Cancel
    }

    /// Saves state, stops services and releases every subscription. Always
    /// ends with the close permitted.
    pub async fn shutdown(&self) -> ShutdownOutcome {
        if self.is_closing.swap(true, Ordering::SeqCst) {
            tracing::debug!("shutdown already in progress; ignoring");
            return ShutdownOutcome::AlreadyClosing;
        }
        if self.close_permitted.load(Ordering::SeqCst) {
            self.is_closing.store(false, Ordering::SeqCst);
            return ShutdownOutcome::AlreadyClosed;
        }

        // An in-flight startup stops at its next step once `is_closing` is set.
        let startup = self.startup_gate.lock().await;
        tracing::info!("close intercepted; saving before exit");
        let saved = match AssertUnwindSafe(self.save_and_stop()).catch_unwind().await {
            Ok(saved) => saved,
            Err(_) => {
                tracing::error!("shutdown protocol panicked; allowing close anyway");
                false
            }
        };

        drop(startup);

        self.release_and_permit_close();
        ShutdownOutcome::Closed { saved }
    }

    async fn save_and_stop(&self) -> bool {
        self.set_state(LifecycleState::Saving);
        self.ui
            .post(ShellEvent::StatusMessage("Saving application state...".into()));

        let saved = if !self.state_loaded.load(Ordering::SeqCst) {
            tracing::warn!("saved state was never loaded; skipping save");
            false
        } else {
            self.save_state().await
        };

        self.set_state(LifecycleState::Stopping);
        if let Err(e) = self.services.performance.stop_monitoring().await {
            tracing::warn!(error = %format!("{e:#}"), "failed to stop performance monitor");
        }
        if let Err(e) = self.services.animation.stop().await {
            tracing::warn!(error = %format!("{e:#}"), "failed to stop animation engine");
        }

        saved
    }

    async fn save_state(&self) -> bool {
        match self.services.state.save_state().await {
            Ok(()) => {
                tracing::info!("application state saved");
                true
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to save state during shutdown");
                self.handle_error(
                    ErrorReport::new(ErrorKind::DataSave, format!("Failed to save state: {e}"))
                        .with_cause(format!("{e:#}")),
                );
                false
            }
        }
    }

    fn release_and_permit_close(&self) {
        drop(lock(&self.subscription).take());
        // Permit first so a shutdown racing past `is_closing` sees it.
        self.close_permitted.store(true, Ordering::SeqCst);
        self.is_closing.store(false, Ordering::SeqCst);
        self.set_state(LifecycleState::Closed);
        self.ui.post(ShellEvent::CloseAllowed);
        tracing::info!("shutdown complete; close permitted");
    }

    // --- Navigation ---

    pub async fn navigate_to_view(&self, view_name: &str) -> anyhow::Result<ViewDescriptor> {
        self.navigate(NavigationRequest::new(view_name)).await
    }

    async fn navigate(&self, request: NavigationRequest) -> anyhow::Result<ViewDescriptor> {
        // Requests wait for the one in flight and then run in turn.
        let _gate = self.navigation_gate.lock().await;

        self.ui.post(ShellEvent::NavigationStarted {
            view_name: request.view_name.clone(),
        });
        self.transition_if(LifecycleState::Ready, LifecycleState::Navigating);

        let result = self
            .services
            .navigation
            .navigate_to(&request.view_name, request.parameters.as_ref())
            .await;

        self.transition_if(LifecycleState::Navigating, LifecycleState::Ready);

        match result {
            Ok(view) => {
                tracing::info!(view = %view.name, "navigated");
                self.ui.post(ShellEvent::NavigationCompleted(view.clone()));
                Ok(view)
            }
            Err(e) => {
                tracing::error!(view = %request.view_name, error = %format!("{e:#}"), "navigation failed");
                self.ui.post(ShellEvent::NavigationAborted);
                self.handle_error(
                    ErrorReport::new(
                        ErrorKind::Navigation,
                        format!("Could not open {}: {e}", request.view_name),
                    )
                    .with_cause(format!("{e:#}")),
                );
                Err(e)
            }
        }
    }

    // --- Event routing ---

    pub(crate) fn dispatch(self: &Arc<Self>, ev: ViewModelEvent) {
        match ev {
            ViewModelEvent::NavigationRequested(request) => {
                let this = self.clone();
                self.runtime.spawn(async move {
                    let _ = this.navigate(request).await;
                });
            }
            ViewModelEvent::ErrorOccurred(report) => self.handle_error(report),
            ViewModelEvent::StatusChanged(status) => self.ui.post(ShellEvent::StatusUpdated(status)),
        }
    }

    pub(crate) fn on_performance_updated(&self, sample: PerformanceSample) {
        self.ui.post(ShellEvent::PerformanceUpdated(sample));
    }

    pub fn handle_error(&self, report: ErrorReport) {
        match report.kind {
            ErrorKind::Navigation => self.on_navigation_error(&report),
            ErrorKind::DataSave => self.on_data_save_error(&report),
            ErrorKind::SerialCommunication => self.on_serial_error(&report),
            ErrorKind::Critical => self.on_critical_error(&report),
        }
    }

    fn on_navigation_error(&self, report: &ErrorReport) {
        tracing::warn!(cause = ?report.cause, "{}", report.message);
        self.ui.post(ShellEvent::StatusMessage(format!(
            "Navigation error: {}",
            report.message
        )));
    }

    fn on_data_save_error(&self, report: &ErrorReport) {
        tracing::error!(cause = ?report.cause, "{}", report.message);
        self.ui.post(ShellEvent::StatusMessage(format!(
            "Save error: {}",
            report.message
        )));
    }

    fn on_serial_error(&self, report: &ErrorReport) {
        tracing::error!(cause = ?report.cause, "{}", report.message);
        self.ui.post(ShellEvent::ConnectionLost {
            message: format!("Communication error: {}", report.message),
        });
    }

    fn on_critical_error(&self, report: &ErrorReport) {
        tracing::error!(cause = ?report.cause, "critical: {}", report.message);
        self.activate_emergency_mode(&report.message);
    }

    /// Replaces the interactive surface with `message`. Needs a restart to leave.
    pub fn activate_emergency_mode(&self, message: &str) {
        tracing::warn!(%message, "entering emergency mode");
        if !self.state().is_shutting_down() {
            self.set_state(LifecycleState::EmergencyMode);
        }
        self.ui.post(ShellEvent::EmergencyActivated {
            message: message.to_string(),
        });
    }

    // --- Window hooks ---

    pub fn on_window_activated(&self, active: bool) {
        let result = if active {
            self.services.performance.resume_monitoring()
        } else {
            self.services.performance.pause_monitoring()
        };
        if let Err(e) = result {
            tracing::debug!(active, error = %e, "could not toggle performance monitoring");
        }
    }

    pub fn on_window_state_changed(&self, state: WindowState) {
        let period = self.config.throttle.sampling_interval(state);
        match self.services.performance.set_update_frequency(period) {
            Ok(()) => {
                tracing::debug!(?state, ?period, "sampling interval adjusted");
                self.ui.post(ShellEvent::SamplingIntervalChanged(period));
            }
            Err(e) => tracing::warn!(error = %e, "could not change sampling interval"),
        }
    }

    pub fn on_client_size_changed(&self, width: u32, height: u32) {
        let level = self.config.throttle.quality_for(width, height);
        self.services.animation.set_quality_level(level);
        self.ui.post(ShellEvent::AnimationQualityChanged(level));
    }

    /// Feeds the latest window geometry; only transitions reach the services.
    pub fn on_geometry(&self, geometry: WindowGeometry) {
        let previous = lock(&self.geometry).replace(geometry);
        if previous.map(|g| g.state) != Some(geometry.state) {
            self.on_window_state_changed(geometry.state);
        }
        if previous.map(|g| (g.width, g.height)) != Some((geometry.width, geometry.height)) {
            self.on_client_size_changed(geometry.width, geometry.height);
        }
    }

    // --- State ---

    fn set_state(&self, next: LifecycleState) {
        let previous = std::mem::replace(&mut *lock(&self.state), next);
        if previous != next {
            tracing::debug!(?previous, ?next, "lifecycle transition");
            self.ui.post(ShellEvent::LifecycleChanged(next));
        }
    }

    fn transition_if(&self, from: LifecycleState, to: LifecycleState) {
        let moved = {
            let mut state = lock(&self.state);
            if *state == from {
                *state = to;
                true
            } else {
                false
            }
        };
        if moved {
            tracing::debug!(previous = ?from, next = ?to, "lifecycle transition");
            self.ui.post(ShellEvent::LifecycleChanged(to));
        }
    }
}

enum StartupError {
    Interrupted,
    Failed(anyhow::Error),
}

impl From<anyhow::Error> for StartupError {
    fn from(e: anyhow::Error) -> Self {
        StartupError::Failed(e)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
