use tokio::sync::mpsc;

use crate::app_core::{reduce, ShellEvent, ViewModelEvent};
use crate::viewmodel::{ShellViewModel, ViewModelEvents};

/// Hands mutations to the UI thread. Safe to use from any thread or task.
#[derive(Debug, Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<ShellEvent>,
}

impl UiHandle {
    pub fn post(&self, ev: ShellEvent) {
        if self.tx.send(ev).is_err() {
            tracing::debug!("UI kernel dropped; discarding shell event");
        }
    }
}

/// The UI-affine execution context: owns the view-model and applies queued
/// mutations when the host calls [`ShellKernel::tick`] on its UI thread.
pub struct ShellKernel {
    view_model: ShellViewModel,
    events: ViewModelEvents,

    tx: mpsc::UnboundedSender<ShellEvent>,
    rx: mpsc::UnboundedReceiver<ShellEvent>,
}

impl ShellKernel {
    /// Returns the kernel and the receiving side of the view-model events,
    /// which belongs to the orchestrator.
    pub fn new() -> (Self, mpsc::Receiver<ViewModelEvent>) {
        Self::with_view_model(ShellViewModel::default())
    }

    pub fn with_view_model(view_model: ShellViewModel) -> (Self, mpsc::Receiver<ViewModelEvent>) {
        let (events, events_rx) = ViewModelEvents::channel(reactor_config::EVENT_CHANNEL_CAPACITY);
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                view_model,
                events,
                tx,
                rx,
            },
            events_rx,
        )
    }

    pub fn ui_handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn events(&self) -> &ViewModelEvents {
        &self.events
    }

    pub fn view_model(&self) -> &ShellViewModel {
        &self.view_model
    }

    /// Drains pending mutations. Returns how many were applied so the host can
    /// decide whether to repaint.
    pub fn tick(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(ev) = self.rx.try_recv() {
            let vm = std::mem::take(&mut self.view_model);
            self.view_model = reduce(vm, ev);
            applied += 1;
        }
        applied
    }

    pub fn dismiss_error_dialog(&mut self) {
        self.view_model.error_dialog = None;
    }
}
