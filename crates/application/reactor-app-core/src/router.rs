use std::sync::Weak;

use reactor_core::PerformanceSample;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::app_core::ViewModelEvent;
use crate::orchestrator::LifecycleOrchestrator;

/// Registration of the orchestrator's event handlers with the view-model and
/// the performance monitor. Dropping it unregisters every handler.
pub struct Subscription {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    pub(crate) fn spawn(
        orchestrator: Weak<LifecycleOrchestrator>,
        requests: mpsc::Receiver<ViewModelEvent>,
        samples: broadcast::Receiver<PerformanceSample>,
        runtime: &Handle,
    ) -> Self {
        let token = CancellationToken::new();
        let task = runtime.spawn(route_events(
            orchestrator,
            requests,
            samples,
            token.clone(),
        ));
        Self {
            token,
            task: Some(task),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.token.cancel();
        self.task.take();
    }
}

async fn route_events(
    orchestrator: Weak<LifecycleOrchestrator>,
    mut requests: mpsc::Receiver<ViewModelEvent>,
    mut samples: broadcast::Receiver<PerformanceSample>,
    token: CancellationToken,
) {
    let mut samples_open = true;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            maybe_ev = requests.recv() => {
                let Some(ev) = maybe_ev else {
                    tracing::debug!("view-model event channel closed");
                    break;
                };
                let Some(orchestrator) = orchestrator.upgrade() else { break };
                orchestrator.dispatch(ev);
            }
            sample = samples.recv(), if samples_open => match sample {
                Ok(sample) => {
                    let Some(orchestrator) = orchestrator.upgrade() else { break };
                    orchestrator.on_performance_updated(sample);
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "performance samples lagged");
                }
                Err(broadcast::error::RecvError::Closed) => samples_open = false,
            }
        }
    }

    tracing::debug!("event router stopped");
}
