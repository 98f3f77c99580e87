use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use reactor_app_core::NavigationService;
use reactor_core::ViewDescriptor;

use crate::ServiceError;

/// Views the shell knows how to mount, as `(name, title)`.
pub const REACTOR_VIEWS: &[(&str, &str)] = &[
    ("Overview", "Reactor Overview"),
    ("Temperature", "Temperature Control"),
    ("Stirrer", "Stirrer Control"),
    ("Dosing", "Dosing Control"),
    ("Jacket", "Jacket Temperature"),
    ("Diagnostics", "Diagnostics"),
];

/// Navigation over a fixed catalogue of views.
pub struct ViewRegistry {
    views: Vec<ViewDescriptor>,
    initialized: AtomicBool,
    current: Mutex<Option<ViewDescriptor>>,
}

impl ViewRegistry {
    pub fn new(views: Vec<ViewDescriptor>) -> Self {
        Self {
            views,
            initialized: AtomicBool::new(false),
            current: Mutex::new(None),
        }
    }

    pub fn reactor_views() -> Self {
        Self::new(
            REACTOR_VIEWS
                .iter()
                .map(|(name, title)| ViewDescriptor::new(*name, *title))
                .collect(),
        )
    }

    pub fn views(&self) -> &[ViewDescriptor] {
        &self.views
    }

    pub fn current(&self) -> Option<ViewDescriptor> {
        self.current
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    fn resolve(&self, view_name: &str) -> Result<ViewDescriptor, ServiceError> {
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(ServiceError::NotInitialized("navigation service"));
        }
        self.views
            .iter()
            .find(|v| v.name == view_name)
            .cloned()
            .ok_or_else(|| ServiceError::UnknownView(view_name.to_string()))
    }
}

#[async_trait]
impl NavigationService for ViewRegistry {
    async fn initialize(&self) -> anyhow::Result<()> {
        if self.views.is_empty() {
            anyhow::bail!("no views registered");
        }
        self.initialized.store(true, Ordering::SeqCst);
        tracing::debug!(views = self.views.len(), "view registry ready");
        Ok(())
    }

    async fn navigate_to(
        &self,
        view_name: &str,
        parameters: Option<&serde_json::Value>,
    ) -> anyhow::Result<ViewDescriptor> {
        let view = self.resolve(view_name).inspect_err(|e| {
            tracing::debug!(view = view_name, kind = ?e.kind(), "navigation rejected");
        })?;
        if let Some(parameters) = parameters {
            tracing::debug!(view = %view.name, %parameters, "navigation parameters ignored");
        }
        *self.current.lock().unwrap_or_else(|p| p.into_inner()) = Some(view.clone());
        Ok(view)
    }
}
