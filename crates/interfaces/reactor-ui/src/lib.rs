mod app;
mod components;
mod screens;
mod theme;
mod utils;

use std::path::PathBuf;

use anyhow::Context as _;
use reactor_app_core::{async_runtime, LifecycleOrchestrator, ShellConfig, ShellKernel};
use reactor_services::{resolve_state_dir, DefaultServices};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Everything the host needs to bring one shell window up.
#[derive(Debug, Clone, Default)]
pub struct UiOptions {
    pub state_dir: Option<PathBuf>,
    pub log_filter: Option<String>,
    pub shell: ShellConfig,
}

fn setup_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|e| {
            eprintln!("Ignoring invalid log filter '{directives}': {e}");
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

pub fn run(options: UiOptions) -> anyhow::Result<()> {
    setup_logging(options.log_filter.as_deref());

    let state_dir = resolve_state_dir(options.state_dir).context("Failed to resolve state directory")?;
    tracing::info!(state_dir = %state_dir.display(), "starting reactor shell");

    let runtime = async_runtime::runtime()?;
    let services = DefaultServices::new(state_dir);
    let (kernel, requests) = ShellKernel::new();
    let hardware_acceleration = options.shell.hardware_acceleration;
    let orchestrator = LifecycleOrchestrator::new(
        services.context(),
        kernel.ui_handle(),
        requests,
        options.shell,
        runtime.handle().clone(),
    );

    let native = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(reactor_config::INITIAL_WINDOW_SIZE)
            .with_min_inner_size(reactor_config::MIN_WINDOW_SIZE)
            .with_title("REACTOR // CONTROL"),
        hardware_acceleration: if hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        ..Default::default()
    };

    eframe::run_native(
        "Reactor Control",
        native,
        Box::new(move |cc| {
            theme::setup(&cc.egui_ctx);
            Ok(Box::new(app::ReactorShellApp::new(
                kernel,
                orchestrator,
                services,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI event loop failed: {e}"))
}
