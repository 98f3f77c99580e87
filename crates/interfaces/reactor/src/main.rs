#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use reactor_app_core::ShellConfig;
use reactor_ui::UiOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lab reactor control shell")]
struct Cli {
    /// Directory holding persisted shell state (overrides REACTOR_STATE_DIR)
    #[arg(long)]
    state_dir: Option<PathBuf>,
    /// View opened once startup completes
    #[arg(long, default_value = reactor_config::DEFAULT_VIEW)]
    default_view: String,
    /// Tracing filter directives, e.g. "info,reactor_app_core=debug"
    #[arg(long)]
    log_filter: Option<String>,
    /// Render animations without GPU acceleration
    #[arg(long)]
    no_hardware_acceleration: bool,
}

impl Cli {
    fn into_options(self) -> UiOptions {
        UiOptions {
            state_dir: self.state_dir,
            log_filter: self.log_filter,
            shell: ShellConfig {
                default_view: self.default_view,
                hardware_acceleration: !self.no_hardware_acceleration,
                ..ShellConfig::default()
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = reactor_ui::run(cli.into_options()) {
        eprintln!("Reactor shell failed: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_map_to_shell_config() {
        let options = Cli::parse_from(["reactor"]).into_options();
        assert_eq!(options.shell.default_view, "Overview");
        assert!(options.shell.hardware_acceleration);
        assert!(options.state_dir.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let options = Cli::parse_from([
            "reactor",
            "--state-dir",
            "/tmp/reactor",
            "--default-view",
            "Diagnostics",
            "--no-hardware-acceleration",
            "--log-filter",
            "debug",
        ])
        .into_options();

        assert_eq!(options.state_dir, Some(PathBuf::from("/tmp/reactor")));
        assert_eq!(options.shell.default_view, "Diagnostics");
        assert!(!options.shell.hardware_acceleration);
        assert_eq!(options.log_filter.as_deref(), Some("debug"));
    }
}
