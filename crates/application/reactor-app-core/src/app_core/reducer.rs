use super::events::ShellEvent;
use crate::viewmodel::ShellViewModel;

pub const COMM_FAULT_STATUS: &str = "COMM FAULT";

pub fn reduce(mut vm: ShellViewModel, ev: ShellEvent) -> ShellViewModel {
    match ev {
        ShellEvent::LifecycleChanged(state) => vm.lifecycle = state,

        ShellEvent::LoadingProgress(step) => {
            vm.is_loading = true;
            vm.loading_progress = step.percent();
            vm.loading_text = step.label;
        }

        ShellEvent::StartupCompleted { status_message } => {
            vm.is_loading = false;
            vm.loading_progress = 100.0;
            vm.loading_text.clear();
            vm.status_message = status_message;
        }

        ShellEvent::StartupFailed { message } => {
            vm.is_loading = false;
            vm.is_emergency_mode = true;
            vm.emergency_message = format!("Startup failed: {message}");
            vm.error_dialog = Some(message);
        }

        ShellEvent::NavigationStarted { view_name } => {
            vm.is_navigating = true;
            vm.status_message = format!("Opening {view_name}...");
        }

        ShellEvent::NavigationCompleted(view) => {
            vm.is_navigating = false;
            vm.status_message = format!("Viewing {}", view.title);
            vm.current_view = Some(view);
        }

        ShellEvent::NavigationAborted => vm.is_navigating = false,

        ShellEvent::StatusUpdated(report) => {
            vm.status_message = report.message;
            vm.system_status = report.system_status;
            vm.is_online = report.is_online;
        }

        ShellEvent::StatusMessage(message) => vm.status_message = message,

        ShellEvent::ConnectionLost { message } => {
            vm.is_online = false;
            vm.system_status = COMM_FAULT_STATUS.to_string();
            vm.status_message = message;
        }

        ShellEvent::EmergencyActivated { message } => {
            vm.is_emergency_mode = true;
            vm.emergency_message = message;
        }

        ShellEvent::PerformanceUpdated(sample) => vm.performance = Some(sample),
        ShellEvent::SamplingIntervalChanged(period) => vm.sampling_interval = period,
        ShellEvent::AnimationQualityChanged(level) => vm.animation_quality = level,

        ShellEvent::CloseAllowed => vm.close_permitted = true,
    }
    vm
}

#[cfg(test)]
mod tests {
    use super::*;
    use reactor_core::{InitializationStep, StatusReport, ViewDescriptor};

    #[test]
    fn progress_updates_text_and_percentage() {
        let vm = reduce(
            ShellViewModel::default(),
            ShellEvent::LoadingProgress(InitializationStep::new(2, 4, "Starting animations")),
        );
        assert!(vm.is_loading);
        assert_eq!(vm.loading_progress, 50.0);
        assert_eq!(vm.loading_text, "Starting animations");
    }

    #[test]
    fn status_report_overwrites_previous_values() {
        let vm = reduce(
            ShellViewModel::default(),
            ShellEvent::StatusUpdated(StatusReport::new("first", "A", true)),
        );
        let vm = reduce(
            vm,
            ShellEvent::StatusUpdated(StatusReport::new("second", "B", false)),
        );
        assert_eq!(vm.status_message, "second");
        assert_eq!(vm.system_status, "B");
        assert!(!vm.is_online);
    }

    #[test]
    fn navigation_completion_clears_flag_and_sets_view() {
        let vm = reduce(
            ShellViewModel::default(),
            ShellEvent::NavigationStarted {
                view_name: "Dosing".into(),
            },
        );
        assert!(vm.is_navigating);

        let vm = reduce(
            vm,
            ShellEvent::NavigationCompleted(ViewDescriptor::new("Dosing", "Dosing")),
        );
        assert!(!vm.is_navigating);
        assert_eq!(vm.current_view.map(|v| v.name), Some("Dosing".to_string()));
    }

    #[test]
    fn connection_loss_marks_offline() {
        let vm = ShellViewModel {
            is_online: true,
            ..Default::default()
        };
        let vm = reduce(
            vm,
            ShellEvent::ConnectionLost {
                message: "port closed".into(),
            },
        );
        assert!(!vm.is_online);
        assert_eq!(vm.system_status, COMM_FAULT_STATUS);
    }

    #[test]
    fn startup_failure_raises_dialog_and_emergency() {
        let vm = reduce(
            ShellViewModel::default(),
            ShellEvent::StartupFailed {
                message: "disk unreadable".into(),
            },
        );
        assert!(!vm.is_loading);
        assert!(vm.is_emergency_mode);
        assert!(vm.emergency_message.contains("disk unreadable"));
        assert_eq!(vm.error_dialog.as_deref(), Some("disk unreadable"));
    }
}
