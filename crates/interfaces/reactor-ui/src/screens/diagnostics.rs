use crate::components::readout::{self, cell};
use crate::theme::*;
use crate::utils::{cmd_button, format_interval, section_label, ButtonKind};
use eframe::egui;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_app_core::ShellViewModel;
use reactor_services::DefaultServices;

#[derive(Default)]
pub struct DiagnosticsResponse {
    pub simulate_comm_fault: bool,
    pub trigger_emergency: bool,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    vm: &ShellViewModel,
    services: &DefaultServices,
) -> DiagnosticsResponse {
    let mut resp = DiagnosticsResponse::default();
    let animation = &services.animation;
    let monitor = &services.performance;

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(12.0),
        size: percent(1.),
        overflow: taffy::Point {
            x: taffy::Overflow::Hidden,
            y: taffy::Overflow::Scroll,
        },
        ..Default::default()
    })
    .add(|tui| {
        readout::draw(
            &mut *tui,
            "ANIMATION",
            &[
                cell("ENGINE", if animation.is_running() { "RUNNING" } else { "STOPPED" }),
                cell(
                    "ACCEL",
                    if animation.hardware_acceleration() { "GPU" } else { "SOFTWARE" },
                ),
                cell("QUALITY", animation.quality().label()),
                cell("EFFECTS", if animation.effects_enabled() { "ON" } else { "OFF" }),
            ],
        );

        let sampler = match (monitor.is_running(), monitor.is_paused()) {
            (false, _) => "STOPPED",
            (true, true) => "PAUSED",
            (true, false) => "SAMPLING",
        };
        readout::draw(
            &mut *tui,
            "PERFORMANCE MONITOR",
            &[
                cell("STATE", sampler).colored(if sampler == "SAMPLING" { COL_SUCCESS } else { COL_WARN }),
                cell("PERIOD", format_interval(monitor.update_frequency())),
                cell("SHOWN", format_interval(vm.sampling_interval)),
            ],
        );

        tui.ui(|ui| section_label(ui, "STATE FILE"));
        tui.label(
            egui::RichText::new(services.state.path().display().to_string())
                .size(10.0)
                .color(COL_TEXT_DIM)
                .monospace(),
        );

        tui.ui(|ui| section_label(ui, "FAULT INJECTION"));
        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            gap: length(6.0),
            ..Default::default()
        })
        .add(|tui| {
            let enabled = vm.is_interactive();
            if tui
                .ui(|ui| cmd_button(ui, "COMM FAULT", ButtonKind::Outline, enabled))
                .clicked()
            {
                resp.simulate_comm_fault = true;
            }
            if tui
                .ui(|ui| cmd_button(ui, "EMERGENCY", ButtonKind::Danger, enabled))
                .clicked()
            {
                resp.trigger_emergency = true;
            }
        });
    });

    resp
}
