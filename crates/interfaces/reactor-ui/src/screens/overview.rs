use crate::components::readout::{self, cell};
use crate::theme::*;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_app_core::ShellViewModel;
use reactor_core::ReactorSetpoints;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, vm: &ShellViewModel, setpoints: &ReactorSetpoints) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(12.0),
        size: percent(1.),
        min_size: taffy::Size {
            width: length(0.0),
            height: length(0.0),
        },
        ..Default::default()
    })
    .add(|tui| {
        readout::draw(
            &mut *tui,
            "SYSTEM",
            &[
                cell("STATUS", vm.system_status.clone())
                    .colored(status_color(vm.is_emergency_mode, vm.is_online)),
                cell("LINK", if vm.is_online { "ONLINE" } else { "OFFLINE" }),
                cell("LIFECYCLE", vm.lifecycle.label()),
            ],
        );

        readout::draw(
            &mut *tui,
            "SETPOINTS",
            &[
                cell("REACTOR", format!("{:.1} °C", setpoints.temperature_c)).colored(COL_HEAT),
                cell("JACKET", format!("{:.1} °C", setpoints.jacket_temperature_c))
                    .colored(COL_HEAT),
                cell("STIRRER", format!("{} RPM", setpoints.stirrer_rpm)),
                cell("DOSING", format!("{:.2} ml/min", setpoints.dosing_ml_per_min)),
            ],
        );

        let (fps, memory) = vm
            .performance
            .map(|s| {
                (
                    format!("{:.1}", s.frames_per_second),
                    format!("{:.1} MB", s.memory_usage_mb),
                )
            })
            .unwrap_or_else(|| ("--".to_string(), "--".to_string()));
        readout::draw(
            &mut *tui,
            "SHELL",
            &[cell("FPS", fps), cell("MEMORY", memory)],
        );
    });
}
