use crate::theme::*;
use crate::utils::{cmd_button, section_label, ButtonKind};
use eframe::egui;
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_core::ReactorSetpoints;

#[derive(Default)]
pub struct SetpointsResponse {
    pub apply_clicked: bool,
    pub revert_clicked: bool,
}

/// The setpoint a control view edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setpoint {
    ReactorTemperature,
    StirrerSpeed,
    DosingRate,
    JacketTemperature,
}

impl Setpoint {
    pub fn for_view(view_name: &str) -> Option<Self> {
        match view_name {
            "Temperature" => Some(Self::ReactorTemperature),
            "Stirrer" => Some(Self::StirrerSpeed),
            "Dosing" => Some(Self::DosingRate),
            "Jacket" => Some(Self::JacketTemperature),
            _ => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ReactorTemperature => "REACTOR TEMPERATURE",
            Self::StirrerSpeed => "STIRRER SPEED",
            Self::DosingRate => "DOSING RATE",
            Self::JacketTemperature => "JACKET TEMPERATURE",
        }
    }
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    setpoint: Setpoint,
    draft: &mut ReactorSetpoints,
    saved: &ReactorSetpoints,
    enabled: bool,
) -> SetpointsResponse {
    let mut resp = SetpointsResponse::default();
    let dirty = draft != saved;

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(8.0),
        size: percent(1.),
        ..Default::default()
    })
    .add(|tui| {
        tui.ui(|ui| section_label(ui, setpoint.label()));

        tui.ui(|ui| {
            ui.add_enabled_ui(enabled, |ui| match setpoint {
                Setpoint::ReactorTemperature => {
                    ui.add(
                        egui::Slider::new(
                            &mut draft.temperature_c,
                            reactor_config::REACTOR_TEMPERATURE_RANGE_C,
                        )
                        .suffix(" °C")
                        .fixed_decimals(1),
                    );
                }
                Setpoint::StirrerSpeed => {
                    ui.add(
                        egui::Slider::new(
                            &mut draft.stirrer_rpm,
                            reactor_config::MIN_STIRRER_RPM..=reactor_config::MAX_STIRRER_RPM,
                        )
                        .suffix(" RPM")
                        .step_by(10.0),
                    );
                }
                Setpoint::DosingRate => {
                    ui.add(
                        egui::Slider::new(
                            &mut draft.dosing_ml_per_min,
                            0.0..=reactor_config::MAX_DOSING_ML_PER_MIN,
                        )
                        .suffix(" ml/min")
                        .fixed_decimals(2),
                    );
                }
                Setpoint::JacketTemperature => {
                    ui.add(
                        egui::Slider::new(
                            &mut draft.jacket_temperature_c,
                            reactor_config::JACKET_TEMPERATURE_RANGE_C,
                        )
                        .suffix(" °C")
                        .fixed_decimals(1),
                    );
                }
            });
        });

        if dirty {
            tui.label(
                egui::RichText::new("UNSAVED CHANGES")
                    .size(9.0)
                    .color(COL_WARN),
            );
        }

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            gap: length(6.0),
            ..Default::default()
        })
        .add(|tui| {
            if tui
                .ui(|ui| cmd_button(ui, "APPLY", ButtonKind::Primary, enabled && dirty))
                .clicked()
            {
                resp.apply_clicked = true;
            }
            if tui
                .ui(|ui| cmd_button(ui, "REVERT", ButtonKind::Outline, dirty))
                .clicked()
            {
                resp.revert_clicked = true;
            }
        });
    });

    resp
}
