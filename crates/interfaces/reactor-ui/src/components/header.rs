use crate::theme::*;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_app_core::ShellViewModel;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, vm: &ShellViewModel) {
    let view_title = vm
        .current_view
        .as_ref()
        .map(|v| v.title.to_uppercase())
        .unwrap_or_else(|| "NO VIEW".to_string());
    let status_col = status_color(vm.is_emergency_mode, vm.is_online);
    let status_text = if vm.is_emergency_mode {
        "EMERGENCY".to_string()
    } else {
        vm.system_status.clone()
    };

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(6.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                tui.label(
                    egui::RichText::new("REACTOR")
                        .family(egui::FontFamily::Monospace)
                        .size(12.0)
                        .extra_letter_spacing(2.0)
                        .strong()
                        .color(COL_TEXT),
                );
                tui.label(
                    egui::RichText::new(format!("// {view_title}"))
                        .family(egui::FontFamily::Monospace)
                        .size(10.0)
                        .color(COL_TEXT_DIM),
                );
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(8.0),
                ..Default::default()
            })
            .add(|tui| {
                if let Some(sample) = vm.performance {
                    tui.label(
                        egui::RichText::new(format!("{:.0} FPS", sample.frames_per_second))
                            .size(10.0)
                            .color(COL_TEXT_DIM),
                    );
                }

                tui.style(taffy::Style {
                    size: taffy::Size {
                        width: length(8.0),
                        height: length(8.0),
                    },
                    flex_shrink: 0.0,
                    ..Default::default()
                })
                .bg_add(
                    TuiBackground::new()
                        .with_background_color(status_col)
                        .with_corner_radius(4.0),
                    |_| {},
                );
                tui.label(
                    egui::RichText::new(status_text)
                        .color(status_col)
                        .size(10.0)
                        .strong(),
                );
            });
        },
    );
}
