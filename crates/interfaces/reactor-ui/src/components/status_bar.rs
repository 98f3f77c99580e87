use crate::theme::*;
use crate::utils::format_interval;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_app_core::ShellViewModel;

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, vm: &ShellViewModel) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Row,
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Center),
        padding: length(4.0),
        size: taffy::Size {
            width: percent(1.),
            height: percent(1.),
        },
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG_DARK)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Row,
                align_items: Some(taffy::AlignItems::Center),
                gap: length(6.0),
                ..Default::default()
            })
            .add(|tui| {
                if vm.is_navigating || vm.lifecycle.is_shutting_down() {
                    tui.ui_add(egui::Spinner::new().size(10.0));
                }
                tui.label(
                    egui::RichText::new(&vm.status_message)
                        .size(10.0)
                        .color(COL_TEXT),
                );
            });

            tui.label(
                egui::RichText::new(format!(
                    "{} | SAMPLE {} | FX {}",
                    vm.lifecycle.label(),
                    format_interval(vm.sampling_interval),
                    vm.animation_quality.label(),
                ))
                .size(9.0)
                .color(COL_TEXT_DIM),
            );
        },
    );
}
