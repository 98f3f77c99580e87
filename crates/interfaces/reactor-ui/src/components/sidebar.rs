use crate::theme::*;
use crate::utils::{cmd_button, section_label, ButtonKind};
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};
use reactor_core::ViewDescriptor;

#[derive(Default)]
pub struct SidebarResponse {
    pub selected_view: Option<String>,
    pub close_clicked: bool,
}

pub fn draw<'a>(
    tui: impl TuiBuilderLogic<'a>,
    views: &[ViewDescriptor],
    current: Option<&str>,
    enabled: bool,
) -> SidebarResponse {
    let mut resp = SidebarResponse::default();

    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        size: percent(1.),
        min_size: taffy::Size {
            width: percent(1.),
            height: length(0.0),
        },
        justify_content: Some(taffy::JustifyContent::SpaceBetween),
        align_items: Some(taffy::AlignItems::Stretch),
        padding: length(8.0),
        gap: length(8.0),
        ..Default::default()
    })
    .bg_add(
        TuiBackground::new()
            .with_background_color(COL_BG)
            .with_border_color(COL_BORDER)
            .with_border_width(1.0),
        |tui| {
            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Column,
                flex_grow: 1.0,
                flex_basis: length(0.0),
                min_size: taffy::Size {
                    width: percent(1.),
                    height: length(0.0),
                },
                gap: length(4.0),
                size: taffy::Size {
                    width: percent(1.),
                    height: auto(),
                },
                ..Default::default()
            })
            .add(|tui| {
                tui.ui(|ui| section_label(ui, "VIEWS"));

                for view in views {
                    let is_current = current == Some(view.name.as_str());

                    let response = tui
                        .id(egui_taffy::tid(("view", &view.name)))
                        .style(taffy::Style {
                            flex_direction: taffy::FlexDirection::Row,
                            align_items: Some(taffy::AlignItems::Center),
                            size: taffy::Size {
                                width: percent(1.),
                                height: length(28.0),
                            },
                            padding: length(4.0),
                            gap: length(8.0),
                            ..Default::default()
                        })
                        .bg_clickable(
                            TuiBackground::new()
                                .with_background_color(if is_current {
                                    COL_ACCENT.linear_multiply(0.1)
                                } else {
                                    COL_BG
                                })
                                .with_border_color(if is_current { COL_ACCENT } else { COL_BORDER })
                                .with_border_width(1.0),
                            |tui| {
                                tui.label(
                                    egui::RichText::new(view.title.to_uppercase())
                                        .size(11.0)
                                        .color(if !enabled {
                                            COL_TEXT_DIM
                                        } else if is_current {
                                            COL_ACCENT
                                        } else {
                                            COL_TEXT
                                        })
                                        .monospace(),
                                );
                            },
                        );

                    if enabled && !is_current && response.clicked() {
                        resp.selected_view = Some(view.name.clone());
                    }
                }
            });

            tui.style(taffy::Style {
                flex_direction: taffy::FlexDirection::Column,
                gap: length(4.0),
                flex_shrink: 0.0,
                padding: length(4.0),
                ..Default::default()
            })
            .bg_add(
                TuiBackground::new()
                    .with_background_color(COL_BG_DARK)
                    .with_border_color(COL_BORDER)
                    .with_border_width(1.0),
                |tui| {
                    if tui
                        .ui(|ui| cmd_button(ui, "CLOSE SHELL", ButtonKind::Danger, true))
                        .clicked()
                    {
                        resp.close_clicked = true;
                    }
                },
            );
        },
    );

    resp
}
