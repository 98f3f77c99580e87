use crate::theme::*;
use crate::utils::section_label;
use eframe::egui;
use egui_taffy::bg::simple::{TuiBackground, TuiBuilderLogicWithBackground};
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, TuiBuilderLogic};

/// One labelled value in a readout strip.
pub struct Cell {
    pub label: &'static str,
    pub value: String,
    pub color: egui::Color32,
}

pub fn cell(label: &'static str, value: impl Into<String>) -> Cell {
    Cell {
        label,
        value: value.into(),
        color: COL_ACCENT,
    }
}

impl Cell {
    pub fn colored(mut self, color: egui::Color32) -> Self {
        self.color = color;
        self
    }
}

pub fn draw<'a>(tui: impl TuiBuilderLogic<'a>, title: &str, cells: &[Cell]) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        gap: length(4.0),
        size: taffy::Size {
            width: percent(1.),
            height: auto(),
        },
        ..Default::default()
    })
    .add(|tui| {
        tui.ui(|ui| section_label(ui, title));

        tui.style(taffy::Style {
            flex_direction: taffy::FlexDirection::Row,
            gap: length(8.0),
            padding: length(4.0),
            size: taffy::Size {
                width: percent(1.),
                height: length(52.0),
            },
            align_items: Some(taffy::AlignItems::Stretch),
            ..Default::default()
        })
        .bg_add(
            TuiBackground::new()
                .with_background_color(COL_BG_DARK)
                .with_border_color(COL_BORDER)
                .with_border_width(1.0),
            |tui| {
                for cell in cells {
                    draw_cell(&mut *tui, cell);
                }
            },
        );
    });
}

fn draw_cell<'a>(tui: impl TuiBuilderLogic<'a>, cell: &Cell) {
    tui.style(taffy::Style {
        flex_direction: taffy::FlexDirection::Column,
        flex_grow: 1.0,
        gap: length(2.0),
        justify_content: Some(taffy::JustifyContent::Center),
        padding: length(4.0),
        ..Default::default()
    })
    .add(|tui| {
        tui.label(
            egui::RichText::new(cell.label)
                .size(9.0)
                .color(COL_TEXT_DIM)
                .strong(),
        );
        tui.label(
            egui::RichText::new(&cell.value)
                .size(12.0)
                .color(cell.color)
                .monospace(),
        );
    });
}
