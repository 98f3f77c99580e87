use crate::theme::*;
use eframe::egui;
use eframe::egui::Color32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Outline,
    Danger,
}

pub fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(10.0)
            .color(COL_TEXT_DIM)
            .family(egui::FontFamily::Monospace)
            .strong(),
    );
}

pub fn cmd_button(ui: &mut egui::Ui, label: &str, kind: ButtonKind, enabled: bool) -> egui::Response {
    let (fill, stroke_col, text_col) = match kind {
        ButtonKind::Primary => (COL_ACCENT, COL_ACCENT, COL_BG_DARK),
        ButtonKind::Outline => (Color32::TRANSPARENT, COL_ACCENT, COL_ACCENT),
        ButtonKind::Danger => (Color32::TRANSPARENT, COL_DANGER, COL_DANGER),
    };

    let text = egui::RichText::new(label)
        .size(10.0)
        .color(if enabled { text_col } else { COL_TEXT_DIM });

    let btn = egui::Button::new(text)
        .min_size(egui::vec2(96.0, 22.0))
        .fill(if enabled { fill } else { Color32::TRANSPARENT })
        .stroke(egui::Stroke::new(
            1.0,
            if enabled { stroke_col } else { COL_BORDER },
        ));

    ui.add_enabled(enabled, btn)
}

pub fn format_interval(interval: std::time::Duration) -> String {
    if interval.as_millis() < 1000 {
        format!("{} ms", interval.as_millis())
    } else {
        format!("{:.1} s", interval.as_secs_f64())
    }
}
