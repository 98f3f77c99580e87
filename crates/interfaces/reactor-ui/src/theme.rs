use eframe::egui::{self, Color32, FontFamily, FontId, Stroke, TextStyle, Visuals};

// Control-room palette
pub const COL_BG: Color32 = Color32::from_rgb(8, 10, 12);
pub const COL_BG_DARK: Color32 = Color32::from_rgb(14, 17, 20);
pub const COL_BORDER: Color32 = Color32::from_rgb(38, 44, 50);
pub const COL_TEXT: Color32 = Color32::from_rgb(226, 232, 240);
pub const COL_TEXT_DIM: Color32 = Color32::from_rgb(148, 158, 168);
pub const COL_ACCENT: Color32 = Color32::from_rgb(45, 212, 191); // Teal
pub const COL_WARN: Color32 = Color32::from_rgb(250, 204, 21);
pub const COL_DANGER: Color32 = Color32::from_rgb(220, 38, 38);
pub const COL_SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const COL_HEAT: Color32 = Color32::from_rgb(249, 115, 22);

pub fn setup(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = COL_BG_DARK;
    visuals.panel_fill = COL_BG;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, COL_BORDER);
    visuals.widgets.inactive.bg_fill = COL_BG_DARK;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, COL_TEXT_DIM);

    visuals.widgets.hovered.bg_fill = COL_ACCENT.linear_multiply(0.1);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, COL_ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, COL_ACCENT);

    visuals.widgets.active.bg_fill = COL_ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, COL_BG);

    visuals.selection.bg_fill = COL_ACCENT.linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, COL_ACCENT);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(11.0, FontFamily::Monospace),
        ),
        (TextStyle::Button, FontId::new(11.0, FontFamily::Monospace)),
        (TextStyle::Small, FontId::new(9.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(6.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(8);
    style.spacing.slider_width = 240.0;
    style.visuals.button_frame = true;

    ctx.set_style(style);
}

/// Colour for the controller status word shown in the header.
pub fn status_color(is_emergency: bool, is_online: bool) -> Color32 {
    if is_emergency {
        COL_DANGER
    } else if is_online {
        COL_SUCCESS
    } else {
        COL_WARN
    }
}
