use crate::theme::*;
use crate::utils::{cmd_button, ButtonKind};
use eframe::egui;
use reactor_app_core::ShellViewModel;

/// Full-panel splash while the startup sequence is running.
pub fn loading(ui: &mut egui::Ui, vm: &ShellViewModel) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.label(
            egui::RichText::new("REACTOR CONTROL")
                .size(16.0)
                .extra_letter_spacing(3.0)
                .strong()
                .color(COL_TEXT),
        );
        ui.add_space(12.0);
        ui.add(
            egui::ProgressBar::new(vm.loading_progress / 100.0)
                .desired_width(320.0)
                .fill(COL_ACCENT)
                .text(egui::RichText::new(&vm.loading_text).size(10.0).color(COL_BG)),
        );
    });
}

/// Red strip pinned above everything else while emergency mode is active.
pub fn emergency_banner(ctx: &egui::Context, vm: &ShellViewModel) {
    if !vm.is_emergency_mode {
        return;
    }

    egui::TopBottomPanel::top("emergency_banner")
        .frame(
            egui::Frame::new()
                .fill(COL_DANGER)
                .inner_margin(egui::Margin::same(6)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("EMERGENCY MODE")
                        .strong()
                        .size(12.0)
                        .color(COL_TEXT),
                );
                ui.label(
                    egui::RichText::new(&vm.emergency_message)
                        .size(11.0)
                        .color(COL_TEXT),
                );
            });
        });
}

/// Modal-style error window. Returns true once the operator acknowledges it.
pub fn error_dialog(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(egui::RichText::new("ERROR").color(COL_DANGER).strong())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            ui.label(egui::RichText::new(message).color(COL_TEXT));
            ui.add_space(8.0);
            if cmd_button(ui, "ACKNOWLEDGE", ButtonKind::Outline, true).clicked() {
                dismissed = true;
            }
        });
    dismissed
}
