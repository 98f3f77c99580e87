use std::sync::Arc;

use crate::components::{header, overlay, sidebar, status_bar};
use crate::screens::setpoints::{self, Setpoint};
use crate::screens::{diagnostics, overview};
use eframe::egui;
use egui_taffy::taffy::prelude::{auto, length, percent};
use egui_taffy::{taffy, tui, TuiBuilderLogic};

use reactor_app_core::{
    CloseDecision, LifecycleOrchestrator, ShellEvent, ShellKernel, ShellViewModel,
};
use reactor_core::{
    ErrorKind, ErrorReport, LifecycleState, NavigationRequest, ReactorSetpoints, WindowGeometry,
    WindowState,
};
use reactor_services::DefaultServices;

pub struct ReactorShellApp {
    kernel: ShellKernel,
    orchestrator: Arc<LifecycleOrchestrator>,
    services: DefaultServices,

    started: bool,
    close_sent: bool,
    focused: Option<bool>,

    setpoints_loaded: bool,
    saved_setpoints: ReactorSetpoints,
    draft_setpoints: ReactorSetpoints,
}

impl ReactorShellApp {
    pub fn new(
        kernel: ShellKernel,
        orchestrator: Arc<LifecycleOrchestrator>,
        services: DefaultServices,
    ) -> Self {
        Self {
            kernel,
            orchestrator,
            services,
            started: false,
            close_sent: false,
            focused: None,
            setpoints_loaded: false,
            saved_setpoints: ReactorSetpoints::default(),
            draft_setpoints: ReactorSetpoints::default(),
        }
    }

    /// Forwards focus and geometry changes to the orchestrator.
    fn track_viewport(&mut self, ctx: &egui::Context) {
        let (focused, geometry) = ctx.input(|i| {
            let info = i.viewport();
            (info.focused, window_geometry(info))
        });

        if focused.is_some() && focused != self.focused {
            self.focused = focused;
            self.orchestrator.on_window_activated(focused == Some(true));
        }
        if let Some(geometry) = geometry {
            self.orchestrator.on_geometry(geometry);
        }
    }

    /// Vetoes native close requests until the shutdown protocol has run,
    /// then re-issues the close once it is permitted.
    fn intercept_close(&mut self, ctx: &egui::Context) {
        if ctx.input(|i| i.viewport().close_requested())
            && self.orchestrator.on_close_requested() == CloseDecision::Cancel
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        if self.kernel.view_model().close_permitted && !self.close_sent {
            self.close_sent = true;
            tracing::info!("shutdown complete, closing window");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn load_saved_setpoints(&mut self, vm: &ShellViewModel) {
        if !self.setpoints_loaded && vm.lifecycle == LifecycleState::Ready {
            let mut setpoints = self.services.state.snapshot().setpoints;
            setpoints.stirrer_rpm = reactor_config::clamp_rpm(setpoints.stirrer_rpm);
            self.saved_setpoints = setpoints;
            self.draft_setpoints = setpoints;
            self.setpoints_loaded = true;
        }
    }

    fn apply_setpoints(&mut self) {
        let setpoints = self.draft_setpoints;
        self.services.state.update(|s| s.setpoints = setpoints);
        self.saved_setpoints = setpoints;
        tracing::info!(?setpoints, "setpoints updated");
        self.kernel
            .ui_handle()
            .post(ShellEvent::StatusMessage("Setpoints updated".to_string()));
    }

    fn draw_shell(&mut self, ctx: &egui::Context, vm: &ShellViewModel) {
        let mut requested_view: Option<String> = None;
        let mut close_clicked = false;
        let mut apply_clicked = false;
        let mut diag = diagnostics::DiagnosticsResponse::default();

        egui::CentralPanel::default().show(ctx, |ui| {
            tui(ui, ui.id().with("root"))
                .reserve_available_space()
                .style(taffy::Style {
                    flex_direction: taffy::FlexDirection::Column,
                    size: percent(1.),
                    min_size: taffy::Size {
                        width: percent(1.),
                        height: length(0.0),
                    },
                    ..Default::default()
                })
                .show(|tui| {
                    tui.style(taffy::Style {
                        size: taffy::Size {
                            width: percent(1.),
                            height: length(28.0),
                        },
                        flex_shrink: 0.0,
                        ..Default::default()
                    })
                    .add(|tui| header::draw(tui, vm));

                    tui.style(taffy::Style {
                        flex_direction: taffy::FlexDirection::Row,
                        size: taffy::Size {
                            width: percent(1.),
                            height: auto(),
                        },
                        flex_grow: 1.0,
                        flex_basis: length(0.0),
                        min_size: taffy::Size {
                            width: percent(1.),
                            height: length(0.0),
                        },
                        overflow: taffy::Point {
                            x: taffy::Overflow::Hidden,
                            y: taffy::Overflow::Hidden,
                        },
                        ..Default::default()
                    })
                    .add(|tui| {
                        tui.style(taffy::Style {
                            size: taffy::Size {
                                width: length(200.0),
                                height: percent(1.),
                            },
                            flex_shrink: 0.0,
                            min_size: taffy::Size {
                                width: length(200.0),
                                height: length(0.0),
                            },
                            ..Default::default()
                        })
                        .add(|tui| {
                            let resp = sidebar::draw(
                                tui,
                                self.services.navigation.views(),
                                vm.current_view_name(),
                                vm.is_interactive() && !vm.is_navigating,
                            );
                            requested_view = resp.selected_view;
                            close_clicked = resp.close_clicked;
                        });

                        tui.style(taffy::Style {
                            flex_direction: taffy::FlexDirection::Column,
                            flex_grow: 1.0,
                            size: percent(1.),
                            flex_basis: length(0.0),
                            min_size: taffy::Size {
                                width: length(0.0),
                                height: length(0.0),
                            },
                            overflow: taffy::Point {
                                x: taffy::Overflow::Hidden,
                                y: taffy::Overflow::Hidden,
                            },
                            padding: length(12.0),
                            gap: length(8.0),
                            ..Default::default()
                        })
                        .add(|tui| match vm.current_view_name() {
                            Some("Overview") => {
                                overview::draw(tui, vm, &self.saved_setpoints);
                            }
                            Some("Diagnostics") => {
                                diag = diagnostics::draw(tui, vm, &self.services);
                            }
                            Some(name) => match Setpoint::for_view(name) {
                                Some(setpoint) => {
                                    let resp = setpoints::draw(
                                        tui,
                                        setpoint,
                                        &mut self.draft_setpoints,
                                        &self.saved_setpoints,
                                        vm.is_interactive(),
                                    );
                                    apply_clicked = resp.apply_clicked;
                                    if resp.revert_clicked {
                                        self.draft_setpoints = self.saved_setpoints;
                                    }
                                }
                                None => {
                                    tui.label(format!("No panel for view '{name}'"));
                                }
                            },
                            None => {
                                tui.colored_label(crate::theme::COL_TEXT_DIM, "NO VIEW LOADED");
                            }
                        });
                    });

                    tui.style(taffy::Style {
                        size: taffy::Size {
                            width: percent(1.),
                            height: length(22.0),
                        },
                        flex_shrink: 0.0,
                        ..Default::default()
                    })
                    .add(|tui| status_bar::draw(tui, vm));
                });
        });

        let events = self.kernel.events();
        if let Some(view_name) = requested_view {
            events.request_navigation(NavigationRequest::new(view_name));
        }
        if diag.simulate_comm_fault {
            events.report_error(ErrorReport::new(
                ErrorKind::SerialCommunication,
                "Reactor controller stopped responding",
            ));
        }
        if diag.trigger_emergency {
            events.report_error(ErrorReport::new(
                ErrorKind::Critical,
                "Emergency stop requested by operator",
            ));
        }
        if apply_clicked {
            self.apply_setpoints();
        }
        if close_clicked {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for ReactorShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let applied = self.kernel.tick();
        self.services.performance.record_frame();

        if !self.started {
            self.started = true;
            self.orchestrator.start();
        }

        self.track_viewport(ctx);
        self.intercept_close(ctx);

        ctx.options_mut(|options| {
            options.max_passes = std::num::NonZeroUsize::MIN.saturating_add(2);
        });
        ctx.style_mut(|style| {
            style.wrap_mode = Some(egui::TextWrapMode::Extend);
        });

        let vm = self.kernel.view_model().clone();
        self.load_saved_setpoints(&vm);

        overlay::emergency_banner(ctx, &vm);
        if vm.is_loading {
            egui::CentralPanel::default().show(ctx, |ui| overlay::loading(ui, &vm));
        } else {
            self.draw_shell(ctx, &vm);
        }

        if let Some(message) = vm.error_dialog.as_deref() {
            if overlay::error_dialog(ctx, message) {
                self.kernel.dismiss_error_dialog();
            }
        }

        if applied > 0 {
            ctx.request_repaint();
        }
        // Background tasks only reach the view-model through the kernel queue.
        ctx.request_repaint_after(vm.sampling_interval);
    }
}

/// Reads the window geometry egui reports for the root viewport. Sizes are in
/// logical points.
fn window_geometry(info: &egui::ViewportInfo) -> Option<WindowGeometry> {
    let state = if info.minimized == Some(true) {
        WindowState::Minimized
    } else if info.maximized == Some(true) {
        WindowState::Maximized
    } else {
        WindowState::Normal
    };

    let rect = info.inner_rect?;
    Some(WindowGeometry::new(
        state,
        rect.width().max(0.0).round() as u32,
        rect.height().max(0.0).round() as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(width: f32, height: f32) -> egui::ViewportInfo {
        egui::ViewportInfo {
            inner_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(width, height),
            )),
            ..Default::default()
        }
    }

    #[test]
    fn geometry_needs_an_inner_rect() {
        assert_eq!(window_geometry(&egui::ViewportInfo::default()), None);
    }

    #[test]
    fn minimized_wins_over_maximized() {
        let mut info = viewport(0.0, 0.0);
        info.minimized = Some(true);
        info.maximized = Some(true);

        let geometry = window_geometry(&info).unwrap();
        assert_eq!(geometry.state, WindowState::Minimized);
    }

    #[test]
    fn sizes_are_rounded_points() {
        let mut info = viewport(1023.6, 719.4);
        info.maximized = Some(true);

        assert_eq!(
            window_geometry(&info),
            Some(WindowGeometry::new(WindowState::Maximized, 1024, 719))
        );
    }
}
