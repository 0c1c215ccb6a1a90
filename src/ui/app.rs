//! Main application struct and eframe integration

use crate::ui::components::{ControlPanel, InputBar, MessageList};
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

/// Main Parley application
pub struct ParleyApp {
    state: UiState,
    theme: Theme,
}

impl ParleyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, state: UiState) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        Self { state, theme }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Parley")
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Spoken Chat")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🗑").on_hover_text("Clear conversation").clicked() {
                            self.state.clear_session();
                        }
                    });
                });
            });
    }

    fn show_control_panel(&mut self, ctx: &egui::Context) {
        SidePanel::right("control_panel")
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .max_width(420.0)
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                ControlPanel::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_input_area(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("input_area")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                InputBar::new(&mut self.state, &self.theme).show(ui);
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary))
            .show(ctx, |ui| {
                MessageList::new(&self.state, &self.theme).show(ui);
            });
    }
}

impl eframe::App for ParleyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_events();

        self.show_header(ctx);
        self.show_control_panel(ctx);
        self.show_input_area(ctx);
        self.show_content(ctx);

        // Keep polling for worker events while a turn is in flight
        if self.state.narrating || !self.state.audio_queue.is_empty() {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
