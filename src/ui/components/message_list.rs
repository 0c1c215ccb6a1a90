//! Conversation view
//!
//! Renders the message log as chat bubbles, newest at the bottom.

use crate::messages::{ChatMessage, Role};
use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, Align, Color32, RichText};

pub struct MessageList<'a> {
    state: &'a UiState,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(state: &'a UiState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let messages = self.state.session.message_log().snapshot();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing);

                    if messages.is_empty() {
                        self.show_empty_state(ui);
                    } else {
                        for message in &messages {
                            self.show_message(ui, message);
                            ui.add_space(self.theme.spacing_sm);
                        }
                    }

                    ui.add_space(self.theme.spacing);
                });
            });
    }

    fn show_empty_state(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);

            ui.label(
                RichText::new("Parley")
                    .size(24.0)
                    .color(self.theme.text_primary),
            );

            ui.add_space(self.theme.spacing);

            ui.label(
                RichText::new("Ask a question below. Replies are read aloud sentence by sentence.")
                    .size(14.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &ChatMessage) {
        let is_user = message.role == Role::User;
        let bubble_color = if is_user {
            self.theme.user_bubble
        } else {
            self.theme.assistant_bubble
        };
        let text_color = if is_user {
            Color32::WHITE
        } else {
            self.theme.text_primary
        };
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(
                RichText::new(if is_user { "You" } else { "Parley" })
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            ui.add_space(2.0);

            let max_width = ui.available_width() * 0.75;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(&message.content).color(text_color));
                });

            let time_str = message.timestamp.format("%H:%M").to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }
}
