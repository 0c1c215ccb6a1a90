//! Query input bar
//!
//! Text input with a send button that doubles as the interrupt control
//! while a reply is being narrated.

use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, Key, RichText, Vec2};

pub struct InputBar<'a> {
    state: &'a mut UiState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut UiState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                });
            });
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let available_width = ui.available_width() - 60.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
            .hint_text("Ask something...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add(text_edit);

        if response.has_focus() && !self.state.input_text.trim().is_empty() {
            let enter_pressed = ui.input(|i| i.key_pressed(Key::Enter));
            let shift_held = ui.input(|i| i.modifiers.shift);
            if enter_pressed && !shift_held {
                self.state.submit_query();
            }
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let narrating = self.state.narrating;
        let can_send = !self.state.input_text.trim().is_empty();

        let (icon, tooltip) = if narrating {
            ("⏹", "Stop narration")
        } else {
            ("➤", "Send (Enter)")
        };

        let button_color = if can_send || narrating {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new(icon).size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add_enabled(can_send || narrating, button);

        if response.clicked() {
            if narrating {
                self.state.interrupt();
            } else {
                self.state.submit_query();
            }
        }

        response.on_hover_text(tooltip);
    }
}
