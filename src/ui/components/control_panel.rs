//! Side panel with session controls
//!
//! Status line, narration progress, model and voice selectors, sampling
//! and speed sliders, and the system prompt editor.

use crate::ui::state::UiState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct ControlPanel<'a> {
    state: &'a mut UiState,
    theme: &'a Theme,
}

impl<'a> ControlPanel<'a> {
    pub fn new(state: &'a mut UiState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.show_status(ui);
                ui.add_space(self.theme.spacing);

                self.show_narration_progress(ui);
                ui.add_space(self.theme.spacing);

                self.show_selectors(ui);
                ui.add_space(self.theme.spacing);

                self.show_sliders(ui);
                ui.add_space(self.theme.spacing);

                self.show_prompt_editor(ui);
            });
    }

    fn show_status(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Status")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.label(
            RichText::new(&self.state.status)
                .size(13.0)
                .color(self.theme.text_secondary),
        );

        if let Some(error) = &self.state.last_error {
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(error)
                    .size(12.0)
                    .color(self.theme.error),
            );
        }
    }

    /// Sentences of the current reply, spoken ones dimmed, the one being
    /// narrated highlighted.
    fn show_narration_progress(&mut self, ui: &mut egui::Ui) {
        let (spoken, total) = self.state.narration_progress();
        if total == 0 {
            return;
        }

        ui.label(
            RichText::new(format!("Narration {}/{}", spoken.min(total), total))
                .size(12.0)
                .color(self.theme.text_muted),
        );

        let buffered = self.state.audio_queue.total_duration_secs();
        if buffered > 0.0 {
            ui.label(
                RichText::new(format!("{buffered:.1}s of audio buffered"))
                    .size(12.0)
                    .color(self.theme.text_muted),
            );
        }

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                for (i, sentence) in self.state.sentences.iter().enumerate() {
                    let color = if i < spoken {
                        self.theme.text_muted
                    } else if i == spoken && self.state.narrating {
                        self.theme.narration_current
                    } else {
                        self.theme.narration_pending
                    };
                    ui.label(RichText::new(sentence).size(12.0).color(color));
                }
            });
    }

    fn show_selectors(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Model")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        let mut selected_model = self.state.model.clone();
        egui::ComboBox::from_id_salt("model_selector")
            .selected_text(&selected_model)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for name in &self.state.models {
                    ui.selectable_value(&mut selected_model, name.clone(), name);
                }
            });
        if selected_model != self.state.model {
            self.state.change_model(&selected_model);
        }

        ui.add_space(self.theme.spacing_sm);

        ui.label(
            RichText::new("Voice")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        let mut selected_voice = self.state.voice.clone();
        egui::ComboBox::from_id_salt("voice_selector")
            .selected_text(&selected_voice)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for name in &self.state.voices {
                    ui.selectable_value(&mut selected_voice, name.clone(), name);
                }
            });
        if selected_voice != self.state.voice {
            self.state.change_voice(&selected_voice);
        }
    }

    fn show_sliders(&mut self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("Temperature")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.add(egui::Slider::new(&mut self.state.temperature, 0.1..=1.0).step_by(0.05));

        ui.add_space(self.theme.spacing_sm);

        ui.label(
            RichText::new("Speed")
                .size(12.0)
                .color(self.theme.text_muted),
        );
        ui.add(egui::Slider::new(&mut self.state.speed, 0.75..=2.0).step_by(0.05));
    }

    fn show_prompt_editor(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("System prompt")
            .default_open(false)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.state.system_prompt)
                        .desired_rows(6)
                        .desired_width(ui.available_width())
                        .font(egui::TextStyle::Small),
                );

                ui.add_space(self.theme.spacing_sm);

                if ui
                    .button("Apply prompt")
                    .on_hover_text("Restarts the conversation with the new prompt")
                    .clicked()
                {
                    self.state.apply_system_prompt();
                }
            });
    }
}
