//! Toolbar rendering for `FolioApp`.
//!
//! Draws the back/forward buttons, the fragment bar, a load indicator and
//! the dark-mode toggle.

use eframe::egui;
use folio_view::engine::tabs::ManifestStatus;

use super::FolioApp;

impl FolioApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            if ui
                .add_enabled(
                    self.history.can_go_back(),
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.go_back();
            }
            if ui
                .add_enabled(
                    self.history.can_go_forward(),
                    egui::Button::new("\u{25B6}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.go_forward();
            }

            ui.label(egui::RichText::new("#").monospace().weak());
            let response = ui.add_sized(
                [ui.available_width() - 120.0, 24.0],
                egui::TextEdit::singleline(&mut self.fragment_input)
                    .hint_text("articles/<id>")
                    .font(egui::TextStyle::Monospace),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.navigate();
            }
            if ui.button("Go").clicked() {
                self.navigate();
            }

            if let Some(session) = &self.session {
                if session.is_busy() {
                    ui.spinner();
                } else if session.manifest_status() == ManifestStatus::Failed {
                    let reason = session.manifest_error().unwrap_or_default();
                    ui.colored_label(egui::Color32::from_rgb(255, 80, 80), "\u{26A0}")
                        .on_hover_text(reason);
                }
            }

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });
    }
}
