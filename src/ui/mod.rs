//! Stateless helpers that turn display blocks into egui widgets.

use eframe::egui;
use folio_view::dom::Block;

const NOTICE_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 60, 60);

/// Render article blocks top to bottom.
pub fn render_blocks(ui: &mut egui::Ui, blocks: &[Block]) {
    for block in blocks {
        render_block(ui, block);
    }
}

fn render_block(ui: &mut egui::Ui, block: &Block) {
    match block {
        Block::Heading { level, text } => {
            let (size, gap) = match level {
                1 => (26.0, 8.0),
                2 => (22.0, 6.0),
                _ => (18.0, 4.0),
            };
            ui.heading(egui::RichText::new(text).size(size).strong());
            ui.add_space(gap);
        }
        Block::Paragraph(text) => {
            ui.label(text);
            ui.add_space(8.0);
        }
        Block::Byline(text) => {
            ui.label(egui::RichText::new(text).italics().weak());
        }
        Block::Tags(tags) => {
            ui.horizontal_wrapped(|ui| {
                for tag in tags {
                    ui.label(
                        egui::RichText::new(format!("#{}", tag))
                            .small()
                            .color(egui::Color32::from_rgb(0, 100, 200)),
                    );
                }
            });
            ui.add_space(6.0);
        }
        Block::ListItem(text) => {
            ui.horizontal_wrapped(|ui| {
                ui.label("  \u{2022}");
                ui.label(text);
            });
        }
        Block::Code(code) => {
            egui::Frame::none()
                .fill(ui.visuals().extreme_bg_color)
                .inner_margin(egui::Margin::same(6.0))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(code).monospace());
                });
            ui.add_space(8.0);
        }
        Block::Quote(text) => {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new("\u{2503}").weak());
                ui.label(egui::RichText::new(text).italics());
            });
            ui.add_space(8.0);
        }
        Block::Image { alt, src } => {
            let label = if alt.is_empty() { src } else { alt };
            ui.colored_label(egui::Color32::GRAY, format!("[Image: {}]", label))
                .on_hover_text(src);
        }
        Block::Rule => {
            ui.separator();
        }
        Block::Notice(text) => {
            ui.colored_label(NOTICE_COLOR, text);
        }
    }
}

/// Notice line shared by the articles panel and article panels.
pub fn notice(ui: &mut egui::Ui, text: &str) {
    ui.colored_label(NOTICE_COLOR, text);
}
