pub mod syntax;
pub mod text;

use eframe::egui;

use crate::parser::{Block, Slide};
use crate::theme::Theme;

// Document-view font sizes, independent of presentation scaling.
const DOC_BODY_SIZE: f32 = 16.0;
const DOC_CODE_SIZE: f32 = 13.0;

/// Render a single slide into `rect` for presentation mode.
pub fn render_slide(ui: &egui::Ui, slide: &Slide, theme: &Theme, rect: egui::Rect, scale: f32) {
    if slide.is_divider() {
        render_divider(ui, slide, theme, rect, scale);
        return;
    }

    let padding = 80.0 * scale;
    let max_width = rect.width() - padding * 2.0;
    let x = rect.left() + padding;
    let mut y = rect.top() + padding;

    for block in &slide.blocks {
        if y > rect.bottom() - padding {
            break;
        }
        let pos = egui::pos2(x, y);
        let height = match block {
            Block::Heading { level, inlines } => {
                text::draw_heading(ui, inlines, *level, theme, pos, max_width, scale)
                    + 28.0 * scale
            }
            Block::Paragraph { inlines } => {
                text::draw_inlines(
                    ui,
                    inlines,
                    pos,
                    theme.body_size * scale,
                    theme.foreground,
                    max_width,
                ) + 20.0 * scale
            }
            Block::List { ordered, items } => {
                text::draw_list(ui, items, *ordered, theme, pos, max_width, scale) + 20.0 * scale
            }
            Block::CodeBlock { language, code } => {
                text::draw_code(ui, code, language.as_deref(), theme, pos, max_width, scale)
                    + 20.0 * scale
            }
        };
        y += height;
    }
}

/// A slide that is only a heading gets centered section-divider treatment.
fn render_divider(ui: &egui::Ui, slide: &Slide, theme: &Theme, rect: egui::Rect, scale: f32) {
    let Some(Block::Heading { inlines, .. }) = slide.blocks.first() else {
        return;
    };
    let job = text::inlines_to_job(
        inlines,
        theme.h1_size * scale,
        theme.heading_color,
        rect.width() * 0.8,
    );
    let galley = ui.painter().layout_job(job);
    let pos = egui::pos2(
        rect.center().x - galley.rect.width() / 2.0,
        rect.center().y - galley.rect.height() / 2.0,
    );
    ui.painter().galley(pos, galley, theme.heading_color);
}

/// Widget-based slide rendering for the scrollable document view.
pub fn show_slide_card(ui: &mut egui::Ui, slide: &Slide, theme: &Theme) {
    for block in &slide.blocks {
        match block {
            Block::Heading { level, inlines } => {
                let size = match level {
                    1 => 28.0,
                    2 => 22.0,
                    _ => 18.0,
                };
                let job = text::inlines_to_job(
                    inlines,
                    size,
                    ui.visuals().strong_text_color(),
                    ui.available_width(),
                );
                ui.add(egui::Label::new(job));
                ui.add_space(8.0);
            }
            Block::Paragraph { inlines } => {
                let job = text::inlines_to_job(
                    inlines,
                    DOC_BODY_SIZE,
                    ui.visuals().text_color(),
                    ui.available_width(),
                );
                ui.add(egui::Label::new(job));
                ui.add_space(6.0);
            }
            Block::List { ordered, items } => {
                for (index, item) in items.iter().enumerate() {
                    ui.horizontal_top(|ui| {
                        let marker = if *ordered {
                            format!("{}.", index + 1)
                        } else {
                            "\u{2022}".to_string()
                        };
                        ui.label(marker);
                        let job = text::inlines_to_job(
                            item,
                            DOC_BODY_SIZE,
                            ui.visuals().text_color(),
                            ui.available_width(),
                        );
                        ui.add(egui::Label::new(job));
                    });
                }
                ui.add_space(6.0);
            }
            Block::CodeBlock { language, code } => {
                egui::Frame::new()
                    .fill(theme.code_background)
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        let job = syntax::highlight_job(
                            code,
                            language.as_deref(),
                            theme.syntect_theme_name(),
                            DOC_CODE_SIZE,
                            theme.code_foreground,
                            ui.available_width(),
                        );
                        ui.add(egui::Label::new(job));
                    });
                ui.add_space(6.0);
            }
        }
    }
}
