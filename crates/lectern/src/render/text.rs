use eframe::egui::{self, Color32, FontFamily, FontId, Pos2};

use crate::parser::Inline;
use crate::theme::Theme;

/// Create a LayoutJob from inline spans.
pub fn inlines_to_job(
    inlines: &[Inline],
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    job.wrap.max_width = max_width;
    for inline in inlines {
        match inline {
            Inline::Text(text) => {
                job.append(
                    text,
                    0.0,
                    egui::text::TextFormat {
                        font_id: FontId::new(font_size, FontFamily::Proportional),
                        color,
                        ..Default::default()
                    },
                );
            }
            Inline::Bold(text) => {
                job.append(
                    text,
                    0.0,
                    egui::text::TextFormat {
                        font_id: FontId::new(font_size + 1.0, FontFamily::Proportional),
                        color,
                        ..Default::default()
                    },
                );
            }
            Inline::Italic(text) => {
                job.append(
                    text,
                    0.0,
                    egui::text::TextFormat {
                        font_id: FontId::new(font_size, FontFamily::Proportional),
                        color,
                        italics: true,
                        ..Default::default()
                    },
                );
            }
            Inline::Code(text) => {
                job.append(
                    text,
                    0.0,
                    egui::text::TextFormat {
                        font_id: FontId::new(font_size * 0.85, FontFamily::Monospace),
                        color,
                        background: Color32::from_rgba_unmultiplied(128, 128, 128, 30),
                        ..Default::default()
                    },
                );
            }
        }
    }
    job
}

/// Layout and paint inlines, returning the height used.
pub fn draw_inlines(
    ui: &egui::Ui,
    inlines: &[Inline],
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let job = inlines_to_job(inlines, font_size, color, max_width);
    let galley = ui.painter().layout_job(job);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Draw a heading block. Returns height used.
pub fn draw_heading(
    ui: &egui::Ui,
    inlines: &[Inline],
    level: u8,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let size = theme.heading_size(level) * scale;
    draw_inlines(ui, inlines, pos, size, theme.heading_color, max_width)
}

/// Draw a bulleted or numbered list. Returns height used.
pub fn draw_list(
    ui: &egui::Ui,
    items: &[Vec<Inline>],
    ordered: bool,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let font_size = theme.body_size * scale;
    let indent = font_size * 1.4;
    let gap = font_size * 0.35;
    let mut y = pos.y;

    for (index, item) in items.iter().enumerate() {
        let marker = if ordered {
            format!("{}.", index + 1)
        } else {
            "\u{2022}".to_string()
        };
        let marker_galley = ui.painter().layout_no_wrap(
            marker,
            FontId::new(font_size, FontFamily::Proportional),
            theme.accent,
        );
        ui.painter()
            .galley(Pos2::new(pos.x, y), marker_galley, theme.accent);

        let height = draw_inlines(
            ui,
            item,
            Pos2::new(pos.x + indent, y),
            font_size,
            theme.foreground,
            max_width - indent,
        );
        y += height + gap;
    }
    y - pos.y
}

/// Draw a code block with a filled background panel. Returns height used.
pub fn draw_code(
    ui: &egui::Ui,
    code: &str,
    language: Option<&str>,
    theme: &Theme,
    pos: Pos2,
    max_width: f32,
    scale: f32,
) -> f32 {
    let font_size = theme.code_size * scale;
    let padding = font_size * 0.6;

    let job = super::syntax::highlight_job(
        code,
        language,
        theme.syntect_theme_name(),
        font_size,
        theme.code_foreground,
        max_width - padding * 2.0,
    );
    let galley = ui.painter().layout_job(job);
    let panel = egui::Rect::from_min_size(
        pos,
        egui::vec2(max_width, galley.rect.height() + padding * 2.0),
    );
    ui.painter()
        .rect_filled(panel, 6.0 * scale, theme.code_background);
    ui.painter().galley(
        Pos2::new(pos.x + padding, pos.y + padding),
        galley,
        theme.code_foreground,
    );
    panel.height()
}
