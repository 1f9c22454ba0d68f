use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{Color32, FontFamily, FontId};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

fn syntax_set() -> &'static SyntaxSet {
    static SET: OnceLock<SyntaxSet> = OnceLock::new();
    SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static SET: OnceLock<ThemeSet> = OnceLock::new();
    SET.get_or_init(ThemeSet::load_defaults)
}

/// Highlight a code block into a monospace LayoutJob. Unknown languages and
/// highlighter errors fall back to plain text in the given color.
pub fn highlight_job(
    code: &str,
    language: Option<&str>,
    theme_name: &str,
    font_size: f32,
    fallback: Color32,
    max_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = max_width;
    let mono = FontId::new(font_size, FontFamily::Monospace);
    let plain = TextFormat {
        font_id: mono.clone(),
        color: fallback,
        ..Default::default()
    };

    let sets = syntax_set();
    let syntax = language
        .and_then(|lang| sets.find_syntax_by_token(lang))
        .unwrap_or_else(|| sets.find_syntax_plain_text());
    let Some(theme) = theme_set().themes.get(theme_name) else {
        job.append(code, 0.0, plain);
        return job;
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, sets) {
            Ok(ranges) => {
                for (style, text) in ranges {
                    let color = Color32::from_rgb(
                        style.foreground.r,
                        style.foreground.g,
                        style.foreground.b,
                    );
                    job.append(
                        text,
                        0.0,
                        TextFormat {
                            font_id: mono.clone(),
                            color,
                            ..Default::default()
                        },
                    );
                }
            }
            Err(_) => job.append(line, 0.0, plain.clone()),
        }
    }
    job
}
