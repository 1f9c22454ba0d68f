use regex::Regex;
use std::sync::OnceLock;

/// Inline span within a block. Kept flat: lecture decks rarely nest emphasis,
/// and the renderer treats each span independently.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
}

fn span_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(`[^`]+`|\*\*[^*]+\*\*|\*[^*]+\*)").unwrap()
    })
}

/// Parse a line of text into inline spans.
pub fn parse(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;
    for found in span_pattern().find_iter(text) {
        if found.start() > last {
            inlines.push(Inline::Text(text[last..found.start()].to_string()));
        }
        let token = found.as_str();
        if let Some(code) = token.strip_prefix('`').and_then(|t| t.strip_suffix('`')) {
            inlines.push(Inline::Code(code.to_string()));
        } else if let Some(bold) = token.strip_prefix("**").and_then(|t| t.strip_suffix("**")) {
            inlines.push(Inline::Bold(bold.to_string()));
        } else if let Some(italic) = token.strip_prefix('*').and_then(|t| t.strip_suffix('*')) {
            inlines.push(Inline::Italic(italic.to_string()));
        }
        last = found.end();
    }
    if last < text.len() {
        inlines.push(Inline::Text(text[last..].to_string()));
    }
    inlines
}

/// Plain text of a span sequence, markers stripped.
pub fn to_text(inlines: &[Inline]) -> String {
    let mut text = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) | Inline::Code(s) => {
                text.push_str(s);
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(parse("hello"), vec![Inline::Text("hello".to_string())]);
    }

    #[test]
    fn mixed_spans() {
        let inlines = parse("use **bold** and `code` here");
        assert_eq!(
            inlines,
            vec![
                Inline::Text("use ".to_string()),
                Inline::Bold("bold".to_string()),
                Inline::Text(" and ".to_string()),
                Inline::Code("code".to_string()),
                Inline::Text(" here".to_string()),
            ]
        );
    }

    #[test]
    fn italic_is_single_star() {
        assert_eq!(
            parse("*soft*"),
            vec![Inline::Italic("soft".to_string())]
        );
    }

    #[test]
    fn to_text_strips_markers() {
        assert_eq!(to_text(&parse("a **b** `c`")), "a b c");
    }
}
