use super::inline::{self, Inline};

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },
    CodeBlock {
        language: Option<String>,
        code: String,
    },
}

/// Parse one slide's raw markdown into blocks.
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut list_items: Vec<Vec<Inline>> = Vec::new();
    let mut list_ordered = false;

    fn flush_paragraph(paragraph: &mut Vec<String>, blocks: &mut Vec<Block>) {
        if !paragraph.is_empty() {
            let text = paragraph.join(" ");
            blocks.push(Block::Paragraph {
                inlines: inline::parse(&text),
            });
            paragraph.clear();
        }
    }

    fn flush_list(items: &mut Vec<Vec<Inline>>, ordered: bool, blocks: &mut Vec<Block>) {
        if !items.is_empty() {
            blocks.push(Block::List {
                ordered,
                items: std::mem::take(items),
            });
        }
    }

    let mut lines = content.lines().peekable();
    while let Some(line) = lines.next() {
        let trimmed = line.trim();

        // Fenced code block: consume until the closing fence.
        if let Some(fence_rest) = trimmed.strip_prefix("```") {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, list_ordered, &mut blocks);
            let language = {
                let lang = fence_rest.trim();
                (!lang.is_empty()).then(|| lang.to_string())
            };
            let mut code_lines = Vec::new();
            for code_line in lines.by_ref() {
                if code_line.trim().starts_with("```") {
                    break;
                }
                code_lines.push(code_line);
            }
            blocks.push(Block::CodeBlock {
                language,
                code: code_lines.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, list_ordered, &mut blocks);
            continue;
        }

        if let Some(heading) = parse_heading(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_list(&mut list_items, list_ordered, &mut blocks);
            blocks.push(heading);
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            flush_paragraph(&mut paragraph, &mut blocks);
            if !list_items.is_empty() && list_ordered {
                flush_list(&mut list_items, list_ordered, &mut blocks);
            }
            list_ordered = false;
            list_items.push(inline::parse(item.trim()));
            continue;
        }

        if let Some(item) = ordered_item(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            if !list_items.is_empty() && !list_ordered {
                flush_list(&mut list_items, list_ordered, &mut blocks);
            }
            list_ordered = true;
            list_items.push(inline::parse(item));
            continue;
        }

        flush_list(&mut list_items, list_ordered, &mut blocks);
        paragraph.push(trimmed.to_string());
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut list_items, list_ordered, &mut blocks);
    blocks
}

fn parse_heading(line: &str) -> Option<Block> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let rest = line[hashes..].strip_prefix(' ')?;
    Some(Block::Heading {
        level: hashes as u8,
        inlines: inline::parse(rest.trim()),
    })
}

fn ordered_item(line: &str) -> Option<&str> {
    let dot = line.find(". ")?;
    line[..dot]
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| line[dot + 2..].trim())
        .filter(|_| dot > 0)
}
