/// Split a document body (after frontmatter extraction) into raw slide
/// strings.
///
/// Three mechanisms create slide breaks:
/// 1. `---` with blank lines on both sides
/// 2. Three or more consecutive blank lines
/// 3. A `# ` heading when the current slide already has content
///
/// None of these apply inside fenced code blocks.
pub fn split(body: &str) -> Vec<String> {
    let normalized = body.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut slides: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut in_code = false;
    let mut blank_run = 0usize;

    fn flush(current: &mut Vec<&str>, slides: &mut Vec<String>) {
        let text = current.join("\n").trim().to_string();
        if !text.is_empty() {
            slides.push(text);
        }
        current.clear();
    }

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_code = !in_code;
        }

        if !in_code {
            if trimmed.is_empty() {
                blank_run += 1;
                if blank_run >= 3 {
                    flush(&mut current, &mut slides);
                    i += 1;
                    continue;
                }
            } else {
                blank_run = 0;
            }

            let prev_blank = current.last().is_none_or(|last| last.trim().is_empty());
            let next_blank = lines.get(i + 1).is_none_or(|next| next.trim().is_empty());
            if is_rule(trimmed) && prev_blank && next_blank {
                flush(&mut current, &mut slides);
                i += 1;
                continue;
            }

            if trimmed.starts_with("# ") && current.iter().any(|kept| !kept.trim().is_empty()) {
                flush(&mut current, &mut slides);
            }
        }

        current.push(line);
        i += 1;
    }
    flush(&mut current, &mut slides);

    slides
}

fn is_rule(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_separator_splits() {
        let slides = split("# One\n\n---\n\n# Two");
        assert_eq!(slides.len(), 2);
        assert_eq!(slides[0], "# One");
        assert_eq!(slides[1], "# Two");
    }

    #[test]
    fn blank_line_gap_splits() {
        let slides = split("# One\n\nContent\n\n\n\n# Two\n\nMore");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn heading_after_content_splits() {
        let slides = split("# First\n\nSome content\n\n# Second\n\nMore content");
        assert_eq!(slides.len(), 2);
        assert!(slides[1].starts_with("# Second"));
    }

    #[test]
    fn heading_without_prior_content_does_not_split() {
        let slides = split("# Hello World\n\nA subtitle here");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn separators_inside_code_fences_are_kept() {
        let slides = split("# Code\n\n```text\na\n\n---\n\nb\n```");
        assert_eq!(slides.len(), 1);
        assert!(slides[0].contains("---"));
    }

    #[test]
    fn dash_run_mid_paragraph_is_not_a_separator() {
        let slides = split("above\n---\nbelow");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn empty_body_yields_no_slides() {
        assert!(split("").is_empty());
        assert!(split("\n\n\n").is_empty());
    }
}
