use serde::Deserialize;

/// Deck-level metadata from the leading YAML frontmatter block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    pub title: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    pub theme: Option<String>,
    pub footer: Option<String>,
}

impl DeckMeta {
    /// Author and date joined for display, when either is present.
    pub fn byline(&self) -> Option<String> {
        let parts: Vec<&str> = [self.author.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        (!parts.is_empty()).then(|| parts.join(" \u{00B7} "))
    }
}

/// Split a document into frontmatter metadata and body. A document without a
/// leading `---` fence is all body; malformed YAML degrades to empty meta.
pub fn extract(content: &str) -> (DeckMeta, String) {
    let normalized = content.replace("\r\n", "\n");
    let Some(rest) = normalized.strip_prefix("---\n") else {
        return (DeckMeta::default(), normalized);
    };
    let Some(end) = rest.find("\n---") else {
        return (DeckMeta::default(), normalized);
    };
    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches('\n');
    let meta = serde_yaml::from_str(yaml).unwrap_or_default();
    (meta, body.to_string())
}
