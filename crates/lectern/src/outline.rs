/// How far ahead of the scroll position a section may start and still count
/// as reached. Highlights flip slightly before the section top hits the
/// viewport edge.
pub const SCROLL_LOOKAHEAD: f32 = 100.0;

/// One entry in the outline sidebar: a link to a slide section.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineItem {
    /// Section id this item navigates to.
    pub target: String,
    /// Text shown in the sidebar.
    pub label: String,
}

/// A section's position in the document view, measured by the UI each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionAnchor {
    pub id: String,
    /// Top offset of the section in content coordinates.
    pub top: f32,
}

/// Which section the given scroll position is in.
///
/// Scans anchors in document order and keeps the last one whose top (minus
/// the lookahead) is at or above the scroll position. When several qualify,
/// the later section wins. Returns `None` when the scroll position is above
/// every section.
pub fn section_at(anchors: &[SectionAnchor], scroll_y: f32) -> Option<&str> {
    let mut current = None;
    for anchor in anchors {
        if scroll_y >= anchor.top - SCROLL_LOOKAHEAD {
            current = Some(anchor.id.as_str());
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchors() -> Vec<SectionAnchor> {
        vec![
            SectionAnchor {
                id: "intro".to_string(),
                top: 0.0,
            },
            SectionAnchor {
                id: "variables".to_string(),
                top: 600.0,
            },
            SectionAnchor {
                id: "loops".to_string(),
                top: 1400.0,
            },
        ]
    }

    #[test]
    fn picks_section_containing_scroll_position() {
        assert_eq!(section_at(&anchors(), 700.0), Some("variables"));
    }

    #[test]
    fn lookahead_flips_highlight_early() {
        // 1301 is within 100 units of the "loops" top at 1400.
        assert_eq!(section_at(&anchors(), 1301.0), Some("loops"));
        assert_eq!(section_at(&anchors(), 1299.0), Some("variables"));
    }

    #[test]
    fn later_section_wins_when_several_qualify() {
        let close = vec![
            SectionAnchor {
                id: "a".to_string(),
                top: 0.0,
            },
            SectionAnchor {
                id: "b".to_string(),
                top: 40.0,
            },
            SectionAnchor {
                id: "c".to_string(),
                top: 80.0,
            },
        ];
        assert_eq!(section_at(&close, 10.0), Some("c"));
    }

    #[test]
    fn none_above_first_section() {
        let below = vec![SectionAnchor {
            id: "only".to_string(),
            top: 500.0,
        }];
        assert_eq!(section_at(&below, 0.0), None);
    }

    #[test]
    fn empty_anchor_list() {
        assert_eq!(section_at(&[], 100.0), None);
    }
}
