//! The deck controller: one state object, one update entry point.
//!
//! Every trigger in the app (keyboard, buttons, outline clicks, scroll,
//! viewport fullscreen changes) is turned into a [`DeckEvent`] and fed
//! through [`Controller::dispatch`]. The controller owns all mutable deck
//! state; the UI shell only executes the [`Effect`]s it hands back.

use crate::outline::{self, OutlineItem, SectionAnchor};
use crate::prefs::{self, PrefStore};

#[derive(Debug, Clone, PartialEq)]
pub enum DeckEvent {
    Next,
    Prev,
    First,
    Last,
    GoTo(usize),
    ToggleFullscreen,
    /// The environment reported a fullscreen change, whoever caused it.
    FullscreenChanged(bool),
    OutlineClicked(usize),
    /// Document view scrolled to the given offset (content coordinates).
    Scrolled(f32),
    ToggleTheme,
}

/// Side effects the UI shell must carry out after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestFullscreen(bool),
    ScrollToSection(usize),
}

/// Capability handle for the native fullscreen request. The shell's
/// implementation talks to the viewport; tests substitute a refusing one.
pub trait FullscreenHost {
    fn request(&mut self, on: bool) -> anyhow::Result<()>;
}

/// All mutable deck state. `current` is `None` in the document view (all
/// slides visible, scrolled) and `Some(index)` while presenting.
#[derive(Debug, Clone, Default)]
struct DeckState {
    slide_count: usize,
    current: Option<usize>,
    fullscreen: bool,
    dark_mode: bool,
    active_outline: Option<usize>,
}

pub struct Controller {
    state: DeckState,
    items: Vec<OutlineItem>,
    anchors: Vec<SectionAnchor>,
    prefs: Box<dyn PrefStore>,
}

impl Controller {
    /// Bind to the environment once: capture the outline and read the
    /// persisted theme. Dark mode turns on only for the exact stored value
    /// `"enabled"`; anything else (including no entry) stays light.
    pub fn new(slide_count: usize, items: Vec<OutlineItem>, prefs: Box<dyn PrefStore>) -> Self {
        let dark_mode =
            prefs.get(prefs::DARK_MODE_KEY).as_deref() == Some(prefs::DARK_MODE_ENABLED);
        Self {
            state: DeckState {
                slide_count,
                dark_mode,
                ..DeckState::default()
            },
            items,
            anchors: Vec::new(),
            prefs,
        }
    }

    pub fn dispatch(&mut self, event: DeckEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            DeckEvent::GoTo(index) => self.go_to(index),
            DeckEvent::Next => {
                if let Some(index) = self.state.current {
                    if index + 1 < self.state.slide_count {
                        self.go_to(index + 1);
                    }
                }
            }
            DeckEvent::Prev => {
                if let Some(index) = self.state.current {
                    if index > 0 {
                        self.go_to(index - 1);
                    }
                }
            }
            DeckEvent::First => self.go_to(0),
            DeckEvent::Last => {
                if self.state.slide_count > 0 {
                    self.go_to(self.state.slide_count - 1);
                }
            }
            DeckEvent::ToggleFullscreen => {
                if self.state.fullscreen {
                    self.state.fullscreen = false;
                    self.state.current = None;
                    effects.push(Effect::RequestFullscreen(false));
                } else {
                    // Optimistic: the flag is set before the request resolves
                    // and is not rolled back on refusal. The viewport sync
                    // pass corrects any drift.
                    self.state.fullscreen = true;
                    effects.push(Effect::RequestFullscreen(true));
                    self.go_to(0);
                }
            }
            DeckEvent::FullscreenChanged(active) => {
                if !active && self.state.fullscreen {
                    self.state.fullscreen = false;
                    self.state.current = None;
                }
            }
            DeckEvent::OutlineClicked(index) => {
                if !self.state.fullscreen && index < self.items.len() {
                    self.state.active_outline = Some(index);
                    effects.push(Effect::ScrollToSection(index));
                }
            }
            DeckEvent::Scrolled(scroll_y) => {
                if !self.state.fullscreen {
                    let id = outline::section_at(&self.anchors, scroll_y).map(str::to_owned);
                    self.state.active_outline = id.and_then(|id| {
                        self.items.iter().position(|item| item.target == id)
                    });
                }
            }
            DeckEvent::ToggleTheme => {
                self.state.dark_mode = !self.state.dark_mode;
                let value = if self.state.dark_mode {
                    prefs::DARK_MODE_ENABLED
                } else {
                    prefs::DARK_MODE_DISABLED
                };
                self.prefs.set(prefs::DARK_MODE_KEY, value);
            }
        }
        effects
    }

    /// Bounds-checked transition. Out-of-range indices are ignored; a valid
    /// index becomes the single active slide and re-marks the outline by
    /// position.
    fn go_to(&mut self, index: usize) {
        if index >= self.state.slide_count {
            return;
        }
        self.state.current = Some(index);
        self.state.active_outline = (index < self.items.len()).then_some(index);
    }

    /// Section positions for the scroll highlighter, measured by the view.
    pub fn set_section_anchors(&mut self, anchors: Vec<SectionAnchor>) {
        self.anchors = anchors;
    }

    /// Swap in a freshly parsed deck (live reload), clamping state that no
    /// longer fits.
    pub fn replace_outline(&mut self, items: Vec<OutlineItem>, slide_count: usize) {
        self.items = items;
        self.state.slide_count = slide_count;
        if slide_count == 0 {
            self.state.current = None;
        } else if let Some(index) = self.state.current {
            self.state.current = Some(index.min(slide_count - 1));
        }
        if self
            .state
            .active_outline
            .is_some_and(|index| index >= self.items.len())
        {
            self.state.active_outline = None;
        }
        self.anchors.clear();
    }

    pub fn slide_count(&self) -> usize {
        self.state.slide_count
    }

    pub fn current(&self) -> Option<usize> {
        self.state.current
    }

    pub fn fullscreen(&self) -> bool {
        self.state.fullscreen
    }

    pub fn dark_mode(&self) -> bool {
        self.state.dark_mode
    }

    pub fn active_outline(&self) -> Option<usize> {
        self.state.active_outline
    }

    pub fn outline(&self) -> &[OutlineItem] {
        &self.items
    }

    pub fn prev_enabled(&self) -> bool {
        matches!(self.state.current, Some(index) if index > 0)
    }

    pub fn next_enabled(&self) -> bool {
        matches!(self.state.current, Some(index) if index + 1 < self.state.slide_count)
    }

    /// `"{index+1} / {count}"` for the slide counter, when presenting.
    pub fn counter_text(&self) -> Option<String> {
        self.state
            .current
            .map(|index| format!("{} / {}", index + 1, self.state.slide_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;

    fn items(n: usize) -> Vec<OutlineItem> {
        (0..n)
            .map(|i| OutlineItem {
                target: format!("section-{i}"),
                label: format!("Section {i}"),
            })
            .collect()
    }

    fn controller(n: usize) -> Controller {
        Controller::new(n, items(n), Box::new(MemoryPrefs::default()))
    }

    fn presenting(n: usize) -> Controller {
        let mut ctl = controller(n);
        ctl.dispatch(DeckEvent::ToggleFullscreen);
        ctl
    }

    #[test]
    fn initial_index_is_unset() {
        let ctl = controller(5);
        assert_eq!(ctl.current(), None);
        assert!(!ctl.fullscreen());
        assert_eq!(ctl.counter_text(), None);
    }

    #[test]
    fn go_to_out_of_range_is_a_no_op() {
        let mut ctl = presenting(5);
        ctl.dispatch(DeckEvent::GoTo(2));
        ctl.dispatch(DeckEvent::GoTo(5));
        assert_eq!(ctl.current(), Some(2));
        ctl.dispatch(DeckEvent::GoTo(usize::MAX));
        assert_eq!(ctl.current(), Some(2));
    }

    #[test]
    fn go_to_updates_counter_and_affordances() {
        let mut ctl = presenting(4);
        ctl.dispatch(DeckEvent::GoTo(2));
        assert_eq!(ctl.counter_text().as_deref(), Some("3 / 4"));
        assert!(ctl.prev_enabled());
        assert!(ctl.next_enabled());
        assert_eq!(ctl.active_outline(), Some(2));
    }

    #[test]
    fn prev_disabled_at_first_next_disabled_at_last() {
        let mut ctl = presenting(3);
        assert!(!ctl.prev_enabled());
        assert!(ctl.next_enabled());
        ctl.dispatch(DeckEvent::Last);
        assert!(ctl.prev_enabled());
        assert!(!ctl.next_enabled());
    }

    #[test]
    fn next_and_prev_are_idempotent_at_boundaries() {
        let mut ctl = presenting(3);
        ctl.dispatch(DeckEvent::Prev);
        assert_eq!(ctl.current(), Some(0));
        ctl.dispatch(DeckEvent::Last);
        ctl.dispatch(DeckEvent::Next);
        assert_eq!(ctl.current(), Some(2));
    }

    #[test]
    fn next_walks_forward() {
        let mut ctl = presenting(3);
        ctl.dispatch(DeckEvent::Next);
        assert_eq!(ctl.current(), Some(1));
        ctl.dispatch(DeckEvent::Next);
        assert_eq!(ctl.current(), Some(2));
    }

    #[test]
    fn entering_fullscreen_forces_first_slide() {
        let mut ctl = controller(5);
        let effects = ctl.dispatch(DeckEvent::ToggleFullscreen);
        assert!(ctl.fullscreen());
        assert_eq!(ctl.current(), Some(0));
        assert!(effects.contains(&Effect::RequestFullscreen(true)));

        // Again from a later slide.
        ctl.dispatch(DeckEvent::GoTo(4));
        ctl.dispatch(DeckEvent::ToggleFullscreen);
        ctl.dispatch(DeckEvent::ToggleFullscreen);
        assert_eq!(ctl.current(), Some(0));
    }

    #[test]
    fn environment_exit_resets_flag_by_any_channel() {
        let mut ctl = presenting(3);
        ctl.dispatch(DeckEvent::FullscreenChanged(false));
        assert!(!ctl.fullscreen());
        assert_eq!(ctl.current(), None);
    }

    #[test]
    fn fullscreen_enter_notification_is_ignored() {
        let mut ctl = controller(3);
        ctl.dispatch(DeckEvent::FullscreenChanged(true));
        assert!(!ctl.fullscreen());
    }

    #[test]
    fn refused_request_leaves_flag_set_until_sync() {
        struct RefusingHost;
        impl FullscreenHost for RefusingHost {
            fn request(&mut self, _on: bool) -> anyhow::Result<()> {
                anyhow::bail!("denied by platform")
            }
        }

        let mut ctl = controller(3);
        let effects = ctl.dispatch(DeckEvent::ToggleFullscreen);
        let mut host = RefusingHost;
        for effect in effects {
            if let Effect::RequestFullscreen(on) = effect {
                // The shell logs this; the flag stays optimistically set.
                assert!(host.request(on).is_err());
            }
        }
        assert!(ctl.fullscreen());
        // The viewport sync pass later reports no fullscreen target.
        ctl.dispatch(DeckEvent::FullscreenChanged(false));
        assert!(!ctl.fullscreen());
    }

    #[test]
    fn outline_click_marks_item_and_scrolls() {
        let mut ctl = controller(4);
        let effects = ctl.dispatch(DeckEvent::OutlineClicked(2));
        assert_eq!(ctl.active_outline(), Some(2));
        assert_eq!(effects, vec![Effect::ScrollToSection(2)]);
    }

    #[test]
    fn outline_click_suppressed_in_fullscreen() {
        let mut ctl = presenting(4);
        let effects = ctl.dispatch(DeckEvent::OutlineClicked(2));
        assert!(effects.is_empty());
        // Still the entry slide's outline item, not the clicked one.
        assert_eq!(ctl.active_outline(), Some(0));
    }

    #[test]
    fn scroll_updates_active_outline_by_id() {
        let mut ctl = controller(3);
        ctl.set_section_anchors(vec![
            SectionAnchor {
                id: "section-0".to_string(),
                top: 0.0,
            },
            SectionAnchor {
                id: "section-1".to_string(),
                top: 800.0,
            },
            SectionAnchor {
                id: "section-2".to_string(),
                top: 1600.0,
            },
        ]);
        ctl.dispatch(DeckEvent::Scrolled(900.0));
        assert_eq!(ctl.active_outline(), Some(1));
        ctl.dispatch(DeckEvent::Scrolled(0.0));
        assert_eq!(ctl.active_outline(), Some(0));
    }

    #[test]
    fn scroll_is_a_no_op_in_fullscreen() {
        let mut ctl = presenting(3);
        ctl.set_section_anchors(vec![SectionAnchor {
            id: "section-2".to_string(),
            top: 0.0,
        }]);
        ctl.dispatch(DeckEvent::Scrolled(5000.0));
        assert_eq!(ctl.active_outline(), Some(0));
    }

    #[test]
    fn theme_toggle_persists_exact_strings_and_is_involutive() {
        let mut ctl = controller(1);
        assert!(!ctl.dark_mode());
        ctl.dispatch(DeckEvent::ToggleTheme);
        assert!(ctl.dark_mode());
        assert_eq!(
            ctl.prefs.get(prefs::DARK_MODE_KEY).as_deref(),
            Some("enabled")
        );
        ctl.dispatch(DeckEvent::ToggleTheme);
        assert!(!ctl.dark_mode());
        assert_eq!(
            ctl.prefs.get(prefs::DARK_MODE_KEY).as_deref(),
            Some("disabled")
        );
    }

    #[test]
    fn dark_mode_initialization_requires_exact_match() {
        for (stored, expected) in [
            (Some("enabled"), true),
            (Some("disabled"), false),
            (Some("true"), false),
            (Some(""), false),
            (Some("Enabled"), false),
            (None, false),
        ] {
            let mut prefs = MemoryPrefs::default();
            if let Some(value) = stored {
                prefs.set(prefs::DARK_MODE_KEY, value);
            }
            let ctl = Controller::new(1, items(1), Box::new(prefs));
            assert_eq!(ctl.dark_mode(), expected, "stored value {stored:?}");
        }
    }

    #[test]
    fn empty_deck_tolerates_navigation() {
        let mut ctl = controller(0);
        ctl.dispatch(DeckEvent::GoTo(0));
        ctl.dispatch(DeckEvent::Next);
        ctl.dispatch(DeckEvent::First);
        ctl.dispatch(DeckEvent::Last);
        assert_eq!(ctl.current(), None);
        assert_eq!(ctl.counter_text(), None);
    }

    #[test]
    fn reload_clamps_current_and_outline() {
        let mut ctl = presenting(5);
        ctl.dispatch(DeckEvent::Last);
        ctl.replace_outline(items(2), 2);
        assert_eq!(ctl.current(), Some(1));
        assert_eq!(ctl.slide_count(), 2);
    }
}
