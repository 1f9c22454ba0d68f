use anyhow::Result;
use eframe::egui;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::path::Path;
use std::sync::mpsc;
use std::time::Duration;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watches the deck file and wakes the UI when it changes on disk.
pub struct DeckWatcher {
    // Kept alive for the watch to stay registered.
    _debouncer: Debouncer<RecommendedWatcher>,
    rx: mpsc::Receiver<()>,
}

impl DeckWatcher {
    pub fn new(path: &Path, ctx: egui::Context) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            match result {
                Ok(_events) => {
                    let _ = tx.send(());
                    ctx.request_repaint();
                }
                Err(err) => log::warn!("deck watcher error: {err}"),
            }
        })?;
        debouncer
            .watcher()
            .watch(path, RecursiveMode::NonRecursive)?;
        Ok(Self {
            _debouncer: debouncer,
            rx,
        })
    }

    /// Drain pending change notifications; true if the file changed.
    pub fn take_change(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
