use eframe::egui;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::controller::{Controller, DeckEvent, Effect, FullscreenHost};
use crate::outline::{OutlineItem, SectionAnchor};
use crate::parser::{self, Deck};
use crate::prefs::{FilePrefs, PrefStore};
use crate::render;
use crate::score::{self, ExpertScore};
use crate::theme::Theme;
use crate::watcher::DeckWatcher;

const OUTLINE_PANEL_WIDTH: f32 = 220.0;
/// How long after sending a fullscreen request we wait before treating a
/// non-fullscreen viewport as an external exit.
const FULLSCREEN_GRACE: Duration = Duration::from_millis(800);
/// Scroll offset applied above a section when jumping to it from the outline.
const SECTION_JUMP_MARGIN: f32 = 12.0;

/// Viewport-backed fullscreen capability. `egui` viewport commands do not
/// report refusal; a platform that rejects the request surfaces through the
/// per-frame fullscreen sync instead.
struct ViewportHost<'a> {
    ctx: &'a egui::Context,
}

impl FullscreenHost for ViewportHost<'_> {
    fn request(&mut self, on: bool) -> anyhow::Result<()> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
        Ok(())
    }
}

#[derive(Default)]
struct ScoreInputs {
    languages: String,
    algorithms: String,
    data_structures: String,
}

struct DeckApp {
    deck: Deck,
    file_path: PathBuf,
    controller: Controller,
    watcher: Option<DeckWatcher>,
    score_inputs: ScoreInputs,
    score_result: Option<ExpertScore>,
    /// Section top offsets in content coordinates, measured last frame.
    section_tops: Vec<f32>,
    pending_scroll: Option<f32>,
    last_scroll_y: Option<f32>,
    fullscreen_requested_at: Option<Instant>,
}

impl DeckApp {
    fn new(
        file_path: PathBuf,
        deck: Deck,
        prefs: Box<dyn PrefStore>,
        ctx: &egui::Context,
    ) -> Self {
        let items = outline_items(&deck);
        let controller = Controller::new(deck.slides.len(), items, prefs);
        let watcher = match DeckWatcher::new(&file_path, ctx.clone()) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                log::warn!("live reload disabled: {err}");
                None
            }
        };
        Self {
            deck,
            file_path,
            controller,
            watcher,
            score_inputs: ScoreInputs::default(),
            score_result: None,
            section_tops: Vec::new(),
            pending_scroll: None,
            last_scroll_y: None,
            fullscreen_requested_at: None,
        }
    }

    fn display_title(&self) -> String {
        self.deck.meta.title.clone().unwrap_or_else(|| {
            self.file_path
                .file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string()
        })
    }

    /// Palette while presenting: a frontmatter `theme` wins; otherwise the
    /// persisted dark-mode preference decides, as in the document view.
    fn presentation_theme(&self) -> Theme {
        self.deck
            .meta
            .theme
            .as_deref()
            .and_then(Theme::named)
            .unwrap_or_else(|| Theme::from_dark_flag(self.controller.dark_mode()))
    }

    fn dispatch_all(&mut self, events: Vec<DeckEvent>, ctx: &egui::Context) {
        for event in events {
            let effects = self.controller.dispatch(event);
            self.execute_effects(effects, ctx);
        }
    }

    fn execute_effects(&mut self, effects: Vec<Effect>, ctx: &egui::Context) {
        for effect in effects {
            match effect {
                Effect::RequestFullscreen(on) => {
                    let mut host = ViewportHost { ctx };
                    if let Err(err) = host.request(on) {
                        log::warn!("fullscreen request rejected: {err:#}");
                    }
                    if on {
                        self.fullscreen_requested_at = Some(Instant::now());
                    }
                }
                Effect::ScrollToSection(index) => {
                    self.pending_scroll = self
                        .section_tops
                        .get(index)
                        .map(|top| (top - SECTION_JUMP_MARGIN).max(0.0));
                }
            }
        }
    }

    fn reload(&mut self) {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => {
                let deck = parser::parse(&content);
                if deck.slides.is_empty() {
                    log::warn!("reload skipped: no slides in {}", self.file_path.display());
                    return;
                }
                self.controller
                    .replace_outline(outline_items(&deck), deck.slides.len());
                self.section_tops.clear();
                self.deck = deck;
                log::info!("reloaded {}", self.file_path.display());
            }
            Err(err) => log::warn!("reload failed: {err}"),
        }
    }

    fn show_document(&mut self, ctx: &egui::Context, theme: &Theme) -> Vec<DeckEvent> {
        let mut events = Vec::new();
        let title = self.display_title();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.strong(title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(theme.mode_icon())
                        .on_hover_text(theme.mode_tooltip())
                        .clicked()
                    {
                        events.push(DeckEvent::ToggleTheme);
                    }
                    if ui
                        .button("\u{26F6}")
                        .on_hover_text("Enter Fullscreen (F key)")
                        .clicked()
                    {
                        events.push(DeckEvent::ToggleFullscreen);
                    }
                });
            });
        });

        egui::SidePanel::left("outline")
            .default_width(OUTLINE_PANEL_WIDTH)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.strong("Outline");
                ui.separator();
                for (index, item) in self.controller.outline().iter().enumerate() {
                    let active = self.controller.active_outline() == Some(index);
                    if ui.selectable_label(active, &item.label).clicked() {
                        events.push(DeckEvent::OutlineClicked(index));
                    }
                }
            });

        let restored_offset = self.pending_scroll.take();
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut area = egui::ScrollArea::vertical().auto_shrink([false, false]);
            if let Some(offset) = restored_offset {
                area = area.vertical_scroll_offset(offset);
            }
            let output = area.show(ui, |ui| {
                let content_top = ui.cursor().top();
                if let Some(byline) = self.deck.meta.byline() {
                    ui.label(egui::RichText::new(byline).italics().weak());
                    ui.add_space(12.0);
                }
                let mut tops = Vec::with_capacity(self.deck.slides.len());
                for slide in &self.deck.slides {
                    tops.push(ui.cursor().top() - content_top);
                    render::show_slide_card(ui, slide, theme);
                    ui.add_space(12.0);
                    ui.separator();
                    ui.add_space(12.0);
                }
                self.section_tops = tops;
                self.show_score_card(ui);
            });

            let scroll_y = output.state.offset.y;
            let moved = self
                .last_scroll_y
                .is_none_or(|last| (last - scroll_y).abs() > 0.5);
            if moved {
                self.last_scroll_y = Some(scroll_y);
                events.push(DeckEvent::Scrolled(scroll_y));
            }
        });

        let anchors = self
            .deck
            .slides
            .iter()
            .zip(&self.section_tops)
            .map(|(slide, &top)| SectionAnchor {
                id: slide.section_id.clone(),
                top,
            })
            .collect();
        self.controller.set_section_anchors(anchors);

        events
    }

    fn show_score_card(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        egui::Frame::group(ui.style()).inner_margin(16.0).show(ui, |ui| {
            ui.label(
                egui::RichText::new("Rate Your Programming Expertise")
                    .size(22.0)
                    .strong(),
            );
            ui.add_space(8.0);

            egui::Grid::new("score_inputs")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Programming languages known");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.score_inputs.languages)
                            .desired_width(64.0),
                    );
                    ui.end_row();

                    ui.label("Algorithms mastered");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.score_inputs.algorithms)
                            .desired_width(64.0),
                    );
                    ui.end_row();

                    ui.label("Data structures used");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.score_inputs.data_structures)
                            .desired_width(64.0),
                    );
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Calculate Expert Level").clicked() {
                self.score_result = Some(ExpertScore::compute(
                    score::coerce_count(&self.score_inputs.languages),
                    score::coerce_count(&self.score_inputs.algorithms),
                    score::coerce_count(&self.score_inputs.data_structures),
                ));
            }

            // The output area stays hidden until the first calculation.
            if let Some(result) = self.score_result {
                ui.add_space(12.0);
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(result.emoji).size(40.0));
                    ui.label(
                        egui::RichText::new(format!(
                            "Your Programming Expert Score: {}",
                            result.score
                        ))
                        .strong(),
                    );
                    ui.label(
                        egui::RichText::new(format!("Your Expert Level: {}", result.level))
                            .strong(),
                    );
                });
            }
        });
    }

    /// Author and date under the title slide's centered heading.
    fn draw_byline(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        let Some(byline) = self.deck.meta.byline() else {
            return;
        };
        let color = Theme::with_opacity(theme.foreground, 0.7);
        let galley = ui.painter().layout_no_wrap(
            byline,
            egui::FontId::proportional(24.0 * scale),
            color,
        );
        let pos = egui::pos2(
            rect.center().x - galley.rect.width() / 2.0,
            rect.center().y + theme.h1_size * scale * 0.9,
        );
        ui.painter().galley(pos, galley, color);
    }

    fn show_presentation(&mut self, ctx: &egui::Context, theme: &Theme) -> Vec<DeckEvent> {
        let mut events = Vec::new();

        egui::TopBottomPanel::bottom("slide_nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.controller.prev_enabled(), egui::Button::new("\u{25C0}"))
                    .on_hover_text("Previous Slide")
                    .clicked()
                {
                    events.push(DeckEvent::Prev);
                }
                if let Some(counter) = self.controller.counter_text() {
                    ui.monospace(counter);
                }
                if ui
                    .add_enabled(self.controller.next_enabled(), egui::Button::new("\u{25B6}"))
                    .on_hover_text("Next Slide")
                    .clicked()
                {
                    events.push(DeckEvent::Next);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button("Exit")
                        .on_hover_text("Exit Fullscreen (F key)")
                        .clicked()
                    {
                        events.push(DeckEvent::ToggleFullscreen);
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, theme.background);
                let scale = compute_scale(rect);

                if let Some(index) = self.controller.current() {
                    if let Some(slide) = self.deck.slides.get(index) {
                        render::render_slide(ui, slide, theme, rect, scale);
                        if index == 0 && slide.is_divider() {
                            self.draw_byline(ui, theme, rect, scale);
                        }
                    }
                }

                if let Some(footer) = &self.deck.meta.footer {
                    let footer_color = Theme::with_opacity(theme.foreground, 0.4);
                    let galley = ui.painter().layout_no_wrap(
                        footer.clone(),
                        egui::FontId::proportional(14.0 * scale),
                        footer_color,
                    );
                    let pos = egui::pos2(
                        rect.center().x - galley.rect.width() / 2.0,
                        rect.bottom() - 30.0 * scale,
                    );
                    ui.painter().galley(pos, galley, footer_color);
                }
            });

        events
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.watcher.as_ref().is_some_and(DeckWatcher::take_change) {
            self.reload();
        }

        let typing = ctx.wants_keyboard_input();
        let mut events: Vec<DeckEvent> = Vec::new();

        let env_fullscreen = ctx.input(|i| {
            if self.controller.fullscreen() {
                if i.key_pressed(egui::Key::ArrowRight) || i.key_pressed(egui::Key::Space) {
                    events.push(DeckEvent::Next);
                }
                if i.key_pressed(egui::Key::ArrowLeft) {
                    events.push(DeckEvent::Prev);
                }
                if i.key_pressed(egui::Key::Home) {
                    events.push(DeckEvent::First);
                }
                if i.key_pressed(egui::Key::End) {
                    events.push(DeckEvent::Last);
                }
            }
            // Fullscreen toggle works everywhere except while typing in a
            // text field.
            if !typing && i.key_pressed(egui::Key::F) {
                events.push(DeckEvent::ToggleFullscreen);
            }
            i.viewport().fullscreen.unwrap_or(false)
        });

        // Mirror the native fullscreen state, whoever changed it. A short
        // grace period covers the frames between sending the request and the
        // viewport acting on it.
        if env_fullscreen {
            self.fullscreen_requested_at = None;
        }
        let awaiting = self
            .fullscreen_requested_at
            .is_some_and(|at| at.elapsed() < FULLSCREEN_GRACE);
        if self.controller.fullscreen() && !env_fullscreen && !awaiting {
            events.push(DeckEvent::FullscreenChanged(false));
        }

        self.dispatch_all(events, ctx);

        ctx.set_visuals(if self.controller.dark_mode() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        let theme = if self.controller.fullscreen() {
            self.presentation_theme()
        } else {
            Theme::from_dark_flag(self.controller.dark_mode())
        };

        let ui_events = if self.controller.fullscreen() {
            self.show_presentation(ctx, &theme)
        } else {
            self.show_document(ctx, &theme)
        };
        self.dispatch_all(ui_events, ctx);
    }
}

fn outline_items(deck: &Deck) -> Vec<OutlineItem> {
    deck.slides
        .iter()
        .map(|slide| OutlineItem {
            target: slide.section_id.clone(),
            label: slide.title.clone(),
        })
        .collect()
}

fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

pub fn run(file: PathBuf, present: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let deck = parser::parse(&content);

    if deck.slides.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let title = deck.meta.title.clone().unwrap_or_else(|| {
        format!(
            "lectern \u{2014} {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 720.0])
        .with_title(&title);
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let prefs = FilePrefs::load_or_default();
            let mut app = DeckApp::new(file, deck, Box::new(prefs), &cc.egui_ctx);
            if present {
                let effects = app.controller.dispatch(DeckEvent::ToggleFullscreen);
                app.execute_effects(effects, &cc.egui_ctx);
            }
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
