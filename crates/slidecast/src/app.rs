use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;

use crate::autoplay::DEFAULT_CADENCE;
use crate::captions::{CueTrack, vtt};
use crate::config::Config;
use crate::deck::{
    DeckSource, Direction, SLIDE_HEIGHT, SLIDE_PADDING, SLIDE_WIDTH, SlideGraph, SlideNode,
};
use crate::nav::Intent;
use crate::session::Session;
use crate::theme::Theme;
use crate::watch::DeckWatcher;

const PAN_DURATION: f32 = 0.4;
const WATCH_POLL: Duration = Duration::from_millis(500);

/// An in-flight camera glide toward a slide center.
struct PanAnimation {
    from: egui::Vec2,
    to: egui::Vec2,
    start: Instant,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

struct ViewerApp {
    session: Session,
    theme: Theme,
    /// Graph-space point currently under the viewport center.
    camera_at: egui::Vec2,
    pan: Option<PanAnimation>,
    show_hud: bool,
    toast: Option<Toast>,
    last_ctrl_c: Option<Instant>,
    last_esc: Option<Instant>,
    watcher: Option<DeckWatcher>,
    deck_path: PathBuf,
    captions_path: Option<PathBuf>,
}

impl ViewerApp {
    fn new(
        session: Session,
        theme: Theme,
        deck_path: PathBuf,
        captions_path: Option<PathBuf>,
        watcher: Option<DeckWatcher>,
    ) -> Self {
        let camera_at = session
            .current_key()
            .and_then(|key| session.graph().node(key))
            .map(|node| center_of(node))
            .unwrap_or(egui::Vec2::ZERO);

        Self {
            session,
            theme,
            camera_at,
            pan: None,
            show_hud: false,
            toast: None,
            last_ctrl_c: None,
            last_esc: None,
            watcher,
            deck_path,
            captions_path,
        }
    }

    fn submit_intent(&mut self, intent: Intent) {
        if let Some(effect) = self.session.submit(intent) {
            self.center_on(&effect.key);
        }
    }

    /// Glide the camera to a slide's center. Centering on the slide the
    /// camera is already at (or heading to) does nothing.
    fn center_on(&mut self, key: &str) {
        let Some(node) = self.session.graph().node(key) else {
            return;
        };
        let to = center_of(node);
        let already_heading = self.pan.as_ref().is_some_and(|p| p.to == to);
        if already_heading || (self.pan.is_none() && self.camera_at == to) {
            return;
        }
        self.pan = Some(PanAnimation {
            from: self.camera_at,
            to,
            start: Instant::now(),
        });
    }

    fn advance_camera(&mut self) {
        if let Some(pan) = &self.pan {
            let t = pan.start.elapsed().as_secs_f32() / PAN_DURATION;
            if t >= 1.0 {
                self.camera_at = pan.to;
                self.pan = None;
            } else {
                self.camera_at = pan.from + (pan.to - pan.from) * ease_in_out(t);
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
    }

    fn toggle_autoplay(&mut self) {
        let on = self.session.toggle_autoplay(Instant::now());
        self.toast = Some(Toast::new(format!(
            "Autoplay: {}",
            if on { "on" } else { "off" }
        )));
    }

    fn go_home(&mut self) {
        if let Some(start) = self.session.graph().start_key().map(str::to_string) {
            self.submit_intent(Intent::Select(start));
        }
    }

    fn reload_deck(&mut self) {
        let token = self.session.begin_reload();
        match load_deck(&self.deck_path, self.captions_path.as_deref()) {
            Ok((_, graph, track)) => {
                if self.session.apply_reload(token, graph, track) {
                    self.toast = Some(Toast::new("Deck reloaded".to_string()));
                    if let Some(key) = self.session.current_key().map(str::to_string) {
                        self.center_on(&key);
                    }
                }
            }
            Err(err) => {
                self.toast = Some(Toast::new(format!("Reload failed: {err}")));
            }
        }
    }

    fn node_rect(&self, node: &SlideNode, rect: egui::Rect, zoom: f32) -> egui::Rect {
        let min =
            rect.center() + (egui::vec2(node.position.x, node.position.y) - self.camera_at) * zoom;
        egui::Rect::from_min_size(min, egui::vec2(SLIDE_WIDTH, SLIDE_HEIGHT) * zoom)
    }

    fn handle_click(&mut self, ctx: &egui::Context, rect: egui::Rect, zoom: f32) {
        let clicked = ctx.input(|i| {
            i.pointer
                .primary_clicked()
                .then(|| i.pointer.interact_pos())
                .flatten()
        });
        let Some(pos) = clicked else { return };

        let hit = self.session.graph().nodes().find_map(|node| {
            self.node_rect(node, rect, zoom)
                .contains(pos)
                .then(|| node.key.clone())
        });
        if let Some(key) = hit {
            self.submit_intent(Intent::Select(key));
        }
    }

    fn draw_graph(&self, ui: &egui::Ui, rect: egui::Rect, zoom: f32) {
        let painter = ui.painter();
        let graph = self.session.graph();

        for edge in graph.edges() {
            let (Some(from), Some(to)) = (graph.node(&edge.from), graph.node(&edge.to)) else {
                continue;
            };
            painter.line_segment(
                [
                    self.node_rect(from, rect, zoom).center(),
                    self.node_rect(to, rect, zoom).center(),
                ],
                egui::Stroke::new(2.0 * zoom, self.theme.edge),
            );
        }

        let current = self.session.current_key().map(str::to_string);
        for node in graph.nodes() {
            let screen = self.node_rect(node, rect, zoom);
            if !screen.intersects(rect) {
                continue;
            }

            let is_current = current.as_deref() == Some(node.key.as_str());
            painter.rect_filled(screen, 8.0 * zoom, self.theme.background);
            let stroke = if is_current {
                egui::Stroke::new(3.0, self.theme.accent)
            } else {
                egui::Stroke::new(1.0, self.theme.node_stroke)
            };
            painter.rect_stroke(screen, 8.0 * zoom, stroke, egui::StrokeKind::Outside);

            self.draw_slide_body(painter, node, screen, zoom);

            let tag = painter.layout_no_wrap(
                node.key.clone(),
                egui::FontId::monospace(12.0 * zoom.max(0.6)),
                self.theme.hud,
            );
            let tag_pos = egui::pos2(
                screen.right() - tag.rect.width() - 10.0 * zoom,
                screen.top() + 8.0 * zoom,
            );
            painter.galley(tag_pos, tag, self.theme.hud);
        }
    }

    /// Minimal body rendering: `#`-prefixed heading lines, everything else
    /// as wrapped body text, clipped to the card.
    fn draw_slide_body(
        &self,
        painter: &egui::Painter,
        node: &SlideNode,
        screen: egui::Rect,
        zoom: f32,
    ) {
        let painter = painter.with_clip_rect(screen);
        let padding = 30.0 * zoom;
        let width = screen.width() - padding * 2.0;
        if width <= 0.0 {
            return;
        }

        let mut y = screen.top() + padding;
        for line in node.body.lines() {
            let line = line.trim_end();
            if line.is_empty() {
                y += self.theme.body_size * 0.6 * zoom;
                continue;
            }

            let (text, size, color) = if let Some(rest) = line.strip_prefix("### ") {
                (rest, self.theme.heading_size(3), self.theme.heading_color)
            } else if let Some(rest) = line.strip_prefix("## ") {
                (rest, self.theme.heading_size(2), self.theme.heading_color)
            } else if let Some(rest) = line.strip_prefix("# ") {
                (rest, self.theme.heading_size(1), self.theme.heading_color)
            } else {
                (line, self.theme.body_size, self.theme.foreground)
            };

            let galley = painter.layout(
                text.to_string(),
                egui::FontId::proportional(size * zoom),
                color,
                width,
            );
            let height = galley.rect.height();
            painter.galley(egui::pos2(screen.left() + padding, y), galley, color);
            y += height + 8.0 * zoom;
            if y > screen.bottom() {
                break;
            }
        }
    }

    fn draw_caption(&self, ui: &egui::Ui, rect: egui::Rect, now: Instant) {
        let Some(active) = self.session.active_caption(now) else {
            return;
        };
        let painter = ui.painter();

        let text_color = self.theme.caption_foreground;
        let galley = painter.layout(
            active.cue.text.clone(),
            egui::FontId::proportional(self.theme.caption_size),
            text_color,
            rect.width() * 0.7,
        );

        let padding = 14.0;
        let panel = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - galley.rect.height() - padding * 2.0 - 24.0,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        painter.rect_filled(
            panel,
            8.0,
            Theme::with_opacity(self.theme.caption_background, 0.85),
        );
        painter.galley(
            egui::pos2(panel.left() + padding, panel.top() + padding),
            galley,
            text_color,
        );

        // Remaining-time sliver along the panel bottom.
        let total = active.cue.duration();
        if !total.is_zero() {
            let fraction = (active.remaining.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0);
            let bar = egui::Rect::from_min_size(
                egui::pos2(panel.left(), panel.bottom() - 3.0),
                egui::vec2(panel.width() * fraction, 3.0),
            );
            painter.rect_filled(bar, 0.0, self.theme.accent);
        }
    }

    fn draw_hud(&self, ui: &egui::Ui, rect: egui::Rect, now: Instant) {
        let theme = &self.theme;
        let shortcuts = [
            ("\u{2190} \u{2191} \u{2193} \u{2192}", "Move between slides"),
            ("Click", "Jump to a slide"),
            ("Space", "Play / pause narration"),
            ("A", "Toggle autoplay"),
            ("Home", "Back to the first slide"),
            ("D", "Toggle theme"),
            ("F", "Toggle fullscreen"),
            ("H", "Toggle this HUD"),
            ("Esc / Ctrl+C", "Press twice to quit"),
            ("Q", "Quit"),
        ];

        let transport = self.session.transport();
        let playing = if transport.is_playing() {
            ""
        } else {
            " (paused)"
        };
        let status = [
            format!(
                "Slide {} of {}",
                self.session.current_key().unwrap_or("-"),
                self.session.graph().len()
            ),
            match self.session.autoplay_time_to_next(now) {
                Some(wait) => format!("Autoplay on, next in {:.1}s", wait.as_secs_f32()),
                None => "Autoplay off".to_string(),
            },
            format!(
                "Narration {} / {}{playing}",
                fmt_clock(transport.position(now)),
                fmt_clock(transport.length()),
            ),
        ];

        let bg = Theme::with_opacity(theme.caption_background, 0.9);
        let text_color = Theme::with_opacity(theme.foreground, 0.9);
        let key_color = Theme::with_opacity(theme.accent, 0.9);

        let padding = 24.0;
        let line_height = 28.0;
        let rows = status.len() + shortcuts.len();
        let hud_height = rows as f32 * line_height + padding * 2.0 + 16.0;
        let hud_width = 380.0;

        let hud_rect =
            egui::Rect::from_center_size(rect.center(), egui::vec2(hud_width, hud_height));
        ui.painter().rect_filled(hud_rect, 12.0, bg);

        let mut y = hud_rect.top() + padding;
        for line in &status {
            let galley = ui.painter().layout_no_wrap(
                line.clone(),
                egui::FontId::proportional(15.0),
                text_color,
            );
            ui.painter()
                .galley(egui::pos2(hud_rect.left() + padding, y), galley, text_color);
            y += line_height;
        }
        y += 16.0;

        for (key, desc) in &shortcuts {
            let key_galley = ui.painter().layout_no_wrap(
                key.to_string(),
                egui::FontId::monospace(14.0),
                key_color,
            );
            ui.painter()
                .galley(egui::pos2(hud_rect.left() + padding, y), key_galley, key_color);

            let desc_galley = ui.painter().layout_no_wrap(
                desc.to_string(),
                egui::FontId::proportional(14.0),
                text_color,
            );
            ui.painter().galley(
                egui::pos2(hud_rect.left() + padding + 130.0, y),
                desc_galley,
                text_color,
            );

            y += line_height;
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            // Quit: Q
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            // Ctrl+C double-tap to quit
            if i.modifiers.ctrl && i.key_pressed(egui::Key::C) {
                if let Some(last) = self.last_ctrl_c {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_ctrl_c = Some(Instant::now());
                self.toast = Some(Toast::new("Press Ctrl+C again to quit".to_string()));
                return;
            }

            // Esc double-tap to quit
            if i.key_pressed(egui::Key::Escape) {
                if let Some(last) = self.last_esc {
                    if last.elapsed().as_secs_f32() < 1.0 {
                        viewport_cmds.push(egui::ViewportCommand::Close);
                        return;
                    }
                }
                self.last_esc = Some(Instant::now());
                self.toast = Some(Toast::new("Press Esc again to exit".to_string()));
                return;
            }

            // Fullscreen toggle: F
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            // Theme toggle: D
            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
                return;
            }

            // HUD: H
            if i.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
                return;
            }

            // Autoplay: A
            if i.key_pressed(egui::Key::A) {
                self.toggle_autoplay();
                return;
            }

            // Narration play/pause: Space
            if i.key_pressed(egui::Key::Space) {
                self.session.transport_mut().toggle(Instant::now());
                return;
            }

            // First slide: Home
            if i.key_pressed(egui::Key::Home) {
                self.go_home();
                return;
            }

            // Arrow keys always mean graph movement, never widget focus
            // or scrolling.
            if i.key_pressed(egui::Key::ArrowLeft) {
                self.submit_intent(Intent::Move(Direction::Left));
            }
            if i.key_pressed(egui::Key::ArrowRight) {
                self.submit_intent(Intent::Move(Direction::Right));
            }
            if i.key_pressed(egui::Key::ArrowUp) {
                self.submit_intent(Intent::Move(Direction::Up));
            }
            if i.key_pressed(egui::Key::ArrowDown) {
                self.submit_intent(Intent::Move(Direction::Down));
            }
        });

        // Send collected viewport commands outside the input closure
        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        // Pending edits to the deck on disk
        if self.watcher.as_ref().is_some_and(|w| w.take_change()) {
            self.reload_deck();
        }

        // Due autoplay step
        if let Some(effect) = self.session.tick_if_due(now) {
            let key = effect.key;
            self.center_on(&key);
        }

        self.advance_camera();

        // Expire toast
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let canvas = self.theme.canvas;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(canvas).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, canvas);

                let zoom = compute_zoom(rect);

                self.handle_click(ctx, rect, zoom);
                self.draw_graph(ui, rect, zoom);
                self.draw_caption(ui, rect, now);

                // Toast notification
                if let Some(ref toast) = self.toast {
                    let opacity = toast.opacity();
                    if opacity > 0.0 {
                        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
                        let toast_bg =
                            Theme::with_opacity(self.theme.caption_background, opacity * 0.9);
                        let galley = ui.painter().layout_no_wrap(
                            toast.message.clone(),
                            egui::FontId::proportional(16.0),
                            toast_color,
                        );
                        let padding = 12.0;
                        let toast_rect = egui::Rect::from_min_size(
                            egui::pos2(
                                rect.center().x - galley.rect.width() / 2.0 - padding,
                                rect.top() + 24.0,
                            ),
                            egui::vec2(
                                galley.rect.width() + padding * 2.0,
                                galley.rect.height() + padding * 2.0,
                            ),
                        );
                        ui.painter().rect_filled(toast_rect, 8.0, toast_bg);
                        let text_pos =
                            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
                        ui.painter().galley(text_pos, galley, toast_color);
                        ctx.request_repaint();
                    }
                }

                if self.show_hud {
                    self.draw_hud(ui, rect, now);
                }
            });

        // Frame scheduling: animate pans, wake for the next autoplay
        // deadline, keep captions moving while narration plays, and poll
        // the watcher.
        if self.pan.is_some() {
            ctx.request_repaint();
        }
        if let Some(wait) = self.session.autoplay_time_to_next(now) {
            ctx.request_repaint_after(wait.min(Duration::from_millis(100)));
        }
        if self.session.transport().is_playing() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        if self.watcher.is_some() {
            ctx.request_repaint_after(WATCH_POLL);
        }
    }
}

fn center_of(node: &SlideNode) -> egui::Vec2 {
    egui::vec2(
        node.position.x + SLIDE_WIDTH / 2.0,
        node.position.y + SLIDE_HEIGHT / 2.0,
    )
}

/// Zoom that fits one slide plus its padding margin in the viewport.
fn compute_zoom(rect: egui::Rect) -> f32 {
    let fit_w = rect.width() / (SLIDE_WIDTH + SLIDE_PADDING * 2.0);
    let fit_h = rect.height() / (SLIDE_HEIGHT + SLIDE_PADDING * 2.0);
    fit_w.min(fit_h)
}

fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

fn fmt_clock(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Read and parse a deck document plus its caption track. An explicit
/// captions path must exist; the `.vtt` sidecar is optional.
fn load_deck(
    path: &Path,
    captions: Option<&Path>,
) -> anyhow::Result<(DeckSource, SlideGraph, CueTrack)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let source = DeckSource::parse(&content);
    let graph = SlideGraph::build(&source.bodies);

    let track = match captions {
        Some(captions) => {
            let text = std::fs::read_to_string(captions)
                .with_context(|| format!("Failed to read captions from {}", captions.display()))?;
            CueTrack::new(vtt::parse(&text))
        }
        None => match std::fs::read_to_string(path.with_extension("vtt")) {
            Ok(text) => CueTrack::new(vtt::parse(&text)),
            Err(_) => CueTrack::default(),
        },
    };

    Ok((source, graph, track))
}

pub struct RunOptions {
    pub windowed: bool,
    pub autoplay: bool,
    pub cadence_ms: Option<u64>,
    pub watch: bool,
    pub start_slide: Option<String>,
}

pub fn run(file: PathBuf, captions: Option<PathBuf>, options: RunOptions) -> anyhow::Result<()> {
    let RunOptions {
        windowed,
        autoplay,
        cadence_ms,
        watch,
        start_slide,
    } = options;

    let (source, graph, track) = load_deck(&file, captions.as_deref())?;

    if graph.is_empty() {
        anyhow::bail!("No slides found in {}", file.display());
    }

    let title = source.meta.title.clone().unwrap_or_else(|| {
        format!(
            "slidecast — {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    // CLI flags override config
    let config = Config::load_or_default();
    let defaults = config.defaults.as_ref();

    let theme = Theme::from_name(defaults.and_then(|d| d.theme.as_deref()).unwrap_or("dark"));
    let cadence = cadence_ms
        .or_else(|| defaults.and_then(|d| d.cadence_ms))
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_CADENCE);
    let windowed = windowed || defaults.and_then(|d| d.windowed).unwrap_or(false);
    let autoplay = autoplay || defaults.and_then(|d| d.autoplay).unwrap_or(false);

    let mut session = Session::new(graph, track, cadence);
    if let Some(key) = start_slide {
        session.submit(Intent::Select(key));
    }
    if autoplay {
        session.set_autoplay(true, Instant::now());
    }

    let watcher = if watch {
        let mut paths = vec![file.clone()];
        match &captions {
            Some(path) => paths.push(path.clone()),
            None => paths.push(file.with_extension("vtt")),
        }
        Some(DeckWatcher::new(&paths)?)
    } else {
        None
    };

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(ViewerApp::new(
                session, theme, file, captions, watcher,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
