//! The eframe application.

use egui::{Key, ViewportCommand, WindowLevel};
use pdfpix_core::config::ViewerConfig;
use pdfpix_core::store::ImageSet;
use pdfpix_core::viewer::{Effect, ViewerEvent, ViewerState, help_text, transition, window_title};
use tracing::{debug, info};

use super::input;
use super::render::TextureCache;

pub struct ViewerApp {
    images: ImageSet,
    base_title: String,
    state: ViewerState,
    cache: TextureCache,
    help_open: bool,
    /// Title last sent to the window.
    shown_title: Option<String>,
    /// Viewport size in pixels at the previous frame.
    bounds: Option<(u32, u32)>,
}

impl ViewerApp {
    pub fn new(images: ImageSet, config: &ViewerConfig) -> Self {
        let state = ViewerState::new(images.len()).with_always_on_top(config.always_on_top);
        Self {
            images,
            base_title: config.title.clone(),
            state,
            cache: TextureCache::default(),
            help_open: false,
            shown_title: None,
            bounds: None,
        }
    }

    fn apply(&mut self, ctx: &egui::Context, event: ViewerEvent) {
        let (state, effect) = transition(self.state, event);
        self.state = state;
        debug!("{:?} -> {:?} at {:?}", event, effect, state.current());

        match effect {
            Effect::None => {}
            Effect::Render => ctx.request_repaint(),
            Effect::Reload => {
                self.cache.invalidate();
                ctx.request_repaint();
            }
            Effect::StayOnTop(on) => {
                let level = if on { WindowLevel::AlwaysOnTop } else { WindowLevel::Normal };
                ctx.send_viewport_cmd(ViewportCommand::WindowLevel(level));
            }
            Effect::ShowHelp => self.help_open = true,
            Effect::Close => {
                info!("Closing viewer");
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let (keys, scroll) = ctx.input(|i| {
            let keys: Vec<Key> = i
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => Some(*key),
                    _ => None,
                })
                .collect();
            (keys, i.raw_scroll_delta.y)
        });

        if self.help_open {
            if keys.into_iter().any(input::closes_help) {
                self.help_open = false;
            }
            return;
        }

        for key in keys {
            if let Some(event) = input::key_event(key) {
                self.apply(ctx, event);
            }
        }
        if let Some(event) = input::wheel_event(scroll) {
            self.apply(ctx, event);
        }
    }

    fn track_resize(&mut self, ctx: &egui::Context) -> (u32, u32) {
        let size = ctx.available_rect().size() * ctx.pixels_per_point();
        let bounds = (size.x.max(0.0).round() as u32, size.y.max(0.0).round() as u32);

        if self.bounds.is_some_and(|previous| previous != bounds) {
            self.apply(ctx, ViewerEvent::Resize);
        }
        self.bounds = Some(bounds);
        bounds
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = window_title(&self.base_title, &self.state);
        if self.shown_title.as_deref() != Some(title.as_str()) {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.shown_title = Some(title);
        }
    }

    fn draw_image(&mut self, ctx: &egui::Context, bounds: (u32, u32)) {
        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let Some(index) = self.state.current() else { return };
                let Some(path) = self.images.get(index) else { return };
                let Some(texture) = self.cache.texture(ctx, index, path, bounds) else {
                    return;
                };

                let size = texture.size_vec2() / ctx.pixels_per_point();
                let rect = egui::Rect::from_center_size(ui.max_rect().center(), size);
                ui.painter().image(
                    texture.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            });
    }

    fn draw_help(&mut self, ctx: &egui::Context) {
        if !self.help_open {
            return;
        }

        let mut close = false;
        egui::Window::new("Help")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(help_text());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.help_open = false;
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        let bounds = self.track_resize(ctx);
        self.sync_title(ctx);
        self.draw_image(ctx, bounds);
        self.draw_help(ctx);
    }
}
