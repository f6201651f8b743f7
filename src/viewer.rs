//! Native eframe viewer
//!
//! egui repaints every widget from scratch each frame, so the field is
//! rasterised into a persistent [`RasterSurface`] and shown as a texture.

use eframe::egui;
use tracing::info;

use crate::config::FieldConfig;
use crate::core::{CancelToken, FrameStats, RasterSurface, ThemeMode, Viewport, WaveRenderer};
use crate::stats::FpsCounter;
use crate::theme::{background, colors, visuals};
use crate::time::now_ms;

pub struct ViewerApp {
    renderer: WaveRenderer,
    token: CancelToken,
    raster: RasterSurface,
    texture: Option<egui::TextureHandle>,
    fps_counter: FpsCounter,
    last_stats: FrameStats,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: FieldConfig, theme: ThemeMode) -> Self {
        cc.egui_ctx.set_visuals(visuals(theme));

        // Real size arrives with the first frame
        let viewport = Viewport::new(1.0, 1.0);
        let mut renderer = WaveRenderer::new(config, viewport, theme);
        let token = renderer.mount();

        Self {
            renderer,
            token,
            raster: RasterSurface::new(1, 1, theme.background()),
            texture: None,
            fps_counter: FpsCounter::new(),
            last_stats: FrameStats::default(),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let theme = self.renderer.theme().toggled();
        self.renderer.set_theme(theme);
        ctx.set_visuals(visuals(theme));
        info!(?theme, "Theme switched");
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        let theme = self.renderer.theme();
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(background(theme)).inner_margin(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let label = match theme {
                        ThemeMode::Dark => "Light mode",
                        ThemeMode::Light => "Dark mode",
                    };
                    if ui.button(label).clicked() {
                        self.toggle_theme(ctx);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{} deflected", self.last_stats.deflected))
                                .color(colors::TEXT_MUTED),
                        );
                        ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                        ui.label(
                            egui::RichText::new(format!("{} points", self.last_stats.drawn))
                                .color(colors::TEXT_MUTED),
                        );
                        ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                        ui.label(
                            egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                                .color(colors::TEXT_MUTED),
                        );
                    });
                });
            });
    }

    /// Rebuild grid and raster when the panel size changes
    fn sync_size(&mut self, size: egui::Vec2) {
        let (w, h) = (size.x.max(1.0).round() as usize, size.y.max(1.0).round() as usize);
        if w == self.raster.width() && h == self.raster.height() {
            return;
        }
        self.raster.resize(w, h, self.renderer.theme().background());
        self.token = self.renderer.resize(Viewport::new(w as f64, h as f64));
    }

    fn upload(&mut self, ctx: &egui::Context) -> egui::TextureId {
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [self.raster.width(), self.raster.height()],
            self.raster.pixels(),
        );
        match &mut self.texture {
            Some(texture) => {
                texture.set(image, egui::TextureOptions::LINEAR);
                texture.id()
            }
            None => {
                let texture = ctx.load_texture("wave_field", image, egui::TextureOptions::LINEAR);
                let id = texture.id();
                self.texture = Some(texture);
                id
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Continuous animation
        ctx.request_repaint();

        if ctx.input(|i| i.key_pressed(egui::Key::D)) {
            self.toggle_theme(ctx);
        }

        self.render_header(ctx);

        let theme = self.renderer.theme();
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(background(theme)))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.sync_size(rect.size());

                if let Some(pos) = ctx.pointer_hover_pos() {
                    let local = pos - rect.min;
                    self.renderer.pointer_moved(local.x as f64, local.y as f64);
                }

                let now = now_ms();
                if let Some(stats) = self.renderer.frame(&self.token, &mut self.raster, now) {
                    self.last_stats = stats;
                    self.fps_counter.tick(now);
                }

                let texture_id = self.upload(ctx);
                ui.painter().image(
                    texture_id,
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.renderer.unmount();
    }
}
