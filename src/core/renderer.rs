//! Host-agnostic renderer lifecycle
//!
//! Owns the field, the pointer record, the theme flag and the loop state.
//! Hosts (browser canvas, native viewer, CLI) forward their events here and
//! call [`WaveRenderer::frame`] once per display tick with the token they
//! were handed at start.

use tracing::{debug, info};

use super::animation::{AnimationLoop, CancelToken};
use super::color::ThemeMode;
use super::field::{FrameStats, ParticleField};
use super::pointer::Pointer;
use super::projection::Viewport;
use super::surface::Surface;
use crate::config::FieldConfig;

pub struct WaveRenderer {
    field: ParticleField,
    pointer: Pointer,
    theme: ThemeMode,
    animation: AnimationLoop,
    frames: u64,
}

impl WaveRenderer {
    pub fn new(config: FieldConfig, viewport: Viewport, theme: ThemeMode) -> Self {
        let pointer = Pointer::new(config.pointer_radius);
        Self {
            field: ParticleField::new(config, viewport),
            pointer,
            theme,
            animation: AnimationLoop::new(),
            frames: 0,
        }
    }

    /// Begin animating. Returns the token the frame callback must present.
    pub fn mount(&mut self) -> CancelToken {
        info!(
            points = self.field.len(),
            width = self.field.viewport().width,
            height = self.field.viewport().height,
            "Wave field mounted"
        );
        self.animation.start()
    }

    /// Full reinitialisation: stop the running loop, rebuild the grid, start
    /// a new loop.
    pub fn resize(&mut self, viewport: Viewport) -> CancelToken {
        self.animation.stop();
        self.field.resize(viewport);
        debug!(width = viewport.width, height = viewport.height, "Viewport resized");
        self.animation.start()
    }

    /// Stop animating. Frames presented afterwards paint nothing.
    pub fn unmount(&mut self) {
        if self.animation.stop() {
            info!(frames = self.frames, "Wave field unmounted");
        }
    }

    /// Record a pointer position. Never runs a frame.
    #[inline]
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.pointer.move_to(x, y);
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    /// Run one frame if `token` belongs to the live run. Returns None when
    /// the token is stale or cancelled; the caller must not reschedule then.
    pub fn frame<S: Surface + ?Sized>(
        &mut self,
        token: &CancelToken,
        surface: &mut S,
        t: f64,
    ) -> Option<FrameStats> {
        if token.is_cancelled() || !self.animation.is_running() {
            return None;
        }
        self.frames += 1;
        Some(self.field.step(surface, &self.pointer, t, self.theme))
    }

    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn viewport(&self) -> Viewport {
        self.field.viewport()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::RecordingSurface;

    fn renderer() -> WaveRenderer {
        WaveRenderer::new(
            FieldConfig::default(),
            Viewport::new(800.0, 600.0),
            ThemeMode::Dark,
        )
    }

    #[test]
    fn no_frames_before_mount() {
        let mut r = renderer();
        let mut surface = RecordingSurface::new();
        assert!(r.frame(&CancelToken::new(), &mut surface, 0.0).is_none());
        assert!(surface.is_empty());
    }

    #[test]
    fn unmount_stops_painting() {
        let mut r = renderer();
        let token = r.mount();
        let mut surface = RecordingSurface::new();
        assert!(r.frame(&token, &mut surface, 16.0).is_some());
        assert!(!surface.is_empty());

        r.unmount();
        surface.clear();
        assert!(r.frame(&token, &mut surface, 32.0).is_none());
        assert!(surface.is_empty(), "no paint calls after unmount");
        assert!(!r.is_running());
        assert_eq!(r.frames(), 1);
    }

    #[test]
    fn resize_retires_old_loop() {
        let mut r = renderer();
        let old = r.mount();
        let new = r.resize(Viewport::new(1024.0, 768.0));

        let mut surface = RecordingSurface::new();
        assert!(r.frame(&old, &mut surface, 16.0).is_none());
        assert!(surface.is_empty());
        assert!(r.frame(&new, &mut surface, 16.0).is_some());
        assert_eq!(r.viewport(), Viewport::new(1024.0, 768.0));
        assert!(r.field().points().iter().all(|p| p.origin_y == 192.0));
    }

    #[test]
    fn pointer_and_theme_are_read_next_frame() {
        let mut r = renderer();
        let token = r.mount();
        r.pointer_moved(400.0, 450.0);
        r.set_theme(ThemeMode::Light);
        assert_eq!((r.pointer().x, r.pointer().y), (400.0, 450.0));
        assert_eq!(r.frames(), 0, "pointer input never runs a frame");

        let mut surface = RecordingSurface::new();
        let stats = r.frame(&token, &mut surface, 0.0).unwrap();
        assert!(stats.deflected > 0);
        assert_eq!(r.theme(), ThemeMode::Light);
    }
}
