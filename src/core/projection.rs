//! Wave displacement and pinhole projection

use crate::config::WaveConfig;

/// Viewport size in pixels
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Vertical wave displacement at time `t` (ms) for a point at planar (x, z)
#[inline]
pub fn wave_offset(wave: &WaveConfig, t: f64, x: f64, z: f64) -> f64 {
    wave.amp_x * (t * wave.freq_x + x * wave.k_x).sin()
        + wave.amp_z * (t * wave.freq_z + z * wave.k_z).cos()
}

/// Perspective scale for depth `z`. None when the point is at or behind the camera.
#[inline]
pub fn perspective_scale(focal_length: f64, z: f64) -> Option<f64> {
    if z <= -focal_length {
        return None;
    }
    let scale = focal_length / (focal_length + z);
    (scale > 0.0).then_some(scale)
}

/// Project world (x, y) to screen pixels around the viewport center
#[inline]
pub fn project(viewport: &Viewport, x: f64, y: f64, scale: f64) -> (f64, f64) {
    let (cx, cy) = viewport.center();
    (cx + x * scale, cy + y * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_is_one_at_origin_depth() {
        assert_eq!(perspective_scale(400.0, 0.0), Some(1.0));
        assert_eq!(perspective_scale(400.0, 400.0), Some(0.5));
    }

    #[test]
    fn behind_camera_has_no_scale() {
        assert_eq!(perspective_scale(400.0, -400.0), None);
        assert_eq!(perspective_scale(400.0, -500.0), None);
        assert!(perspective_scale(400.0, -399.0).is_some());
    }

    #[test]
    fn wave_at_time_zero() {
        let wave = WaveConfig::default();
        // sin(0) = 0, cos(0) = 1
        assert!((wave_offset(&wave, 0.0, 0.0, 0.0) - 15.0).abs() < 1e-12);
    }

    #[test]
    fn wave_is_deterministic() {
        let wave = WaveConfig::default();
        let a = wave_offset(&wave, 1234.5, -60.0, 140.0);
        let b = wave_offset(&wave, 1234.5, -60.0, 140.0);
        assert_eq!(a, b);
        assert!(a.abs() <= wave.amp_x + wave.amp_z);
    }

    #[test]
    fn project_centers_on_viewport() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(project(&viewport, 0.0, 0.0, 0.7), (400.0, 300.0));
        assert_eq!(project(&viewport, 100.0, -50.0, 0.5), (450.0, 275.0));
    }
}
