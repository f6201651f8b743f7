//! Particle field: a fixed lattice of point-lights with a traveling wave
//! and pointer deflection, painted with a persistence trail.

use serde::Serialize;
use tracing::debug;

use super::color::{Hsl, ThemeMode};
use super::pointer::Pointer;
use super::projection::{perspective_scale, project, wave_offset, Viewport};
use super::surface::Surface;
use crate::config::FieldConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Large,
}

impl SizeClass {
    /// Checkerboard parity over the lattice index
    #[inline]
    pub fn for_cell(row: usize, col: usize) -> Self {
        if (row + col) % 2 == 0 {
            SizeClass::Large
        } else {
            SizeClass::Small
        }
    }
}

/// A single point-light. Origin, hue and size are fixed at construction;
/// only the smoothed pointer offset changes between frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub origin_x: f64,
    pub origin_y: f64,
    pub origin_z: f64,
    pub base_hue: f64,
    pub size_class: SizeClass,
    pub mouse_offset_x: f64,
    pub mouse_offset_y: f64,
}

/// Where and how a point was drawn this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub scale: f64,
    /// Base screen position was inside the pointer radius this frame
    pub deflected: bool,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64, size_class: SizeClass) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            origin_z: z,
            base_hue: 280.0 + z / 10.0,
            size_class,
            mouse_offset_x: 0.0,
            mouse_offset_y: 0.0,
        }
    }

    pub fn color(&self, theme: ThemeMode) -> Hsl {
        theme.point_color(self.base_hue)
    }

    /// Advance one frame: apply the wave, smooth the pointer offset and
    /// project. Returns None (offsets untouched) when behind the camera.
    pub fn advance(
        &mut self,
        config: &FieldConfig,
        viewport: &Viewport,
        pointer: &Pointer,
        t: f64,
    ) -> Option<Projected> {
        let wave_y = wave_offset(&config.wave, t, self.origin_x, self.origin_z);
        let scale = perspective_scale(config.focal_length, self.origin_z)?;

        let (base_x, base_y) = project(viewport, self.origin_x, self.origin_y + wave_y, scale);
        let (target_x, target_y) = pointer.target_offset(base_x, base_y, config.pointer_pull);

        self.mouse_offset_x += (target_x - self.mouse_offset_x) * config.smoothing;
        self.mouse_offset_y += (target_y - self.mouse_offset_y) * config.smoothing;

        // Wave moves Y only; the pointer offset moves X and Y
        let final_x = self.origin_x + self.mouse_offset_x;
        let final_y = self.origin_y + wave_y + self.mouse_offset_y;
        let (x, y) = project(viewport, final_x, final_y, scale);

        let radius = match self.size_class {
            SizeClass::Large => scale * config.large_radius,
            SizeClass::Small => scale * config.small_radius,
        };

        Some(Projected {
            x,
            y,
            radius,
            scale,
            deflected: pointer.reaches(base_x, base_y),
        })
    }
}

/// Per-frame summary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
    pub deflected: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.skipped += rhs.skipped;
        self.deflected += rhs.deflected;
    }
}

/// The grid plus the viewport it was built for
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    points: Vec<Point>,
}

impl ParticleField {
    pub fn new(config: FieldConfig, viewport: Viewport) -> Self {
        let mut field = Self {
            points: Vec::with_capacity(config.point_count()),
            config,
            viewport,
        };
        field.rebuild();
        field
    }

    /// Discard every point and lay out a fresh grid for `viewport`
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let FieldConfig {
            rows, cols, spacing, ..
        } = self.config;
        let half_rows = rows as f64 / 2.0;
        let half_cols = cols as f64 / 2.0;
        let floor_y = self.viewport.height / 4.0;

        self.points.clear();
        for row in 0..rows {
            for col in 0..cols {
                let x = (col as f64 - half_cols) * spacing;
                let z = (row as f64 - half_rows) * spacing;
                self.points
                    .push(Point::new(x, floor_y, z, SizeClass::for_cell(row, col)));
            }
        }

        debug!(
            width = self.viewport.width,
            height = self.viewport.height,
            points = self.points.len(),
            "Grid rebuilt"
        );
    }

    /// Paint one frame at timestamp `t` (ms)
    pub fn step<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        pointer: &Pointer,
        t: f64,
        theme: ThemeMode,
    ) -> FrameStats {
        surface.fill_rect(
            0.0,
            0.0,
            self.viewport.width,
            self.viewport.height,
            theme.trail(self.config.trail_alpha),
        );

        let mut stats = FrameStats::default();
        for point in &mut self.points {
            match point.advance(&self.config, &self.viewport, pointer, t) {
                Some(p) => {
                    surface.fill_circle(p.x, p.y, p.radius, point.color(theme));
                    stats.drawn += 1;
                    if p.deflected {
                        stats.deflected += 1;
                    }
                }
                None => stats.skipped += 1,
            }
        }
        stats
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
