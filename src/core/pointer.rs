//! Pointer state shared between the input callback and the frame loop.
//!
//! The input side only ever writes `x`/`y`; the frame loop only reads.

/// Off-screen starting position so nothing is deflected before the first move
pub const OFFSCREEN: f64 = -1000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
    /// Influence distance in pixels
    pub radius: f64,
}

impl Pointer {
    pub fn new(radius: f64) -> Self {
        Self {
            x: OFFSCREEN,
            y: OFFSCREEN,
            radius,
        }
    }

    #[inline]
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// True when (sx, sy) lies strictly inside the influence radius
    #[inline]
    pub fn reaches(&self, sx: f64, sy: f64) -> bool {
        (self.x - sx).hypot(self.y - sy) < self.radius
    }

    /// Target offset for a point whose unperturbed screen position is (sx, sy).
    ///
    /// Linear falloff: `(1 - dist/radius) * (pointer - point) * pull` inside
    /// the radius, exactly zero outside it.
    pub fn target_offset(&self, sx: f64, sy: f64, pull: f64) -> (f64, f64) {
        let dx = self.x - sx;
        let dy = self.y - sy;
        let dist = dx.hypot(dy);
        if dist >= self.radius {
            return (0.0, 0.0);
        }
        let influence = 1.0 - dist / self.radius;
        (influence * dx * pull, influence * dy * pull)
    }
}
