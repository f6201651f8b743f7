//! Two-palette color mapping
//!
//! Dark mode renders the point hue directly on black. Light mode compresses
//! and shifts the hue toward blue and darkens it so points stay legible on
//! white. This is not a simple inversion.

use std::fmt;

/// Dark/light flag supplied by the host every frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    /// Opaque background color behind the field
    pub fn background(self) -> Rgba {
        match self {
            ThemeMode::Dark => Rgba::new(0, 0, 0, 1.0),
            ThemeMode::Light => Rgba::new(255, 255, 255, 1.0),
        }
    }

    /// Translucent background painted each frame to leave trails
    pub fn trail(self, alpha: f64) -> Rgba {
        Rgba {
            a: alpha,
            ..self.background()
        }
    }

    /// Point color for a given base hue
    pub fn point_color(self, base_hue: f64) -> Hsl {
        match self {
            ThemeMode::Dark => Hsl::new(base_hue, 80.0, 70.0),
            ThemeMode::Light => Hsl::new(220.0 + (base_hue - 280.0) * 0.5, 70.0, 30.0),
        }
    }
}

/// Hue in degrees, saturation/lightness in percent
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to 8-bit sRGB
    pub fn to_rgb(self) -> [u8; 3] {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

/// CSS form, accepted directly as a canvas fill style
impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// 8-bit RGB with floating alpha in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_uses_base_hue() {
        for hue in [230.0, 280.0, 327.5] {
            assert_eq!(ThemeMode::Dark.point_color(hue), Hsl::new(hue, 80.0, 70.0));
        }
    }

    #[test]
    fn light_palette_remaps_hue() {
        assert_eq!(ThemeMode::Light.point_color(280.0), Hsl::new(220.0, 70.0, 30.0));
        assert_eq!(ThemeMode::Light.point_color(300.0), Hsl::new(230.0, 70.0, 30.0));
        assert_eq!(ThemeMode::Light.point_color(250.0), Hsl::new(205.0, 70.0, 30.0));
    }

    #[test]
    fn css_strings() {
        assert_eq!(Hsl::new(280.0, 80.0, 70.0).to_string(), "hsl(280, 80%, 70%)");
        assert_eq!(Hsl::new(229.5, 70.0, 30.0).to_string(), "hsl(229.5, 70%, 30%)");
        assert_eq!(ThemeMode::Dark.trail(0.2).to_string(), "rgba(0, 0, 0, 0.2)");
        assert_eq!(ThemeMode::Light.trail(0.2).to_string(), "rgba(255, 255, 255, 0.2)");
    }

    #[test]
    fn hsl_to_rgb_primaries() {
        assert_eq!(Hsl::new(0.0, 100.0, 50.0).to_rgb(), [255, 0, 0]);
        assert_eq!(Hsl::new(120.0, 100.0, 50.0).to_rgb(), [0, 255, 0]);
        assert_eq!(Hsl::new(240.0, 100.0, 50.0).to_rgb(), [0, 0, 255]);
        assert_eq!(Hsl::new(360.0, 100.0, 50.0).to_rgb(), [255, 0, 0]);
        assert_eq!(Hsl::new(77.0, 0.0, 100.0).to_rgb(), [255, 255, 255]);
        assert_eq!(Hsl::new(77.0, 0.0, 0.0).to_rgb(), [0, 0, 0]);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.toggled().toggled(), ThemeMode::Dark);
        assert!(ThemeMode::from_dark(true).is_dark());
        assert!(!ThemeMode::from_dark(false).is_dark());
    }
}
