//! Viewer chrome theme: pure black or pure white panels matching the field background

use egui::Color32;

use crate::core::ThemeMode;

/// Minimal black & white palette for the viewer chrome
pub mod colors {
    use super::Color32;

    // === Dark ===
    pub const BG_DARK: Color32 = Color32::from_rgb(0, 0, 0);              // #000000 - field background
    pub const BG_DARK_ELEVATED: Color32 = Color32::from_rgb(12, 12, 12);  // #0C0C0C
    pub const TEXT_ON_DARK: Color32 = Color32::from_rgb(255, 255, 255);

    // === Light ===
    pub const BG_LIGHT: Color32 = Color32::from_rgb(255, 255, 255);       // #FFFFFF - field background
    pub const BG_LIGHT_ELEVATED: Color32 = Color32::from_rgb(243, 243, 243);
    pub const TEXT_ON_LIGHT: Color32 = Color32::from_rgb(0, 0, 0);

    pub const TEXT_MUTED: Color32 = Color32::from_rgb(128, 128, 128);     // #808080 - readable on both
}

pub fn background(theme: ThemeMode) -> Color32 {
    match theme {
        ThemeMode::Dark => colors::BG_DARK,
        ThemeMode::Light => colors::BG_LIGHT,
    }
}

/// Flat egui Visuals whose panels blend into the field background
pub fn visuals(theme: ThemeMode) -> egui::Visuals {
    use colors::*;

    let (mut visuals, bg, elevated, text) = match theme {
        ThemeMode::Dark => (egui::Visuals::dark(), BG_DARK, BG_DARK_ELEVATED, TEXT_ON_DARK),
        ThemeMode::Light => (egui::Visuals::light(), BG_LIGHT, BG_LIGHT_ELEVATED, TEXT_ON_LIGHT),
    };

    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.extreme_bg_color = bg;
    visuals.faint_bg_color = elevated;
    visuals.override_text_color = Some(text);

    visuals.widgets.inactive.bg_fill = bg;
    visuals.widgets.inactive.weak_bg_fill = bg;
    visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.hovered.bg_fill = elevated;
    visuals.widgets.hovered.weak_bg_fill = elevated;
    visuals.widgets.hovered.fg_stroke = egui::Stroke::new(1.0, text);

    // No shadows - flat design
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals
}
