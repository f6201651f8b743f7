//! Native window showing the wave field
//!
//! Run with: cargo run --bin wave-viewer --features viewer

use tracing_subscriber::{fmt, EnvFilter};
use wave_field::config::FieldConfig;
use wave_field::core::ThemeMode;
use wave_field::viewer::ViewerApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wave_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = FieldConfig::from_env();
    let theme = match std::env::var("WAVE_THEME").as_deref() {
        Ok("light") => ThemeMode::Light,
        _ => ThemeMode::Dark,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("wave-field")
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "wave-field",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, config, theme)))),
    )?;
    Ok(())
}
