//! Headless runner: drives the wave field at display rate on a software
//! raster with a synthetic orbiting pointer and logs frame statistics.
//!
//! Run with: cargo run --bin wave-cli --features cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use wave_field::config::FieldConfig;
    use wave_field::core::{RasterSurface, ThemeMode, Viewport, WaveRenderer};
    use wave_field::stats::{FpsCounter, RunStats};
    use wave_field::time::now_ms;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wave_field=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = FieldConfig::from_env();
    let frames: u64 = match std::env::var("WAVE_FRAMES") {
        Ok(v) => v.parse().unwrap_or_else(|e| {
            warn!(value = %v, error = %e, "Bad WAVE_FRAMES, using 600");
            600
        }),
        Err(_) => 600,
    };
    let (width, height) = std::env::var("WAVE_SIZE")
        .ok()
        .and_then(|v| parse_size(&v))
        .unwrap_or((1280, 720));
    let theme = match std::env::var("WAVE_THEME").as_deref() {
        Ok("light") => ThemeMode::Light,
        _ => ThemeMode::Dark,
    };

    let viewport = Viewport::new(width as f64, height as f64);
    let mut raster = RasterSurface::new(width, height, theme.background());
    let mut renderer = WaveRenderer::new(config, viewport, theme);
    let token = renderer.mount();

    info!(width, height, frames, ?theme, "Running wave field");

    let start = now_ms();
    let mut run = RunStats::default();
    let mut fps = FpsCounter::new();
    let mut frame_tick = tokio::time::interval(Duration::from_micros(16_667));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    stats_interval.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while run.frames < frames {
        tokio::select! {
            _ = frame_tick.tick() => {
                let t = now_ms() - start;
                // Pointer circles the viewport center once every 4 seconds
                let angle = t / 4000.0 * std::f64::consts::TAU;
                let (cx, cy) = viewport.center();
                renderer.pointer_moved(cx + angle.cos() * cx * 0.5, cy + angle.sin() * cy * 0.5);

                match renderer.frame(&token, &mut raster, t) {
                    Some(stats) => {
                        run.record(stats);
                        fps.tick(t);
                    }
                    None => break,
                }
            }
            _ = stats_interval.tick() => {
                info!(
                    frames = run.frames,
                    fps = format!("{:.1}", fps.fps()),
                    peak_deflected = run.peak_deflected,
                    "stats"
                );
            }
            _ = &mut ctrl_c => {
                warn!("Interrupted");
                break;
            }
        }
    }

    renderer.unmount();
    run.elapsed_ms = now_ms() - start;
    info!(
        frames = run.frames,
        avg_fps = format!("{:.1}", run.avg_fps()),
        "Done"
    );
    println!("{}", serde_json::to_string_pretty(&run)?);
    Ok(())
}

/// Parse `WxH`
#[cfg(not(target_arch = "wasm32"))]
fn parse_size(s: &str) -> Option<(usize, usize)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let w = w.trim().parse().ok().filter(|&w: &usize| w > 0)?;
    let h = h.trim().parse().ok().filter(|&h: &usize| h > 0)?;
    Some((w, h))
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::parse_size;

    #[test]
    fn parses_sizes() {
        assert_eq!(parse_size("1280x720"), Some((1280, 720)));
        assert_eq!(parse_size("640X480"), Some((640, 480)));
        assert_eq!(parse_size(" 10 x 20 "), Some((10, 20)));
        assert_eq!(parse_size("0x20"), None);
        assert_eq!(parse_size("1280"), None);
        assert_eq!(parse_size("axb"), None);
    }
}
