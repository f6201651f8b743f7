//! Wave field - animated 3D particle background
//!
//! A 50x50 lattice of point-lights projected through a pinhole camera,
//! rippled by a traveling wave and pulled toward the pointer, painted with a
//! translucent trail fill.
//!
//! - `core`: platform-agnostic field, projection, palette and loop state
//! - `web` (wasm): canvas binding exported to JavaScript
//! - `viewer` (native): eframe window

pub mod config;
pub mod core;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub mod stats;

#[cfg(feature = "viewer")]
pub mod theme;
#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::WaveBackground;
