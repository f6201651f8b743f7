//! Platform-agnostic core - shared between the browser canvas, the native viewer and the CLI

pub mod animation;
pub mod color;
pub mod field;
pub mod pointer;
pub mod projection;
pub mod renderer;
pub mod surface;

pub use animation::{AnimationLoop, CancelToken, LoopState};
pub use color::{Hsl, Rgba, ThemeMode};
pub use field::{FrameStats, ParticleField, Point, Projected, SizeClass};
pub use pointer::Pointer;
pub use projection::Viewport;
pub use renderer::WaveRenderer;
pub use surface::{PaintCall, RasterSurface, RecordingSurface, Surface};
