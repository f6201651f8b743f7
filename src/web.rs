//! Browser binding: paints the wave field onto a fixed full-window canvas
//! behind page content.
//!
//! The page calls `WaveBackground.mount("canvas-id")` once and keeps the
//! handle; `set_dark_mode` follows the site theme; `unmount` (or dropping
//! the handle) cancels the pending frame and detaches the listeners.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::config::FieldConfig;
use crate::core::{CancelToken, Hsl, Rgba, Surface, ThemeMode, Viewport, WaveRenderer};

/// Optional page-supplied config object
const CONFIG_GLOBAL: &str = "__wave_config";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    // Initialize tracing for browser console
    tracing_wasm::set_as_global_default();
}

// ============================================================================
// CanvasSurface - Surface over a 2D context
// ============================================================================

struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill_rect(x, y, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsl) {
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.begin_path();
        if self
            .ctx
            .arc(x, y, radius, 0.0, std::f64::consts::TAU)
            .is_ok()
        {
            self.ctx.fill();
        }
    }
}

// ============================================================================
// Mounted state
// ============================================================================

type FrameClosure = Closure<dyn FnMut(f64)>;

struct Mounted {
    window: Window,
    canvas: HtmlCanvasElement,
    surface: CanvasSurface,
    renderer: WaveRenderer,
    /// Pending requestAnimationFrame id
    raf_handle: Option<i32>,
    /// Self-rescheduling frame closure of the current run
    frame_slot: Rc<RefCell<Option<FrameClosure>>>,
}

impl Mounted {
    fn cancel_frame(&mut self) {
        if let Some(handle) = self.raf_handle.take() {
            if let Err(e) = self.window.cancel_animation_frame(handle) {
                warn!(?e, "cancelAnimationFrame failed");
            }
        }
        self.frame_slot.borrow_mut().take();
    }

    fn apply_theme_style(&self) {
        let bg = match self.renderer.theme() {
            ThemeMode::Dark => "#000",
            ThemeMode::Light => "#fff",
        };
        if let Err(e) = self.canvas.style().set_property("background", bg) {
            warn!(?e, "Failed to set canvas background");
        }
    }
}

fn viewport_of(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width as u32);
    canvas.set_height(viewport.height as u32);
}

/// Start a self-rescheduling frame loop bound to `token`
fn start_loop(shared: &Rc<RefCell<Mounted>>, token: CancelToken) -> Result<(), JsValue> {
    let weak: Weak<RefCell<Mounted>> = Rc::downgrade(shared);
    let slot = Rc::new(RefCell::new(None::<FrameClosure>));
    let slot_inner = slot.clone();

    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |t: f64| {
        let Some(shared) = weak.upgrade() else {
            return;
        };
        let mut guard = shared.borrow_mut();
        let mounted = &mut *guard;
        mounted.raf_handle = None;

        if mounted
            .renderer
            .frame(&token, &mut mounted.surface, t)
            .is_none()
        {
            return;
        }

        let next = slot_inner
            .borrow()
            .as_ref()
            .map(|cb| mounted.window.request_animation_frame(cb.as_ref().unchecked_ref()));
        match next {
            Some(Ok(handle)) => mounted.raf_handle = Some(handle),
            Some(Err(e)) => warn!(?e, "requestAnimationFrame failed"),
            None => {}
        }
    }) as Box<dyn FnMut(f64)>));

    let mut mounted = shared.borrow_mut();
    let handle = {
        let cb = slot.borrow();
        let cb = cb.as_ref().ok_or("frame closure missing")?;
        mounted
            .window
            .request_animation_frame(cb.as_ref().unchecked_ref())?
    };
    mounted.raf_handle = Some(handle);
    mounted.frame_slot = slot;
    Ok(())
}

/// Resize: cancel the current run, rebuild the grid, start a new run
fn reinitialise(shared: &Rc<RefCell<Mounted>>) -> Result<(), JsValue> {
    let token = {
        let mut mounted = shared.borrow_mut();
        mounted.cancel_frame();
        let viewport = viewport_of(&mounted.window);
        size_canvas(&mounted.canvas, viewport);
        mounted.renderer.resize(viewport)
    };
    start_loop(shared, token)
}

fn load_config(window: &Window) -> FieldConfig {
    let value = match js_sys::Reflect::get(window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return FieldConfig::default(),
    };
    let json = match js_sys::JSON::stringify(&value) {
        Ok(s) => String::from(s),
        Err(e) => {
            warn!(?e, "Config object is not serialisable, using defaults");
            return FieldConfig::default();
        }
    };
    FieldConfig::from_json(&json).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring page config");
        FieldConfig::default()
    })
}

/// Initial theme: `dark` class on <html>, else the OS preference
fn detect_theme(window: &Window) -> ThemeMode {
    let class_dark = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"));
    if let Some(true) = class_dark {
        return ThemeMode::Dark;
    }
    let prefers_dark = window
        .match_media("(prefers-color-scheme: dark)")
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false);
    ThemeMode::from_dark(prefers_dark)
}

/// Fixed full-window layer behind content that lets pointer events through
fn style_background_layer(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let style = canvas.style();
    for (prop, value) in [
        ("display", "block"),
        ("position", "fixed"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100vw"),
        ("height", "100vh"),
        ("z-index", "-1"),
        ("pointer-events", "none"),
    ] {
        style.set_property(prop, value)?;
    }
    Ok(())
}

// ============================================================================
// WaveBackground - JS handle
// ============================================================================

#[wasm_bindgen]
pub struct WaveBackground {
    /// None when mounting degraded (no canvas or no 2D context)
    mounted: Option<Rc<RefCell<Mounted>>>,
    on_mouse_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    on_resize: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl WaveBackground {
    /// Mount onto the canvas with the given element id. Always returns a
    /// handle; it is inert if the canvas or its 2D context is unavailable.
    pub fn mount(canvas_id: &str) -> WaveBackground {
        match Self::try_mount(canvas_id) {
            Ok(Some(handle)) => handle,
            Ok(None) => Self::inert(),
            Err(e) => {
                warn!(?e, "Wave background failed to mount");
                Self::inert()
            }
        }
    }

    fn inert() -> WaveBackground {
        WaveBackground {
            mounted: None,
            on_mouse_move: None,
            on_resize: None,
        }
    }

    fn try_mount(canvas_id: &str) -> Result<Option<WaveBackground>, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let Some(element) = document.get_element_by_id(canvas_id) else {
            warn!(canvas_id, "No canvas element");
            return Ok(None);
        };
        let canvas: HtmlCanvasElement = element.dyn_into()?;

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            debug!(canvas_id, "No 2D context, background disabled");
            return Ok(None);
        };

        style_background_layer(&canvas)?;
        let viewport = viewport_of(&window);
        size_canvas(&canvas, viewport);

        let renderer = WaveRenderer::new(load_config(&window), viewport, detect_theme(&window));
        let shared = Rc::new(RefCell::new(Mounted {
            window: window.clone(),
            canvas,
            surface: CanvasSurface { ctx },
            renderer,
            raf_handle: None,
            frame_slot: Rc::new(RefCell::new(None)),
        }));

        let token = {
            let mut mounted = shared.borrow_mut();
            mounted.apply_theme_style();
            mounted.renderer.mount()
        };
        start_loop(&shared, token)?;

        // Pointer input only records the position
        let weak = Rc::downgrade(&shared);
        let on_mouse_move = Closure::wrap(Box::new(move |e: MouseEvent| {
            if let Some(shared) = weak.upgrade() {
                shared
                    .borrow_mut()
                    .renderer
                    .pointer_moved(e.client_x() as f64, e.client_y() as f64);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        window.add_event_listener_with_callback(
            "mousemove",
            on_mouse_move.as_ref().unchecked_ref(),
        )?;

        let weak = Rc::downgrade(&shared);
        let on_resize = Closure::wrap(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                if let Err(e) = reinitialise(&shared) {
                    warn!(?e, "Failed to restart after resize");
                }
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        Ok(Some(WaveBackground {
            mounted: Some(shared),
            on_mouse_move: Some(on_mouse_move),
            on_resize: Some(on_resize),
        }))
    }

    /// Follow the site theme. Takes effect on the next frame, no rebuild.
    pub fn set_dark_mode(&mut self, dark: bool) {
        if let Some(shared) = &self.mounted {
            let mut mounted = shared.borrow_mut();
            mounted.renderer.set_theme(ThemeMode::from_dark(dark));
            mounted.apply_theme_style();
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.borrow().renderer.is_running())
    }

    /// Cancel the pending frame and detach listeners. Idempotent.
    pub fn unmount(&mut self) {
        let Some(shared) = self.mounted.take() else {
            return;
        };
        let mut mounted = shared.borrow_mut();
        mounted.renderer.unmount();
        mounted.cancel_frame();

        if let Some(cb) = self.on_mouse_move.take() {
            if let Err(e) = mounted
                .window
                .remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref())
            {
                warn!(?e, "Failed to detach mousemove");
            }
        }
        if let Some(cb) = self.on_resize.take() {
            if let Err(e) = mounted
                .window
                .remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
            {
                warn!(?e, "Failed to detach resize");
            }
        }
    }
}

impl Drop for WaveBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn append(tag: &str, id: &str) -> web_sys::Element {
        let document = web_sys::window().unwrap().document().unwrap();
        let element = document.create_element(tag).unwrap();
        element.set_id(id);
        document.body().unwrap().append_child(&element).unwrap();
        element
    }

    #[wasm_bindgen_test]
    fn missing_element_gives_inert_handle() {
        let mut handle = WaveBackground::mount("no-such-canvas");
        assert!(!handle.is_running());
        handle.set_dark_mode(false);
        handle.unmount();
        handle.unmount();
        assert!(!handle.is_running());
    }

    #[wasm_bindgen_test]
    fn non_canvas_element_gives_inert_handle() {
        let div = append("div", "wave-not-a-canvas");
        let handle = WaveBackground::mount("wave-not-a-canvas");
        assert!(!handle.is_running());
        div.remove();
    }

    #[wasm_bindgen_test]
    fn canvas_without_2d_context_gives_inert_handle() {
        let element = append("canvas", "wave-no-2d");
        let canvas: HtmlCanvasElement = element.clone().dyn_into().unwrap();
        // A canvas bound to another context kind has no 2D context
        let _ = canvas.get_context("bitmaprenderer");
        assert!(canvas.get_context("2d").unwrap().is_none());

        let handle = WaveBackground::mount("wave-no-2d");
        assert!(!handle.is_running());
        element.remove();
    }

    #[wasm_bindgen_test]
    fn canvas_mounts_and_unmounts() {
        let element = append("canvas", "wave-ok");
        let mut handle = WaveBackground::mount("wave-ok");
        assert!(handle.is_running());
        handle.unmount();
        assert!(!handle.is_running());
        element.remove();
    }
}
