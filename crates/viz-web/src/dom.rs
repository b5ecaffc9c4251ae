use viz_core::VizError;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Viewport size in CSS pixels, clamped to at least 1x1.
pub fn viewport_size() -> (u32, u32) {
    let Some(w) = web::window() else {
        return (1, 1);
    };
    let width = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let height = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    ((width as u32).max(1), (height as u32).max(1))
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let (vw, vh) = viewport_size();
        canvas.set_width(((vw as f64 * dpr) as u32).max(1));
        canvas.set_height(((vh as f64 * dpr) as u32).max(1));
    }
}

/// Create the full-viewport canvas the visualizer draws into and attach it
/// to the container. The canvas is owned by exactly one pipeline.
pub fn create_canvas(container: &web::HtmlElement) -> Result<web::HtmlCanvasElement, VizError> {
    let document = window_document().ok_or(VizError::BackendNotReady)?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| VizError::BackendNotReady)?
        .dyn_into()
        .map_err(|_| VizError::BackendNotReady)?;
    sync_canvas_backing_size(&canvas);
    container
        .append_child(&canvas)
        .map_err(|_| VizError::BackendNotReady)?;
    Ok(canvas)
}

/// Detach the canvas from the document. Safe to call on an already-detached
/// canvas.
pub fn remove_canvas(canvas: &web::HtmlCanvasElement) {
    if canvas.is_connected() {
        canvas.remove();
    }
}

/// Window resize listener whose lifetime is tied 1:1 to a pipeline.
///
/// Dropping the hook removes the listener; a late resize event after
/// teardown therefore never fires, and the closure itself checks the canvas
/// is still attached before acting.
pub struct ResizeHook {
    closure: Closure<dyn FnMut()>,
}

impl ResizeHook {
    pub fn install(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let canvas = canvas.clone();
        let closure = Closure::wrap(Box::new(move || {
            if canvas.is_connected() {
                sync_canvas_backing_size(&canvas);
            }
        }) as Box<dyn FnMut()>);
        let window = web::window()?;
        window
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .ok()?;
        Some(Self { closure })
    }
}

impl Drop for ResizeHook {
    fn drop(&mut self) {
        if let Some(window) = web::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                self.closure.as_ref().unchecked_ref(),
            );
        }
    }
}
