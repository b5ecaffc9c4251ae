use crate::audio::AudioTap;
use crate::dom;
use crate::frame::{FrameLoop, FrameState};
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{
    AudioSource, ColorTheme, DriveSmoother, NoiseField, PipelineBackend, SphereMesh, VizError,
};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// True once the platform exposes a WebGPU entry point.
///
/// The backend may be asked to start before the page has finished wiring
/// up; callers retry on a short timer (bounded) until this turns true.
pub fn backend_ready() -> bool {
    web::window()
        .map(|w| {
            let navigator: JsValue = w.navigator().into();
            js_sys::Reflect::has(&navigator, &JsValue::from_str("gpu")).unwrap_or(false)
        })
        .unwrap_or(false)
}

/// The full set of live resources for one visualization session.
pub struct WebPipeline {
    frames: FrameLoop,
    resize: Option<dom::ResizeHook>,
    canvas: web::HtmlCanvasElement,
    state: Rc<RefCell<FrameState>>,
}

/// [`PipelineBackend`] over real browser resources.
///
/// Owns the one shared `AudioContext`: created lazily on first use, reused
/// across every pipeline generation, closed only at unmount.
pub struct WebBackend {
    container: web::HtmlElement,
    audio_ctx: Option<web::AudioContext>,
}

impl WebBackend {
    pub fn new(container: web::HtmlElement) -> Self {
        Self {
            container,
            audio_ctx: None,
        }
    }

    fn shared_audio(&mut self) -> Option<&web::AudioContext> {
        if self.audio_ctx.is_none() {
            match web::AudioContext::new() {
                Ok(ctx) => {
                    // Resume is autoplay-policy dependent; failure just means
                    // silence until the user interacts.
                    let _ = ctx.resume();
                    self.audio_ctx = Some(ctx);
                }
                Err(e) => log::warn!("AudioContext unavailable: {:?}", e),
            }
        }
        self.audio_ctx.as_ref()
    }
}

impl PipelineBackend for WebBackend {
    type Handle = WebPipeline;

    fn build(&mut self, source: &AudioSource, theme: ColorTheme) -> Result<WebPipeline, VizError> {
        if !backend_ready() {
            return Err(VizError::BackendNotReady);
        }

        // Audio failures degrade to the silent tap; the mesh keeps rendering
        // from the neutral frame.
        let audio = match self.shared_audio() {
            Some(ctx) => match AudioTap::attach(ctx, source) {
                Ok(tap) => tap,
                Err(e) => {
                    log::warn!("{e}");
                    AudioTap::silent()
                }
            },
            None => AudioTap::silent(),
        };

        let canvas = dom::create_canvas(&self.container)?;
        let bin_count = audio.bin_count();
        let mesh = SphereMesh::default();
        let state = Rc::new(RefCell::new(FrameState {
            audio,
            analyser_buf: vec![0; bin_count],
            mesh,
            noise: NoiseField::default(),
            smoother: DriveSmoother::default(),
            theme,
            rotation: Vec3::ZERO,
            gpu: None,
            canvas: canvas.clone(),
            started: Instant::now(),
            speaking: matches!(source, AudioSource::Synthesis { speaking: true }),
            has_clip: matches!(source, AudioSource::Clip(_)),
        }));

        // GPU init is async; frames run (and skip drawing) until it lands.
        {
            let state = state.clone();
            let canvas = canvas.clone();
            spawn_local(async move {
                let (vertex_count, edges, accent) = {
                    let s = state.borrow();
                    (
                        s.mesh.vertex_count(),
                        s.mesh.edge_indices().to_vec(),
                        s.theme.accent_rgb(),
                    )
                };
                match render::GpuState::new(&canvas, vertex_count, &edges, accent).await {
                    Ok(gpu) => {
                        // The pipeline may have been torn down while the
                        // device request was in flight.
                        if canvas.is_connected() {
                            state.borrow_mut().gpu = Some(gpu);
                        }
                    }
                    Err(e) => log::error!("WebGPU init error: {:?}", e),
                }
            });
        }

        let resize = dom::ResizeHook::install(&canvas);
        let frames = FrameLoop::start(state.clone());

        Ok(WebPipeline {
            frames,
            resize,
            canvas,
            state,
        })
    }

    fn cancel_frames(&mut self, handle: &mut WebPipeline) {
        handle.frames.cancel();
    }

    fn release_audio(&mut self, handle: &mut WebPipeline) {
        handle.state.borrow_mut().audio.release();
    }

    fn remove_surface(&mut self, handle: &mut WebPipeline) {
        handle.resize.take();
        handle.state.borrow_mut().gpu = None;
        dom::remove_canvas(&handle.canvas);
    }

    fn apply_theme(&mut self, handle: &mut WebPipeline, theme: ColorTheme) {
        let mut state = handle.state.borrow_mut();
        state.theme = theme;
        if let Some(gpu) = &mut state.gpu {
            gpu.set_accent(theme.accent_rgb());
        }
    }

    fn close_shared_audio(&mut self) {
        if let Some(ctx) = self.audio_ctx.take() {
            if ctx.state() != web::AudioContextState::Closed {
                if let Err(e) = ctx.close() {
                    log::warn!("error closing AudioContext: {:?}", e);
                }
            }
        }
    }
}
