use crate::audio::AudioTap;
use crate::render;
use glam::Vec3;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use viz_core::{
    speaking_wobble, BandLevels, ColorTheme, DriveSmoother, NoiseField, SphereMesh,
    ROTATION_STEP_X, ROTATION_STEP_Y, ROTATION_STEP_Z,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one frame cycle reads and writes.
///
/// Owned by a single pipeline; shared between the animation closure, the
/// async GPU initializer and teardown through `Rc<RefCell<_>>` (the web
/// platform is single-threaded cooperative, so borrows never overlap).
pub struct FrameState {
    pub audio: AudioTap,
    pub analyser_buf: Vec<u8>,
    pub mesh: SphereMesh,
    pub noise: NoiseField,
    pub smoother: DriveSmoother,
    pub theme: ColorTheme,
    pub rotation: Vec3,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub started: Instant,
    pub speaking: bool,
    pub has_clip: bool,
}

impl FrameState {
    /// One full cycle: sample -> wobble -> smooth -> deform -> draw.
    pub fn frame(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;

        let mut raw = if self.audio.read_frame(&mut self.analyser_buf) {
            BandLevels::from_bins(&self.analyser_buf)
        } else {
            BandLevels::neutral()
        };
        if self.speaking && !self.has_clip {
            raw = speaking_wobble(raw, elapsed_ms);
        }

        let playing = self.audio.is_playing();
        let drive = self.smoother.step(raw, playing);

        self.rotation += Vec3::new(ROTATION_STEP_X, ROTATION_STEP_Y, ROTATION_STEP_Z)
            * drive.intensity;

        self.mesh.deform(&self.noise, &drive, elapsed_ms);
        self.mesh.recompute_normals();

        if let Some(gpu) = &mut self.gpu {
            gpu.set_accent(self.theme.accent_rgb());
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = gpu.render(self.mesh.vertices(), self.rotation) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

/// Self-perpetuating requestAnimationFrame chain with explicit cancellation.
///
/// Each callback performs one cycle then schedules the next; there is never
/// more than one callback in flight. `cancel` is the first teardown step of
/// a pipeline and must run before its audio nodes are touched.
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(state: Rc<RefCell<FrameState>>) -> Self {
        let alive = Rc::new(Cell::new(true));
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let tick_clone = tick.clone();
        let alive_tick = alive.clone();
        let raf_tick = raf_id.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !alive_tick.get() {
                return;
            }
            state.borrow_mut().frame();
            if let Some(w) = web::window() {
                if let Ok(id) = w.request_animation_frame(
                    tick_clone
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    raf_tick.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(w) = web::window() {
            if let Ok(id) =
                w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            {
                raf_id.set(Some(id));
            }
        }
        Self {
            alive,
            raf_id,
            tick,
        }
    }

    /// Stop the chain: the pending callback is cancelled, then the stored
    /// closure is dropped. The closure captures the cell it lives in, so it
    /// must be taken out explicitly or that cycle keeps it — and the frame
    /// state it captures — alive past teardown. Only ever called from the
    /// prop-setter and unmount paths, never from inside a tick. Idempotent.
    pub fn cancel(&self) {
        self.alive.set(false);
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
