#![cfg(target_arch = "wasm32")]
//! Browser-facing audio-reactive visualizer for the Foodie AI chat surface.
//!
//! The chat component feeds three props into [`Visualizer`]: synthesized
//! speech bytes (when a clip exists), the logical speaking flag, and the
//! dietary color theme. Everything else — the WebAudio graph, the WebGPU
//! scene and the frame loop — is owned here and fully rebuilt on every
//! source change.

use std::cell::RefCell;
use std::rc::Rc;
use viz_core::{
    AudioSource, ColorTheme, Generation, LifecycleManager, VizError, MAX_START_ATTEMPTS,
    START_RETRY_MS,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod audio;
mod dom;
mod frame;
mod pipeline;
mod render;

use pipeline::WebBackend;

struct Inner {
    manager: LifecycleManager<WebBackend>,
    clip: Option<Vec<u8>>,
    speaking: bool,
    generation: Generation,
}

impl Inner {
    fn desired_source(&self) -> AudioSource {
        match &self.clip {
            Some(bytes) => AudioSource::Clip(bytes.clone()),
            None => AudioSource::Synthesis {
                speaking: self.speaking,
            },
        }
    }
}

/// The audio-reactive 3D visualization component.
///
/// Purely reactive: no outbound events, renders into a full-viewport canvas
/// it owns exclusively inside the given container element.
#[wasm_bindgen]
pub struct Visualizer {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl Visualizer {
    /// Mount into the element with the given id.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<Visualizer, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let container = dom::window_document()
            .and_then(|d| d.get_element_by_id(container_id))
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
            .ok_or_else(|| JsValue::from_str("missing visualizer container"))?;

        let inner = Rc::new(RefCell::new(Inner {
            manager: LifecycleManager::new(WebBackend::new(container), ColorTheme::default()),
            clip: None,
            speaking: false,
            generation: Generation::default(),
        }));
        let viz = Visualizer { inner };
        viz.apply();
        Ok(viz)
    }

    /// Supply (or clear) the synthesized speech clip. Any change swaps the
    /// whole pipeline.
    pub fn set_audio_clip(&self, bytes: Option<js_sys::Uint8Array>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.clip = bytes.map(|b| b.to_vec());
        }
        self.apply();
    }

    /// Toggle the narration flag used while platform speech synthesis talks
    /// without exposing an analysable stream.
    pub fn set_speaking(&self, speaking: bool) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.speaking == speaking {
                return;
            }
            inner.speaking = speaking;
        }
        self.apply();
    }

    /// Change the accent color ("meat", "vegetarian", "vegan"). Repaints in
    /// place; never rebuilds the pipeline.
    pub fn set_color_theme(&self, name: &str) -> Result<(), JsValue> {
        let theme = ColorTheme::parse(name)
            .ok_or_else(|| JsValue::from_str("unknown color theme"))?;
        self.inner.borrow_mut().manager.set_theme(theme);
        Ok(())
    }

    /// Full teardown, including the shared audio context. The component is
    /// inert afterwards.
    pub fn dispose(&self) {
        self.inner.borrow_mut().manager.unmount();
    }
}

impl Visualizer {
    fn apply(&self) {
        let token = self.inner.borrow_mut().generation.bump();
        start_with_retry(self.inner.clone(), token, 0);
    }
}

/// Start (or restart) the pipeline for the currently desired source.
///
/// If the rendering backend has not finished loading yet, retry on a fixed
/// short delay up to a bounded attempt count, then give up silently — the
/// chat surface stays usable either way. Each prop change bumps the
/// generation, so a retry scheduled before the change bails here rather
/// than rebuilding the pipeline the newer chain already started.
fn start_with_retry(inner: Rc<RefCell<Inner>>, token: u64, attempt: u32) {
    if !inner.borrow().generation.is_current(token) {
        return;
    }
    let source = inner.borrow().desired_source();
    let result = inner.borrow_mut().manager.set_source(source);
    match result {
        Ok(()) => {}
        Err(VizError::BackendNotReady) if attempt < MAX_START_ATTEMPTS => {
            schedule(START_RETRY_MS, move || {
                start_with_retry(inner, token, attempt + 1);
            });
        }
        Err(_) => {}
    }
}

fn schedule(delay_ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web::window() else { return };
    let closure = Closure::once_into_js(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.unchecked_ref(),
        delay_ms,
    );
}
