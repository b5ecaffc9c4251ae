use crate::error::VizError;
use crate::theme::ColorTheme;

/// Where the analyser's signal comes from.
///
/// Switching variants is always a full pipeline teardown followed by a
/// rebuild, never an in-place mutation of a live pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioSource {
    /// A recorded clip to decode and play back.
    Clip(Vec<u8>),
    /// Platform speech synthesis with no inspectable buffer; a small
    /// internal tone generator feeds the analyser instead. `speaking`
    /// selects the louder narration gain over the faint idle gain.
    Synthesis { speaking: bool },
    /// No signal at all; the render loop uses the neutral frame.
    Inactive,
}

/// Platform hooks driven by [`LifecycleManager`].
///
/// The web crate implements this over real WebAudio/WebGPU resources; tests
/// use a recording fake. Teardown is split into three ordered steps because
/// the ordering is load-bearing: the frame callback must be cancelled before
/// any audio node is disconnected, and audio released before the surface is
/// removed, so no in-flight frame ever touches a freed resource.
pub trait PipelineBackend {
    type Handle;

    /// Build a complete pipeline for `source`, painted with `theme`.
    fn build(&mut self, source: &AudioSource, theme: ColorTheme) -> Result<Self::Handle, VizError>;

    /// First teardown step: stop the per-frame callback.
    fn cancel_frames(&mut self, handle: &mut Self::Handle);

    /// Disconnect audio nodes, stop playback and release decoded media.
    fn release_audio(&mut self, handle: &mut Self::Handle);

    /// Remove the rendering surface and drop GPU resources.
    fn remove_surface(&mut self, handle: &mut Self::Handle);

    /// Repaint a live pipeline with a new accent.
    fn apply_theme(&mut self, handle: &mut Self::Handle, theme: ColorTheme);

    /// Close the shared audio context. Called once, at unmount.
    fn close_shared_audio(&mut self);
}

/// Sole owner of the pipeline; guarantees at most one is ever alive.
///
/// Every exit path (swap, failure, unmount) runs the same ordered teardown.
pub struct LifecycleManager<B: PipelineBackend> {
    backend: B,
    handle: Option<B::Handle>,
    source: AudioSource,
    theme: ColorTheme,
}

impl<B: PipelineBackend> LifecycleManager<B> {
    pub fn new(backend: B, theme: ColorTheme) -> Self {
        Self {
            backend,
            handle: None,
            source: AudioSource::Inactive,
            theme,
        }
    }

    /// Swap the audio source: tear down the current pipeline, then build a
    /// replacement for the new source.
    ///
    /// A failed build leaves the manager with no live pipeline; the error is
    /// returned so the caller can schedule a retry (`BackendNotReady`) or
    /// give up (`AudioUnavailable` already degraded inside the build).
    pub fn set_source(&mut self, source: AudioSource) -> Result<(), VizError> {
        self.teardown();
        self.source = source;
        match self.backend.build(&self.source, self.theme) {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                log::warn!("pipeline build failed: {e}");
                Err(e)
            }
        }
    }

    /// Repaint without touching the pipeline; the theme is also recorded so
    /// any subsequently built pipeline starts with it.
    pub fn set_theme(&mut self, theme: ColorTheme) {
        self.theme = theme;
        if let Some(handle) = &mut self.handle {
            self.backend.apply_theme(handle, theme);
        }
    }

    /// Ordered teardown of the live pipeline. No-op when nothing is live.
    pub fn teardown(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            self.backend.cancel_frames(&mut handle);
            self.backend.release_audio(&mut handle);
            self.backend.remove_surface(&mut handle);
        }
    }

    /// Full teardown plus release of the shared audio context.
    pub fn unmount(&mut self) {
        self.teardown();
        self.backend.close_shared_audio();
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme
    }
}

/// Monotonic counter that invalidates superseded deferred start attempts.
///
/// Every prop change bumps the generation and tags its retry chain with the
/// new token; a chain whose token is no longer current must bail out instead
/// of tearing down the pipeline a newer chain already built.
#[derive(Debug, Default)]
pub struct Generation(u64);

impl Generation {
    /// Move to the next generation and return its token.
    pub fn bump(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.0 == token
    }
}
