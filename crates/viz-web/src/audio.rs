use viz_core::{
    validate_fft_size, AudioSource, VizError, FFT_SIZE, IDLE_OSC_FREQ_HZ, SYNTH_GAIN_IDLE,
    SYNTH_GAIN_SPEAKING,
};
use web_sys as web;

/// Audio-graph nodes owned by one pipeline.
enum TapNodes {
    /// Decoded clip: media element playing through the analyser to the
    /// speakers.
    Media {
        element: web::HtmlAudioElement,
        source: web::MediaElementAudioSourceNode,
        object_url: String,
    },
    /// Internal tone generator for idle/narration; routed only into the
    /// analyser, never to the destination, so it stays inaudible.
    Synth {
        osc: web::OscillatorNode,
        gain: web::GainNode,
    },
    /// Nothing wired; frames read as neutral.
    Silent,
}

/// One pipeline's tap on the shared audio context.
///
/// Both real clips and the synthetic idle tone end in the same analyser so
/// the per-frame sampling path is identical. The tap never owns the
/// `AudioContext`; that is shared across pipeline generations and closed
/// only at unmount.
pub struct AudioTap {
    analyser: Option<web::AnalyserNode>,
    bin_count: usize,
    nodes: TapNodes,
}

impl AudioTap {
    /// A tap with no analyser at all; used for `Inactive` sources and as
    /// the degraded result after an audio failure.
    pub fn silent() -> Self {
        Self {
            analyser: None,
            bin_count: 0,
            nodes: TapNodes::Silent,
        }
    }

    /// Wire the audio graph for `source` into a fresh analyser.
    pub fn attach(ctx: &web::AudioContext, source: &AudioSource) -> Result<Self, VizError> {
        match source {
            AudioSource::Clip(bytes) => Self::attach_clip(ctx, bytes),
            AudioSource::Synthesis { speaking } => Self::attach_synth(ctx, *speaking),
            AudioSource::Inactive => Ok(Self::silent()),
        }
    }

    fn create_analyser(ctx: &web::AudioContext) -> Result<(web::AnalyserNode, usize), VizError> {
        let bin_count = validate_fft_size(FFT_SIZE)?;
        let analyser = web::AnalyserNode::new(ctx)
            .map_err(|e| VizError::AudioUnavailable(format!("AnalyserNode: {e:?}")))?;
        analyser.set_fft_size(FFT_SIZE);
        Ok((analyser, bin_count))
    }

    fn attach_clip(ctx: &web::AudioContext, bytes: &[u8]) -> Result<Self, VizError> {
        let (analyser, bin_count) = Self::create_analyser(ctx)?;

        // The element and media source are built before the object URL is
        // minted; no fallible step may follow the URL or an early return
        // would strand it unrevoked.
        let element = web::HtmlAudioElement::new()
            .map_err(|e| VizError::AudioUnavailable(format!("Audio element: {e:?}")))?;
        let source = ctx
            .create_media_element_source(&element)
            .map_err(|e| VizError::AudioUnavailable(format!("media source: {e:?}")))?;

        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::of1(&array);
        let options = web::BlobPropertyBag::new();
        options.set_type("audio/mpeg");
        let blob = web::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| VizError::AudioUnavailable(format!("Blob: {e:?}")))?;
        let object_url = web::Url::create_object_url_with_blob(&blob)
            .map_err(|e| VizError::AudioUnavailable(format!("object URL: {e:?}")))?;

        element.set_src(&object_url);
        let _ = source.connect_with_audio_node(&analyser);
        let _ = analyser.connect_with_audio_node(&ctx.destination());

        // An autoplay-policy rejection surfaces as silence, not an error.
        let _ = element.play();

        Ok(Self {
            analyser: Some(analyser),
            bin_count,
            nodes: TapNodes::Media {
                element,
                source,
                object_url,
            },
        })
    }

    fn attach_synth(ctx: &web::AudioContext, speaking: bool) -> Result<Self, VizError> {
        let (analyser, bin_count) = Self::create_analyser(ctx)?;

        let osc = web::OscillatorNode::new(ctx)
            .map_err(|e| VizError::AudioUnavailable(format!("OscillatorNode: {e:?}")))?;
        osc.set_type(web::OscillatorType::Triangle);
        osc.frequency().set_value(IDLE_OSC_FREQ_HZ);

        let gain = web::GainNode::new(ctx)
            .map_err(|e| VizError::AudioUnavailable(format!("GainNode: {e:?}")))?;
        gain.gain().set_value(if speaking {
            SYNTH_GAIN_SPEAKING
        } else {
            SYNTH_GAIN_IDLE
        });

        let _ = osc.connect_with_audio_node(&gain);
        let _ = gain.connect_with_audio_node(&analyser);
        osc.start()
            .map_err(|e| VizError::AudioUnavailable(format!("oscillator start: {e:?}")))?;

        Ok(Self {
            analyser: Some(analyser),
            bin_count,
            nodes: TapNodes::Synth { osc, gain },
        })
    }

    pub fn bin_count(&self) -> usize {
        self.bin_count
    }

    /// Read the current frequency frame. Returns false when no analyser is
    /// wired; the caller then falls back to the neutral frame.
    pub fn read_frame(&self, buf: &mut [u8]) -> bool {
        match &self.analyser {
            Some(analyser) => {
                analyser.get_byte_frequency_data(buf);
                true
            }
            None => false,
        }
    }

    /// True while a decoded clip is actually producing samples.
    pub fn is_playing(&self) -> bool {
        match &self.nodes {
            TapNodes::Media { element, .. } => {
                !element.paused() && !element.ended() && element.current_time() > 0.0
            }
            _ => false,
        }
    }

    /// Stop playback, disconnect every node and revoke the object URL.
    ///
    /// Idempotent: the tap collapses to `Silent`, so a second release finds
    /// nothing to do. Must only run after the frame loop is cancelled.
    pub fn release(&mut self) {
        if let Some(analyser) = self.analyser.take() {
            let _ = analyser.disconnect();
        }
        self.bin_count = 0;
        match std::mem::replace(&mut self.nodes, TapNodes::Silent) {
            TapNodes::Media {
                element,
                source,
                object_url,
            } => {
                let _ = element.pause();
                element.set_src("");
                let _ = source.disconnect();
                let _ = web::Url::revoke_object_url(&object_url);
            }
            TapNodes::Synth { osc, gain } => {
                let _ = osc.stop();
                let _ = osc.disconnect();
                let _ = gain.disconnect();
            }
            TapNodes::Silent => {}
        }
    }
}
