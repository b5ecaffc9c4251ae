use crate::constants::*;
use crate::spectrum::BandLevels;

/// Linear remap of `val` from `[in_min, in_max]` to `[out_min, out_max]`.
#[inline]
pub fn modulate(val: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let fr = (val - in_min) / (in_max - in_min);
    out_min + fr * (out_max - out_min)
}

/// Smoothed scalar pair steering the mesh deformer each frame.
///
/// `bass` offsets the whole sphere radius, `treble` scales the noise
/// displacement. `intensity` is the playing/idle ramp, exposed so the
/// rotation speed can follow it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriveSignal {
    pub bass: f32,
    pub treble: f32,
    pub intensity: f32,
}

/// Pseudo-periodic wobble layered onto raw band levels while the assistant
/// narrates through platform speech synthesis (no analysable clip exists).
///
/// Two out-of-phase sinusoids driven by wall-clock time keep the mesh
/// moving expressively; the result is clamped so it can never swamp or
/// starve the smoother.
pub fn speaking_wobble(raw: BandLevels, elapsed_ms: f64) -> BandLevels {
    let t = elapsed_ms * WOBBLE_TIME_SCALE;
    let bass_osc = 0.5 + 0.5 * (t * WOBBLE_BASS_RATE).sin() as f32;
    let treble_osc = 0.5 + 0.5 * (t * WOBBLE_TREBLE_RATE).cos() as f32;
    BandLevels {
        bass: (raw.bass + WOBBLE_BASS_AMP * bass_osc).clamp(WOBBLE_CLAMP_MIN, WOBBLE_CLAMP_MAX),
        treble: (raw.treble + WOBBLE_TREBLE_AMP * treble_osc)
            .clamp(WOBBLE_CLAMP_MIN, WOBBLE_CLAMP_MAX),
    }
}

/// Per-pipeline smoothing state.
///
/// Band levels ease toward the raw per-frame values and the intensity
/// multiplier ramps between idle and playing, so starting or stopping
/// playback never pops visually. A fresh smoother starts at the neutral
/// levels; state never survives a pipeline swap.
#[derive(Clone, Debug)]
pub struct DriveSmoother {
    bass_level: f32,
    treble_level: f32,
    intensity: f32,
}

impl Default for DriveSmoother {
    fn default() -> Self {
        Self {
            bass_level: NEUTRAL_LEVEL,
            treble_level: NEUTRAL_LEVEL,
            intensity: INTENSITY_IDLE,
        }
    }
}

impl DriveSmoother {
    /// Advance one frame and produce the mapped drive signal.
    pub fn step(&mut self, raw: BandLevels, audio_playing: bool) -> DriveSignal {
        self.bass_level += (raw.bass - self.bass_level) * DRIVE_SMOOTHING;
        self.treble_level += (raw.treble - self.treble_level) * DRIVE_SMOOTHING;

        let target = if audio_playing {
            INTENSITY_PLAYING
        } else {
            INTENSITY_IDLE
        };
        self.intensity += (target - self.intensity) * INTENSITY_SMOOTHING;

        let bass_in = self.bass_level.clamp(0.0, 1.0).powf(BASS_EXPONENT);
        DriveSignal {
            bass: modulate(bass_in, 0.0, 1.0, 0.0, BASS_OUT_MAX),
            treble: modulate(self.treble_level.clamp(0.0, 1.0), 0.0, 1.0, 0.0, TREBLE_OUT_MAX)
                * self.intensity,
            intensity: self.intensity,
        }
    }

    /// Current smoothed `(bass, treble)` levels, pre-mapping.
    pub fn levels(&self) -> (f32, f32) {
        (self.bass_level, self.treble_level)
    }

    /// Current intensity multiplier.
    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}
