use crate::constants::NEUTRAL_LEVEL;
use crate::error::VizError;

/// Check an analyser transform size and return the resulting bin count.
///
/// Frequency frames carry `fft_size / 2` unsigned byte magnitudes; the
/// transform size itself must be a power of two or the analyser silently
/// misbehaves, so reject anything else up front.
pub fn validate_fft_size(fft_size: u32) -> Result<usize, VizError> {
    if fft_size >= 32 && fft_size.is_power_of_two() {
        Ok((fft_size / 2) as usize)
    } else {
        Err(VizError::InvalidFftSize(fft_size))
    }
}

/// Raw per-frame band levels in [0, 1], before any smoothing.
///
/// `bass` is the peak magnitude of the lower half of the spectrum, `treble`
/// the average of the upper half. Both are normalized against the byte
/// range so downstream mapping works in unit space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandLevels {
    pub bass: f32,
    pub treble: f32,
}

impl BandLevels {
    /// Midpoint levels used whenever no analyser data exists.
    pub fn neutral() -> Self {
        Self {
            bass: NEUTRAL_LEVEL,
            treble: NEUTRAL_LEVEL,
        }
    }

    /// Reduce one frequency frame to band levels.
    ///
    /// An empty frame degrades to the neutral levels rather than erroring;
    /// the render loop must keep running whatever the analyser does.
    pub fn from_bins(bins: &[u8]) -> Self {
        if bins.len() < 2 {
            return Self::neutral();
        }
        let half = bins.len() / 2;
        let lower = &bins[..half];
        let upper = &bins[half..];
        let peak = lower.iter().copied().max().unwrap_or(0);
        let sum: u32 = upper.iter().map(|&b| b as u32).sum();
        Self {
            bass: peak as f32 / 255.0,
            treble: sum as f32 / upper.len() as f32 / 255.0,
        }
    }
}
