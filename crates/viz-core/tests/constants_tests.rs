// Host-side tests for constants and their mathematical relationships.

use viz_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn smoothing_factors_are_valid_blend_weights() {
    assert!(DRIVE_SMOOTHING > 0.0 && DRIVE_SMOOTHING <= 1.0);
    assert!(INTENSITY_SMOOTHING > 0.0 && INTENSITY_SMOOTHING <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn intensity_targets_are_ordered() {
    assert!(INTENSITY_PLAYING > INTENSITY_IDLE);
    assert!(INTENSITY_IDLE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn synth_gains_distinguish_idle_from_speaking() {
    assert!(SYNTH_GAIN_IDLE > 0.0);
    assert!(SYNTH_GAIN_SPEAKING > SYNTH_GAIN_IDLE);
    // Both well below real playback level
    assert!(SYNTH_GAIN_SPEAKING < 0.5);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wobble_clamp_band_is_sane() {
    assert!(WOBBLE_CLAMP_MIN < WOBBLE_CLAMP_MAX);
    assert!(WOBBLE_CLAMP_MIN > 0.0 && WOBBLE_CLAMP_MAX < 1.0);
    // The neutral level must sit inside the clamp band so narration wobble
    // blends smoothly with idle
    assert!(NEUTRAL_LEVEL > WOBBLE_CLAMP_MIN && NEUTRAL_LEVEL < WOBBLE_CLAMP_MAX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn transform_size_is_a_power_of_two() {
    assert!(FFT_SIZE.is_power_of_two());
    assert!(validate_fft_size(FFT_SIZE).is_ok());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn deformation_constants_are_positive_and_axes_distinct() {
    assert!(BASE_RADIUS > 0.0);
    assert!(NOISE_AMPLITUDE > 0.0);
    assert!(NOISE_TIME_RATE > 0.0);
    let [x, y, z] = NOISE_AXIS_RATES;
    assert!(x != y && y != z && x != z);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn rotation_steps_are_small_and_positive() {
    for step in [ROTATION_STEP_X, ROTATION_STEP_Y, ROTATION_STEP_Z] {
        assert!(step > 0.0 && step < 0.1);
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn startup_retry_is_bounded() {
    assert!(MAX_START_ATTEMPTS > 0);
    assert!(START_RETRY_MS > 0);
}
