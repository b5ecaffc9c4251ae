// Host-side tests for frequency-frame reduction and fft-size validation.

use viz_core::*;

#[test]
fn fft_size_must_be_a_power_of_two() {
    assert_eq!(validate_fft_size(512).unwrap(), 256);
    assert_eq!(validate_fft_size(32).unwrap(), 16);
    assert_eq!(validate_fft_size(2048).unwrap(), 1024);

    for bad in [0, 1, 31, 100, 384, 511, 513] {
        let err = validate_fft_size(bad).unwrap_err();
        assert!(matches!(err, VizError::InvalidFftSize(n) if n == bad));
    }
}

#[test]
fn bass_is_the_lower_half_peak() {
    let mut bins = vec![0_u8; 256];
    bins[10] = 100;
    bins[60] = 200; // peak of the lower half
    bins[127] = 150;
    let levels = BandLevels::from_bins(&bins);
    assert!((levels.bass - 200.0 / 255.0).abs() < 1e-6);
}

#[test]
fn treble_is_the_upper_half_average() {
    let mut bins = vec![0_u8; 256];
    for b in &mut bins[128..] {
        *b = 51; // flat upper half
    }
    let levels = BandLevels::from_bins(&bins);
    assert!((levels.treble - 51.0 / 255.0).abs() < 1e-6);
    // Lower half is silent
    assert_eq!(levels.bass, 0.0);
}

#[test]
fn saturated_frame_normalizes_to_one() {
    let bins = vec![255_u8; 256];
    let levels = BandLevels::from_bins(&bins);
    assert!((levels.bass - 1.0).abs() < 1e-6);
    assert!((levels.treble - 1.0).abs() < 1e-6);
}

#[test]
fn degenerate_frames_fall_back_to_neutral() {
    assert_eq!(BandLevels::from_bins(&[]), BandLevels::neutral());
    assert_eq!(BandLevels::from_bins(&[7]), BandLevels::neutral());
    let neutral = BandLevels::neutral();
    assert!((neutral.bass - NEUTRAL_LEVEL).abs() < 1e-6);
    assert!((neutral.treble - NEUTRAL_LEVEL).abs() < 1e-6);
}
