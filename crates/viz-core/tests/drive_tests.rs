// Host-side tests for the drive-signal smoothing and mapping pipeline.

use viz_core::*;

#[test]
fn modulate_maps_endpoints_and_midpoint() {
    assert!((modulate(0.0, 0.0, 1.0, 0.0, 8.0) - 0.0).abs() < 1e-6);
    assert!((modulate(1.0, 0.0, 1.0, 0.0, 8.0) - 8.0).abs() < 1e-6);
    assert!((modulate(0.5, 0.0, 1.0, 0.0, 4.0) - 2.0).abs() < 1e-6);
    // Non-unit input range
    assert!((modulate(5.0, 0.0, 10.0, 2.0, 4.0) - 3.0).abs() < 1e-6);
}

#[test]
fn smoothing_converges_to_constant_input_within_40_frames() {
    let mut smoother = DriveSmoother::default();
    let raw = BandLevels {
        bass: 0.8,
        treble: 0.8,
    };
    let mut prev_err = (0.8_f32 - NEUTRAL_LEVEL).abs();
    for _ in 0..40 {
        smoother.step(raw, false);
        let (bass, _) = smoother.levels();
        let err = (0.8 - bass).abs();
        // Monotone approach toward the constant target
        assert!(err <= prev_err + 1e-6);
        prev_err = err;
    }
    let (bass, treble) = smoother.levels();
    assert!((0.8 - bass).abs() < 0.008, "bass level {bass} not within 1%");
    assert!(
        (0.8 - treble).abs() < 0.008,
        "treble level {treble} not within 1%"
    );
}

#[test]
fn neutral_input_keeps_drive_in_the_neutral_band() {
    let mut smoother = DriveSmoother::default();
    for _ in 0..500 {
        smoother.step(BandLevels::neutral(), false);
        let (bass, treble) = smoother.levels();
        assert!((bass - NEUTRAL_LEVEL).abs() < 1e-4);
        assert!((treble - NEUTRAL_LEVEL).abs() < 1e-4);
    }
}

#[test]
fn intensity_ramps_between_idle_and_playing_without_jumps() {
    let mut smoother = DriveSmoother::default();
    let raw = BandLevels::neutral();

    let mut prev = smoother.intensity();
    for _ in 0..200 {
        smoother.step(raw, true);
        let cur = smoother.intensity();
        assert!(cur >= prev - 1e-6, "intensity must rise monotonically");
        assert!(cur <= INTENSITY_PLAYING + 1e-6);
        prev = cur;
    }
    assert!((smoother.intensity() - INTENSITY_PLAYING).abs() < 0.01);

    for _ in 0..200 {
        smoother.step(raw, false);
        let cur = smoother.intensity();
        assert!(cur <= prev + 1e-6, "intensity must fall monotonically");
        assert!(cur >= INTENSITY_IDLE - 1e-6);
        prev = cur;
    }
    assert!((smoother.intensity() - INTENSITY_IDLE).abs() < 0.01);
}

#[test]
fn saturated_bass_maps_to_full_output_range() {
    let mut smoother = DriveSmoother::default();
    let raw = BandLevels {
        bass: 1.0,
        treble: 1.0,
    };
    let mut drive = DriveSignal::default();
    for _ in 0..400 {
        drive = smoother.step(raw, false);
    }
    assert!((drive.bass - BASS_OUT_MAX).abs() < 0.05);
    assert!((drive.treble - TREBLE_OUT_MAX * INTENSITY_IDLE).abs() < 0.05);
}

#[test]
fn speaking_wobble_stays_clamped() {
    for i in 0..10_000 {
        let t = i as f64 * 16.6;
        let w = speaking_wobble(BandLevels::neutral(), t);
        assert!(w.bass >= WOBBLE_CLAMP_MIN && w.bass <= WOBBLE_CLAMP_MAX);
        assert!(w.treble >= WOBBLE_CLAMP_MIN && w.treble <= WOBBLE_CLAMP_MAX);
    }
}

#[test]
fn speaking_wobble_actually_oscillates() {
    let a = speaking_wobble(BandLevels::neutral(), 0.0);
    let b = speaking_wobble(BandLevels::neutral(), 400.0);
    assert!((a.bass - b.bass).abs() > 1e-3 || (a.treble - b.treble).abs() > 1e-3);
}

#[test]
fn speaking_wobble_is_deterministic_in_time() {
    let a = speaking_wobble(BandLevels::neutral(), 1234.5);
    let b = speaking_wobble(BandLevels::neutral(), 1234.5);
    assert_eq!(a, b);
}

#[test]
fn smoothing_is_deterministic_for_identical_sequences() {
    let seq: Vec<BandLevels> = (0..100)
        .map(|i| BandLevels {
            bass: (i as f32 * 0.37).sin().abs(),
            treble: (i as f32 * 0.21).cos().abs(),
        })
        .collect();
    let mut a = DriveSmoother::default();
    let mut b = DriveSmoother::default();
    for raw in &seq {
        let da = a.step(*raw, true);
        let db = b.step(*raw, true);
        assert_eq!(da, db);
    }
}
