/// Spectrum mapping, smoothing and deformation tuning constants.
///
/// These constants express intended behavior (smoothing time constants,
/// clamp limits, range mappings) and keep magic numbers out of the code.
// Analyser transform size; frequency frames carry half this many bins
pub const FFT_SIZE: u32 = 512;

// Raw band level reported when no analyser data is available
pub const NEUTRAL_LEVEL: f32 = 0.2;

// Per-frame exponential smoothing factors
pub const DRIVE_SMOOTHING: f32 = 0.12; // new = old + (raw - old) * α
pub const INTENSITY_SMOOTHING: f32 = 0.08;

// Intensity multiplier targets (real playback vs. idle/narration)
pub const INTENSITY_PLAYING: f32 = 1.2;
pub const INTENSITY_IDLE: f32 = 1.0;

// Band-to-drive range mapping
pub const BASS_EXPONENT: f32 = 0.8; // sub-linear compression of the bass peak
pub const BASS_OUT_MAX: f32 = 8.0;
pub const TREBLE_OUT_MAX: f32 = 4.0;

// Narration wobble (speaking with no analysable clip)
pub const WOBBLE_TIME_SCALE: f64 = 0.002; // wall-clock ms -> phase
pub const WOBBLE_BASS_AMP: f32 = 0.15;
pub const WOBBLE_BASS_RATE: f64 = 2.1;
pub const WOBBLE_TREBLE_AMP: f32 = 0.12;
pub const WOBBLE_TREBLE_RATE: f64 = 2.7;
pub const WOBBLE_CLAMP_MIN: f32 = 0.1;
pub const WOBBLE_CLAMP_MAX: f32 = 0.9;

// Sphere deformation
pub const BASE_RADIUS: f32 = 20.0;
pub const NOISE_AMPLITUDE: f32 = 5.0;
pub const NOISE_TIME_RATE: f64 = 1e-5; // ms -> noise-space drift
// Distinct per-axis drift multipliers so the axes never move in lockstep
pub const NOISE_AXIS_RATES: [f64; 3] = [4.0, 6.0, 7.0];
pub const SPHERE_SUBDIVISIONS: u32 = 4;
pub const NOISE_SEED: u32 = 0;

// Per-frame rotation increments (radians), scaled by intensity
pub const ROTATION_STEP_X: f32 = 0.001;
pub const ROTATION_STEP_Y: f32 = 0.003;
pub const ROTATION_STEP_Z: f32 = 0.005;

// Idle/speaking tone generator
pub const IDLE_OSC_FREQ_HZ: f32 = 180.0;
pub const SYNTH_GAIN_SPEAKING: f32 = 0.12;
pub const SYNTH_GAIN_IDLE: f32 = 0.05;

// Camera and light
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 100.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const LIGHT_POSITION: [f32; 3] = [0.0, 50.0, 100.0];
pub const LIGHT_INTENSITY: f32 = 3.0;

// Rendering-backend readiness retry (bounded; never loops forever)
pub const MAX_START_ATTEMPTS: u32 = 50;
pub const START_RETRY_MS: i32 = 100;
