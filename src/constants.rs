use glam::Vec3;

// Shared scene/visual tuning constants used by the web frontend.

// Audio
pub const FFT_SIZE: u32 = 1024; // analyser transform length; yields 512 bins
pub const SPECTRUM_UNIFORM_LEN: usize = 64; // bins forwarded to the shaders
pub const AMBIENCE_LEVEL: f32 = 0.35; // ambience loop volume when enabled
pub const AMBIENCE_SRC: &str = "audio/ambience.mp3";
pub const MODEL_SRC: &str = "assets/model.obj";

// Displacement amplitude
pub const DEFAULT_AMPLITUDE: f32 = 3.0;
pub const AMPLITUDE_MIN: f32 = 1.0;
pub const AMPLITUDE_MAX: f32 = 8.0;
pub const AMPLITUDE_STEP: f32 = 0.5;
pub const SHADER_TIME_SCALE: f32 = 0.01; // shader time runs at 1/100 of the stage clock

// Plane geometry
pub const PLANE_SIZE: f32 = 150.0;
pub const PLANE_SEGMENTS: u32 = 64;
pub const MIDDLE_PLANE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -75.0);

// Verse grid: columns side by side, rows tiling the depth-wrap span exactly
pub const VERSE_COLUMNS: usize = 3;
pub const VERSE_ROWS: usize = 5;
pub const VERSE_COLUMN_SPACING: f32 = PLANE_SIZE;
pub const VERSE_PLANE_Y: f32 = -4.0;

// Depth wrap (stage): objects travel +Z from NEAR toward FAR, then re-enter at NEAR
pub const DEPTH_NEAR: f32 = -600.0;
pub const DEPTH_FAR: f32 = 150.0;
pub const VERSE_PLANE_SPEED: f32 = 30.0; // world units per second
pub const STAGE_PARTICLE_SPEED_MIN: f32 = 40.0;
pub const STAGE_PARTICLE_SPEED_MAX: f32 = 90.0;
pub const STAGE_PARTICLE_COUNT: usize = 600;

// Rising embers (intro)
pub const EMBER_FLOOR: f32 = -10.0;
pub const EMBER_CEILING: f32 = 25.0;
pub const EMBER_SPEED_MIN: f32 = 0.6;
pub const EMBER_SPEED_MAX: f32 = 2.4;
pub const EMBER_COUNT: usize = 300;
pub const EMBER_TINT: [f32; 3] = [1.0, 0.55, 0.25];

// Particle capacity shared by both scenes' instance buffers
pub const MAX_PARTICLES: usize = 1024;

// Camera
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const LOOK_OFFSET_RANGE: f32 = 4.0; // world units the pointer can pan the intro camera
pub const LOOK_OFFSET_TAU_SEC: f32 = 0.35;

// Transitions
pub const TRANSITION_SEC: f64 = 1.0;

// Viewport
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;
pub const INTRO_BLOOM: bool = true;
