use glam::Vec3;

// Shared scene tuning constants used by the web frontend and the core.

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 5.0; // eye distance along +Z, looking at the origin

// Lighting
pub const AMBIENT_INTENSITY: f32 = 1.0;
pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
pub const KEY_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 10.0);

// Model placement once the asset has loaded
pub const MODEL_SCALE: f32 = 4.0;
pub const MODEL_POSITION: Vec3 = Vec3::new(0.0, -1.0, 0.0);
pub const MODEL_ROTATION_Y: f32 = std::f32::consts::FRAC_PI_4;

// Idle float (applied on top of the scroll timeline every frame)
pub const IDLE_FLOAT_AMPLITUDE: f32 = 0.1;
pub const IDLE_FLOAT_RATE_PER_MS: f64 = 0.001;

// Scroll timeline
pub const SEGMENT_EPSILON: f32 = 1e-6; // guards the local-t division
pub const TRIGGER_HYSTERESIS: f32 = 0.005; // latch re-arm band around a trigger
pub const DEFAULT_SCRUB_LAG_SEC: f32 = 1.0; // `scrub: 1`

// Post-processing defaults (animatable through the `post` target)
pub const BLOOM_STRENGTH: f32 = 0.35;
pub const BLOOM_STRENGTH_PEAK: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.7;
pub const EXPOSURE: f32 = 1.0;

// Nudge physics
pub const NUDGE_STIFFNESS: f32 = 18.0; // spring constant pulling back to rest
pub const NUDGE_DAMPING_RATIO: f32 = 0.35; // 0..1 critical at 1
pub const NUDGE_IMPULSE: f32 = 2.5; // velocity added by a pointer hit
pub const NUDGE_MAX_OFFSET: f32 = 0.75; // world units
pub const NUDGE_RESEED_SPREAD: f32 = 0.3; // max scatter applied by a reseed
