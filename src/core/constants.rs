use glam::Vec3;

// Shared scene tuning constants. Defaults for `SceneConfig` come from here.

// Host
pub const DEFAULT_CONTAINER_ID: &str = "factory-scene";

// Camera (true isometric: equal offset on all three axes)
pub const FRUSTUM_SIZE: f32 = 20.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(20.0, 20.0, 20.0);
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;

// Pointer parallax
pub const POINTER_SENSITIVITY: f32 = 0.05; // normalized pointer offset -> raw target
pub const POINTER_TARGET_SCALE: f32 = 0.5; // raw target -> group offset
pub const GROUP_EASE_RATE: f32 = 0.02; // fraction of remaining distance per frame
pub const GROUP_BASE_OFFSET: Vec3 = Vec3::new(2.0, 0.0, 0.0);

// Group "breathing"
pub const BREATH_AMPLITUDE: f32 = 0.3;
pub const BREATH_FREQUENCY: f32 = 0.5;

// Heights above the ground plane
pub const TUBE_HEIGHT: f32 = 0.1;
pub const PULSE_HEIGHT: f32 = 0.2;

// Circuit tubes
pub const TUBE_RADIUS: f32 = 0.05;
pub const TUBE_TUBULAR_SEGMENTS: usize = 64;
pub const TUBE_RADIAL_SEGMENTS: usize = 8;

// Path arc-length table resolution
pub const ARC_LENGTH_DIVISIONS: usize = 200;

// Pulses
pub const PULSES_PER_PATH: usize = 2;
pub const MAX_PULSES_PER_PATH: usize = 16;
pub const PULSE_SPEED_MIN: f32 = 0.002; // progress per frame
pub const PULSE_SPEED_MAX: f32 = 0.005;
pub const PULSE_RADIUS: f32 = 0.15;

// Floaters
pub const FLOATER_AMPLITUDE: f32 = 1.0;
pub const FLOATER_FREQUENCY: f32 = 2.0;
pub const FLOATER_OPACITY_FREQUENCY: f32 = 4.0;
pub const FLOATER_OUTER_RADIUS: f32 = 0.6;
pub const FLOATER_INNER_RADIUS: f32 = 0.35;
pub const FLOATER_TILT: f32 = std::f32::consts::FRAC_PI_4;

// Shared glow (line material) opacity: base + span * sin(freq * t)
pub const GLOW_BASE: f32 = 0.6;
pub const GLOW_SPAN: f32 = 0.4;
pub const GLOW_FREQUENCY: f32 = 3.0;

// Ground
pub const GROUND_SIZE: f32 = 30.0;

// Palette (linear RGB)
pub const GROUND_COLOR: [f32; 3] = [0.06, 0.08, 0.14];
pub const BUILDING_COLOR: [f32; 3] = [0.16, 0.2, 0.32];
pub const SILO_COLOR: [f32; 3] = [0.22, 0.27, 0.4];
pub const GLOW_COLOR: [f32; 3] = [0.2, 0.85, 1.0];
pub const PULSE_COLOR: [f32; 3] = [0.9, 1.0, 1.0];
pub const FLOATER_OUTER_COLOR: [f32; 3] = [0.04, 0.05, 0.1];
pub const FLOATER_INNER_COLOR: [f32; 3] = [0.3, 0.95, 0.75];
pub const CLEAR_COLOR: [f64; 3] = [0.02, 0.03, 0.06];

// Lights
pub const AMBIENT_COLOR: [f32; 3] = [0.55, 0.6, 0.8];
pub const AMBIENT_INTENSITY: f32 = 0.45;
pub const SUN_COLOR: [f32; 3] = [1.0, 0.97, 0.9];
pub const SUN_INTENSITY: f32 = 0.9;
pub const SUN_POSITION: Vec3 = Vec3::new(10.0, 20.0, 10.0);

// Shadow map
pub const SHADOW_MAP_SIZE: u32 = 2048;
pub const SHADOW_EXTENT: f32 = 18.0; // half-size of the light's orthographic box
pub const SHADOW_NEAR: f32 = 1.0;
pub const SHADOW_FAR: f32 = 60.0;

// Page interactions
pub const HERO_ANIMATION_DISTANCE: f64 = 600.0; // px of scroll to complete the tilt
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
pub const HERO_ROTATE_START_DEG: f64 = 20.0;
pub const HERO_SCALE_DESKTOP: (f64, f64) = (1.05, 1.0);
pub const HERO_SCALE_MOBILE: (f64, f64) = (0.7, 0.9);
pub const BUTTON_PRESS_SCALE: f64 = 0.98;
