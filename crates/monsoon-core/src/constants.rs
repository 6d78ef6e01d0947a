// Tuning constants for the scroll-driven atmosphere.
//
// Narrative beats (story arc knots, crossfade envelopes) are authored values,
// not derived ones. Re-tune freely but keep the calm -> buildup -> peak -> calm
// shape.

// Scroll smoothing (the single inertia stage)
pub const SCROLL_SMOOTHING_TAU_SEC: f32 = 0.12; // time constant of the exponential approach
pub const SCROLL_SNAP_EPSILON_PX: f32 = 0.5; // snap to target once this close

// Story arc: (progress, base intensity) knots. Zero outside (0.25, 0.88).
pub const STORY_ARC: [(f32, f32); 6] = [
    (0.25, 0.0),
    (0.40, 0.3),
    (0.55, 0.7),
    (0.75, 0.95),
    (0.88, 0.0),
    (1.00, 0.0),
];

// Velocity contribution (px/s)
pub const VELOCITY_BONUS_DIVISOR: f32 = 4000.0;
pub const VELOCITY_BONUS_MAX: f32 = 0.3;
pub const WIND_VELOCITY_DIVISOR: f32 = 5000.0;

// Motion blur side effect
pub const BLUR_VELOCITY_THRESHOLD: f32 = 2000.0;
pub const BLUR_VELOCITY_DIVISOR: f32 = 1000.0;
pub const BLUR_MAX_PX: f32 = 2.0;

// Rain pool
pub const RAIN_POOL_SIZE: usize = 1000;
pub const RAIN_LENGTH_MIN: f32 = 10.0;
pub const RAIN_LENGTH_SPAN: f32 = 20.0;
pub const RAIN_SPEED_MIN: f32 = 15.0;
pub const RAIN_SPEED_SPAN: f32 = 10.0;
pub const RAIN_OPACITY_MIN: f32 = 0.1;
pub const RAIN_OPACITY_SPAN: f32 = 0.5;
pub const RAIN_INTENSITY_SPEEDUP: f32 = 10.0; // extra px/frame at full intensity
pub const RAIN_WIND_DRIFT: f32 = 5.0; // px/frame at |wind| == 1
pub const RAIN_RESPAWN_JITTER: f32 = 100.0; // max extra height above the top bound
pub const RAIN_WRAP_MARGIN: f32 = 50.0;
pub const RAIN_VISIBLE_EPSILON: f32 = 0.01;
pub const RAIN_LAYER_FADE_SEC: f32 = 0.5;

// Audio crossfades
pub const VOLUME_RAMP_SEC: f32 = 0.5;
pub const MUTE_FADE_SEC: f32 = 1.0;
pub const TRACK_COUNT: usize = 4;

pub const DRY_WIND_ENVELOPE: &[(f32, f32)] = &[(0.0, 0.0), (0.04, 0.8), (0.2, 0.8), (0.35, 0.0)];
pub const THUNDER_ENVELOPE: &[(f32, f32)] = &[(0.15, 0.0), (0.3, 0.7), (0.5, 0.0)];
pub const HEAVY_RAIN_ENVELOPE: &[(f32, f32)] = &[(0.3, 0.0), (0.5, 1.0), (0.8, 0.0)];
pub const CONCLUSION_ENVELOPE: &[(f32, f32)] = &[(0.75, 0.0), (0.9, 0.6), (1.0, 0.6)];

// Scene transitions
pub const BG_SCALE_DRIFT: f32 = 0.1;
pub const CONTENT_FADE_RATE: f32 = 1.5; // content clears at p = 1/1.5
pub const CONTENT_LIFT_PX: f32 = 100.0;
pub const PARALLAX_DEFAULT_SPEED: f32 = 0.5;
// Content entrance, as fractions of the viewport height from its top
pub const ENTRANCE_START_VIEWPORT: f32 = 0.75;
pub const ENTRANCE_END_VIEWPORT: f32 = 0.30;
pub const ENTRANCE_RISE_PX: f32 = 60.0;

// Lightning envelope (seconds / opacity)
pub const LIGHTNING_ATTACK_SEC: f32 = 0.1;
pub const LIGHTNING_HOLD_SEC: f32 = 0.1;
pub const LIGHTNING_FADE_SEC: f32 = 0.2;
pub const LIGHTNING_PEAK_OPACITY: f32 = 0.8;
pub const LIGHTNING_COOLDOWN_SEC: f32 = 0.6;
pub const LIGHTNING_SURGE_VELOCITY: f32 = 1500.0;
pub const LIGHTNING_SURGE_WINDOW: (f32, f32) = (0.40, 0.60); // the railway storm scene
pub const LIGHTNING_BOLT_VARIANTS: usize = 3;
// Global progress points where the storm scenes strike on their own
pub const LIGHTNING_PROGRESS_THRESHOLDS: &[f32] = &[0.32, 0.46];

// Transient effects
pub const TRANSIENT_CAPACITY: usize = 48;
pub const RIPPLE_LIFETIME_SEC: f32 = 1.5;
pub const SHOCKWAVE_LIFETIME_SEC: f32 = 1.0;
pub const RIPPLE_MAX_SCALE: f32 = 4.0;
pub const RIPPLE_BASE_RADIUS_PX: f32 = 12.0;
pub const RIPPLE_MIN_INTERVAL_SEC: f32 = 0.08;
