/// Page contract and web-side tuning.
///
/// Selectors and asset paths the front-end binds to, plus the few timings
/// that only matter for DOM presentation. Engine tuning lives in
/// `monsoon_core::constants`.
// Scene markup
pub const SCENE_SELECTOR: &str = ".scene";
pub const SCENE_BG_SELECTOR: &str = ".scene-bg";
pub const SCENE_CONTENT_SELECTOR: &str = ".scene-content";
pub const PARALLAX_SELECTOR: &str = ".parallax-layer";
pub const PARALLAX_SPEED_ATTR: &str = "data-speed";
pub const MOUSE_PARALLAX_SELECTOR: &str = ".mouse-parallax";

// Overlays
pub const RAIN_CANVAS_ID: &str = "rain-canvas";
pub const LIGHTNING_FLASH_SELECTOR: &str = ".lightning-flash";
pub const LIGHTNING_BOLT_SELECTOR: &str = ".lightning-bolt";
pub const CURSOR_GLOW_SELECTOR: &str = ".custom-cursor-glow";

// Bolt outlines drawn into `.lightning-bolt path`, indexed by `Bolt::variant`
pub const BOLT_PATHS: [&str; 3] = [
    "M150 0 L130 150 L200 150 L100 400 L140 250 L80 250 L120 0",
    "M200 0 L150 120 L220 120 L120 450 L160 280 L40 280 L180 0",
    "M100 0 L140 100 L80 100 L180 350 L120 200 L200 200 L130 0",
];

// Chrome
pub const PROGRESS_FILL_SELECTOR: &str = ".progress-bar-fill";
pub const PROGRESS_TEXT_SELECTOR: &str = ".progress-text";
pub const AUDIO_TOGGLE_SELECTOR: &str = ".audio-toggle";
pub const AUDIO_LABEL_SELECTOR: &str = ".audio-label";
pub const ACTIVE_CLASS: &str = "active";

// Audio assets, in `TrackId::ALL` order
pub const AUDIO_PATHS: [&str; 4] = [
    "/audio/wind_dry.mp3",
    "/audio/thunder_distant.mp3",
    "/audio/monsoon_rain.mp3",
    "/audio/birds_calm.mp3",
];

// Rain canvas stacking and stroke
pub const RAIN_CANVAS_Z_INDEX: i32 = 9000;
pub const RAIN_STROKE_RGB: &str = "174, 194, 224";
pub const RAIN_LINE_WIDTH_PX: f64 = 1.0;
pub const RING_LINE_WIDTH_PX: f64 = 1.5;

// Pointer-follow smoothing (seconds)
pub const CURSOR_FOLLOW_TAU_SEC: f32 = 0.05;
pub const MOUSE_PARALLAX_TAU_SEC: f32 = 0.35;
pub const MOUSE_PARALLAX_RANGE_PX: f32 = 20.0; // full swing, centre to edge is half

// Frame delta clamp so a backgrounded tab does not jump the simulation
pub const MAX_FRAME_DT_SEC: f32 = 0.1;
