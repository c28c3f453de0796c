//! Effect constants
//!
//! Defaults for every effect. With the `configurable` feature some of them
//! can also be changed on a running `Portfolio`.

pub const LOG_PREFIX: &str = "[Portfolio]";

// Snowfall
pub const DEFAULT_SNOWFLAKE_CAP: u32 = 50;
pub const DEFAULT_SNOW_SPAWN_INTERVAL_MS: u32 = 300;
pub const MAX_SNOWFLAKE_CAP: u32 = 500;
pub const SNOW_DURATION_MIN_S: f64 = 5.0;
pub const SNOW_DURATION_SPAN_S: f64 = 3.0;
pub const SNOW_SIZE_MIN_EM: f64 = 0.5;
pub const SNOW_SIZE_SPAN_EM: f64 = 0.5;
pub const SNOW_OPACITY_MIN: f64 = 0.4;
pub const SNOW_OPACITY_SPAN: f64 = 0.6;
pub const SNOW_DRIFT_MAX_PX: f64 = 50.0;
pub const SNOW_GLYPH: &str = "❄";

// Particle network
pub const DEFAULT_PARTICLE_COUNT: u32 = 80;
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
pub const MAX_PARTICLE_COUNT: u32 = 2_000;
pub const PARTICLE_SPEED_MAX: f64 = 0.25;
pub const PARTICLE_RADIUS_MIN: f64 = 1.0;
pub const PARTICLE_RADIUS_SPAN: f64 = 2.0;
pub const CONNECTION_MAX_ALPHA: f64 = 0.2;
pub const PARTICLE_FILL: &str = "rgba(0, 212, 255, 0.3)";
pub const CONNECTION_RGB: &str = "0, 212, 255";
pub const CONNECTION_LINE_WIDTH: f64 = 1.0;

// Glow cursor
pub const DEFAULT_CURSOR_SMOOTHING: f64 = 0.1;
pub const CURSOR_HOVER_TRANSFORM: &str = "translate(-50%, -50%) scale(1.5)";
pub const CURSOR_IDLE_TRANSFORM: &str = "translate(-50%, -50%) scale(1)";
pub const CURSOR_HOVER_COLOR: &str = "rgba(139, 92, 246, 0.3)";
pub const CURSOR_IDLE_COLOR: &str = "rgba(0, 212, 255, 0.2)";
pub const CURSOR_HOVER_SELECTOR: &str = "a, button, .glass-card";

// Scroll
pub const DEFAULT_NAVBAR_THRESHOLD: f64 = 50.0;
pub const DEFAULT_PARALLAX_FACTOR: f64 = 0.3;
pub const NAVBAR_SCROLLED_BACKGROUND: &str = "rgba(10, 14, 39, 0.95)";
pub const NAVBAR_SCROLLED_SHADOW: &str = "0 4px 30px rgba(0, 0, 0, 0.3)";
pub const NAVBAR_RESTING_BACKGROUND: &str = "rgba(10, 14, 39, 0.8)";
pub const NAVBAR_RESTING_SHADOW: &str = "none";

// Reveal
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";
pub const REVEAL_SELECTOR: &str = ".fade-in";
pub const REVEAL_VISIBLE_CLASS: &str = "visible";

// Cards
pub const SKILL_CARD_HOVER_SCALE: &str = "scale(1.02)";
pub const SKILL_CARD_REST_SCALE: &str = "scale(1)";

// Typing
pub const TYPING_ROLE_SEPARATOR: &str = " • ";
pub const TYPING_START_DELAY_MS: u32 = 1000;
pub const TYPING_CHAR_MS: u32 = 100;
pub const DELETING_CHAR_MS: u32 = 50;
pub const TYPING_HOLD_MS: u32 = 2000;
pub const TYPING_NEXT_ROLE_MS: u32 = 500;

// Cursor trail
pub const TRAIL_FOLLOW: f64 = 0.3;
pub const TRAIL_OFFSET_PX: f64 = 12.0;

// Feature flag
pub const RUNTIME_CONFIGURABLE: bool = cfg!(feature = "configurable");
