//! Effects configuration

use crate::constants::*;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Debug, PartialEq)]
pub struct EffectsConfig {
    pub snowfall: bool,
    pub particles: bool,
    pub glow_cursor: bool,
    pub reveal: bool,
    pub parallax: bool,
    pub navbar: bool,
    pub smooth_scroll: bool,
    pub card_hover: bool,
    pub typing: bool,
    pub cursor_trail: bool,

    pub snowflake_cap: u32,
    pub snow_spawn_interval_ms: u32,
    pub particle_count: u32,
    pub connection_distance: f64,
    pub cursor_smoothing: f64,
    pub navbar_threshold: f64,
    pub parallax_factor: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            snowfall: true,
            particles: true,
            glow_cursor: true,
            reveal: true,
            parallax: true,
            navbar: true,
            smooth_scroll: true,
            card_hover: true,
            // Both ship switched off on the page.
            typing: false,
            cursor_trail: false,
            snowflake_cap: DEFAULT_SNOWFLAKE_CAP,
            snow_spawn_interval_ms: DEFAULT_SNOW_SPAWN_INTERVAL_MS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            cursor_smoothing: DEFAULT_CURSOR_SMOOTHING,
            navbar_threshold: DEFAULT_NAVBAR_THRESHOLD,
            parallax_factor: DEFAULT_PARALLAX_FACTOR,
        }
    }
}

#[wasm_bindgen]
impl EffectsConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EffectsConfig {
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr, $ty:ty) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num as $ty;
                    }
                }
            };
        }

        macro_rules! toggle {
            ($field:ident, $key:expr) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(flag) = v.as_bool() {
                        config.$field = flag;
                    }
                }
            };
        }

        toggle!(snowfall, "snowfall");
        toggle!(particles, "particles");
        toggle!(glow_cursor, "glowCursor");
        toggle!(reveal, "reveal");
        toggle!(parallax, "parallax");
        toggle!(navbar, "navbar");
        toggle!(smooth_scroll, "smoothScroll");
        toggle!(card_hover, "cardHover");
        toggle!(typing, "typing");
        toggle!(cursor_trail, "cursorTrail");

        extract!(snowflake_cap, "snowflakeCap", u32);
        extract!(snow_spawn_interval_ms, "snowSpawnIntervalMs", u32);
        extract!(particle_count, "particleCount", u32);
        extract!(connection_distance, "connectionDistance", f64);
        extract!(cursor_smoothing, "cursorSmoothing", f64);
        extract!(navbar_threshold, "navbarThreshold", f64);
        extract!(parallax_factor, "parallaxFactor", f64);

        config.clamp()
    }

    /// Pulls every numeric setting back into its usable range.
    pub fn clamp(mut self) -> Self {
        self.snowflake_cap = self.snowflake_cap.min(MAX_SNOWFLAKE_CAP);
        self.particle_count = self.particle_count.min(MAX_PARTICLE_COUNT);
        self.connection_distance = self.connection_distance.max(0.0);
        self.cursor_smoothing = self.cursor_smoothing.clamp(0.0, 1.0);
        self
    }
}
