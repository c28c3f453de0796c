//! Owner of every mounted effect

use wasm_bindgen::prelude::*;

use crate::config::EffectsConfig;
use crate::cursor::GlowCursor;
use crate::dom;
use crate::interactions::{self, Interactions};
use crate::renderer::ParticleNetwork;
use crate::reveal::RevealObserver;
use crate::scroll::ScrollEffects;
use crate::snow::Snowfall;
use crate::trail::CursorTrail;
use crate::typing::TypingAnimation;

/// All page effects mounted from one `EffectsConfig`. Effects are
/// independent; `stop` (or dropping) tears each of them down.
#[wasm_bindgen]
pub struct Portfolio {
    config: EffectsConfig,
    interactions: Option<Interactions>,
    reveal: Option<RevealObserver>,
    typing: Option<TypingAnimation>,
    scroll: Option<ScrollEffects>,
    snowfall: Option<Snowfall>,
    particles: Option<ParticleNetwork>,
    cursor: Option<GlowCursor>,
    trail: Option<CursorTrail>,
}

#[wasm_bindgen]
impl Portfolio {
    #[wasm_bindgen(constructor)]
    pub fn new(config_val: JsValue) -> Result<Portfolio, JsValue> {
        Self::with_config(EffectsConfig::from_js(config_val))
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        if let Some(particles) = &self.particles {
            particles.stop();
        }
        if let Some(cursor) = &self.cursor {
            cursor.stop();
        }
        if let Some(trail) = &self.trail {
            trail.stop();
        }
        if let Some(scroll) = &self.scroll {
            scroll.cancel_pending();
        }

        self.trail = None;
        self.cursor = None;
        self.particles = None;
        self.snowfall = None;
        self.scroll = None;
        self.typing = None;
        self.reveal = None;
        self.interactions = None;

        dom::log("Effects stopped");
    }

    pub fn is_running(&self) -> bool {
        self.interactions.is_some()
            || self.reveal.is_some()
            || self.typing.is_some()
            || self.scroll.is_some()
            || self.snowfall.is_some()
            || self.particles.is_some()
            || self.cursor.is_some()
            || self.trail.is_some()
    }

    pub fn fps(&self) -> u32 {
        self.particles.as_ref().map_or(0, ParticleNetwork::fps)
    }

    pub fn particle_count(&self) -> u32 {
        self.particles
            .as_ref()
            .map_or(0, ParticleNetwork::particle_count)
    }

    pub fn snowflake_count(&self) -> u32 {
        self.snowfall.as_ref().map_or(0, Snowfall::population)
    }

    pub fn reveal_count(&self) -> usize {
        self.reveal.as_ref().map_or(0, RevealObserver::watched)
    }

    pub fn get_config(&self) -> EffectsConfig {
        self.config.clone()
    }

    #[cfg(feature = "configurable")]
    pub fn set_connection_distance(&mut self, value: f64) {
        let value = value.max(0.0);
        self.config.connection_distance = value;
        if let Some(particles) = &self.particles {
            particles.set_connection_distance(value);
        }
    }

    #[cfg(feature = "configurable")]
    pub fn set_cursor_smoothing(&mut self, value: f64) {
        self.config.cursor_smoothing = value.clamp(0.0, 1.0);
        if let Some(cursor) = &self.cursor {
            cursor.set_smoothing(value);
        }
    }
}

impl Portfolio {
    pub fn with_config(config: EffectsConfig) -> Result<Self, JsValue> {
        let interactions = Some(Interactions::mount(
            config.smooth_scroll,
            config.card_hover,
        )?);
        let reveal = if config.reveal {
            Some(RevealObserver::mount()?)
        } else {
            None
        };
        let typing = if config.typing {
            TypingAnimation::mount()?
        } else {
            None
        };
        let scroll = if config.navbar || config.parallax {
            Some(ScrollEffects::mount(
                config.navbar,
                config.parallax,
                config.navbar_threshold,
                config.parallax_factor,
            )?)
        } else {
            None
        };

        interactions::print_banner();

        let snowfall = if config.snowfall {
            Some(Snowfall::mount(
                config.snowflake_cap,
                config.snow_spawn_interval_ms,
            )?)
        } else {
            None
        };
        let particles = if config.particles {
            Some(ParticleNetwork::mount(
                config.particle_count,
                config.connection_distance,
            )?)
        } else {
            None
        };
        let cursor = if config.glow_cursor {
            Some(GlowCursor::mount(config.cursor_smoothing)?)
        } else {
            None
        };
        let trail = if config.cursor_trail {
            CursorTrail::mount()?
        } else {
            None
        };

        dom::log("Effects mounted");
        Ok(Self {
            config,
            interactions,
            reveal,
            typing,
            scroll,
            snowfall,
            particles,
            cursor,
            trail,
        })
    }
}

impl Drop for Portfolio {
    fn drop(&mut self) {
        self.stop();
    }
}
