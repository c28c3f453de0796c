//! PortfolioFx - portfolio page effects in WASM
//!
//! Snowfall, a canvas particle network, a glowing cursor follower,
//! scroll-driven navbar and hero styling, and one-shot reveals.

use std::cell::RefCell;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod config;
pub mod constants;
pub mod cursor;
pub mod dom;
pub mod frame;
pub mod interactions;
pub mod particles;
pub mod portfolio;
pub mod renderer;
pub mod reveal;
pub mod scroll;
pub mod snow;
pub mod trail;
pub mod typing;

pub use config::EffectsConfig;
pub use constants::*;
pub use frame::FrameLoop;
pub use particles::{Particle, ParticleField};
pub use portfolio::Portfolio;
pub use renderer::{NetworkRenderer, RenderResult};

thread_local! {
    static MOUNTED: RefCell<Option<Portfolio>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    let mode = if RUNTIME_CONFIGURABLE {
        "configurable"
    } else {
        "release"
    };
    console::log_1(&format!("{LOG_PREFIX} WASM loaded ({mode})").into());

    if cfg!(feature = "autostart") {
        if let Err(err) = autostart() {
            console::error_2(&format!("{LOG_PREFIX} Autostart failed:").into(), &err);
        }
    }
}

fn autostart() -> Result<(), JsValue> {
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        return mount(JsValue::UNDEFINED);
    }
    EventListener::once(&document, "DOMContentLoaded", |_| {
        if let Err(err) = mount(JsValue::UNDEFINED) {
            console::error_2(&format!("{LOG_PREFIX} Mount failed:").into(), &err);
        }
    })
    .forget();
    Ok(())
}

/// Mounts the page effects, replacing any previously mounted set.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<(), JsValue> {
    unmount();
    let portfolio = Portfolio::new(config)?;
    MOUNTED.with(|slot| *slot.borrow_mut() = Some(portfolio));
    Ok(())
}

/// Stops and removes whatever `mount` started. No-op when nothing is mounted.
#[wasm_bindgen]
pub fn unmount() {
    let previous = MOUNTED.with(|slot| slot.borrow_mut().take());
    if let Some(mut portfolio) = previous {
        portfolio.stop();
    }
}

#[wasm_bindgen]
pub fn is_runtime_configurable() -> bool {
    RUNTIME_CONFIGURABLE
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
