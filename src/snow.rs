//! Snowfall made of CSS-animated flake elements

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use gloo::timers::callback::{Interval, Timeout};
use js_sys::Math;
use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlElement};

use crate::constants::*;
use crate::dom;

/// Randomized parameters for one flake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlakeSpec {
    pub left_px: f64,
    pub duration_s: f64,
    pub size_em: f64,
    pub opacity: f64,
    pub drift_px: f64,
}

impl FlakeSpec {
    /// Draws every parameter from `rand`, which yields values in `[0, 1)`.
    pub fn random(viewport_width: f64, mut rand: impl FnMut() -> f64) -> Self {
        Self {
            left_px: rand() * viewport_width,
            duration_s: SNOW_DURATION_MIN_S + rand() * SNOW_DURATION_SPAN_S,
            size_em: SNOW_SIZE_MIN_EM + rand() * SNOW_SIZE_SPAN_EM,
            opacity: SNOW_OPACITY_MIN + rand() * SNOW_OPACITY_SPAN,
            drift_px: rand() * SNOW_DRIFT_MAX_PX * 2.0 - SNOW_DRIFT_MAX_PX,
        }
    }

    /// Delay before the flake is detached. Rounded up so it never
    /// leaves before its fall animation ends.
    pub fn lifetime_ms(&self) -> u32 {
        (self.duration_s * 1000.0).ceil() as u32
    }

    fn apply(&self, flake: &HtmlElement) {
        dom::set_style(flake, "left", &format!("{}px", self.left_px));
        dom::set_style(flake, "font-size", &format!("{}em", self.size_em));
        dom::set_style(flake, "opacity", &self.opacity.to_string());
        dom::set_style(flake, "animation-duration", &format!("{}s", self.duration_s));
        dom::set_style(flake, "--drift", &format!("{}px", self.drift_px));
    }
}

/// Whether the spawner should top the population back up.
#[inline]
pub fn needs_flake(population: u32, cap: u32) -> bool {
    population < cap
}

/// Pending removal timers, keyed by flake id.
#[derive(Default)]
struct Expiries {
    next_id: u64,
    timers: HashMap<u64, Timeout>,
}

type SharedExpiries = Rc<RefCell<Expiries>>;

/// Owns the snow container, the refill timer and every flake's removal
/// timer. Dropping it cancels the timers and removes the container.
pub struct Snowfall {
    container: HtmlElement,
    cap: u32,
    expiries: SharedExpiries,
    spawner: Option<Interval>,
}

impl Snowfall {
    pub fn mount(cap: u32, spawn_interval_ms: u32) -> Result<Self, JsValue> {
        let mut snowfall = Self {
            container: dom::append_to_body("div", "snow-container")?,
            cap,
            expiries: Rc::default(),
            spawner: None,
        };

        for _ in 0..cap {
            if let Err(err) = spawn_flake(&snowfall.container, &snowfall.expiries) {
                console::warn_2(&format!("{LOG_PREFIX} Snowflake spawn failed:").into(), &err);
                break;
            }
        }

        let target = snowfall.container.clone();
        let expiries = Rc::clone(&snowfall.expiries);
        snowfall.spawner = Some(Interval::new(spawn_interval_ms, move || {
            if !needs_flake(target.child_element_count(), cap) {
                return;
            }
            if let Err(err) = spawn_flake(&target, &expiries) {
                console::warn_2(&format!("{LOG_PREFIX} Snowflake spawn failed:").into(), &err);
            }
        }));

        dom::log(&format!("Snowfall started with a cap of {cap} flakes"));
        Ok(snowfall)
    }

    pub fn population(&self) -> u32 {
        self.container.child_element_count()
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// Flakes still waiting for their removal timer.
    pub fn pending_expiries(&self) -> usize {
        self.expiries.borrow().timers.len()
    }
}

impl Drop for Snowfall {
    fn drop(&mut self) {
        self.spawner.take();
        self.expiries.borrow_mut().timers.clear();
        dom::detach(&self.container);
    }
}

fn spawn_flake(container: &HtmlElement, expiries: &SharedExpiries) -> Result<(), JsValue> {
    let (viewport_width, _) = dom::viewport_size()?;
    let spec = FlakeSpec::random(viewport_width, Math::random);

    let flake: HtmlElement = dom::document()?.create_element("div")?.dyn_into()?;
    flake.set_class_name("snowflake");
    flake.set_inner_html(SNOW_GLYPH);
    spec.apply(&flake);
    container.append_child(&flake)?;

    let mut pending = expiries.borrow_mut();
    let id = pending.next_id;
    pending.next_id += 1;

    let owner: Weak<RefCell<Expiries>> = Rc::downgrade(expiries);
    let timer = Timeout::new(spec.lifetime_ms(), move || {
        flake.remove();
        if let Some(owner) = owner.upgrade() {
            owner.borrow_mut().timers.remove(&id);
        }
    });
    pending.timers.insert(id, timer);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(value: f64) -> impl FnMut() -> f64 {
        move || value
    }

    #[test]
    fn lowest_draw_hits_range_floors() {
        let spec = FlakeSpec::random(1280.0, fixed(0.0));
        assert_eq!(spec.left_px, 0.0);
        assert_eq!(spec.duration_s, 5.0);
        assert_eq!(spec.size_em, 0.5);
        assert_eq!(spec.opacity, 0.4);
        assert_eq!(spec.drift_px, -50.0);
    }

    #[test]
    fn near_one_draw_stays_inside_ranges() {
        let spec = FlakeSpec::random(1280.0, fixed(0.999_999));
        assert!(spec.left_px < 1280.0);
        assert!(spec.duration_s < 8.0);
        assert!(spec.size_em < 1.0);
        assert!(spec.opacity < 1.0);
        assert!(spec.drift_px < 50.0);
    }

    #[test]
    fn draws_are_consumed_in_field_order() {
        let mut seq = [0.5, 0.25, 1.0 / 3.0, 0.5, 0.75].into_iter();
        let spec = FlakeSpec::random(1000.0, move || seq.next().unwrap());
        assert_eq!(spec.left_px, 500.0);
        assert_eq!(spec.duration_s, 5.75);
        assert!((spec.size_em - (0.5 + 0.5 / 3.0)).abs() < 1e-12);
        assert!((spec.opacity - 0.7).abs() < 1e-12);
        assert_eq!(spec.drift_px, 25.0);
    }

    #[test]
    fn lifetime_never_precedes_duration() {
        for draw in [0.0, 0.123_456_7, 0.5, 0.987_654_3] {
            let spec = FlakeSpec::random(800.0, fixed(draw));
            let lifetime = spec.lifetime_ms() as f64;
            assert!(lifetime >= spec.duration_s * 1000.0);
            assert!(lifetime - spec.duration_s * 1000.0 < 1.0);
        }
    }

    #[test]
    fn refill_stops_at_cap() {
        let cap = DEFAULT_SNOWFLAKE_CAP;
        let mut population = 0;
        for _ in 0..200 {
            if needs_flake(population, cap) {
                population += 1;
            }
            assert!(population <= cap);
        }
        assert_eq!(population, cap);
        assert!(needs_flake(cap - 1, cap));
        assert!(!needs_flake(cap, cap));
    }
}
