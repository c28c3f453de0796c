//! Glowing cursor follower

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::constants::*;
use crate::dom;
use crate::frame::FrameLoop;

/// Eases a marker toward the pointer by a fixed fraction per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Follower {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    smoothing: f64,
}

impl Follower {
    pub fn new(smoothing: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            target_x: 0.0,
            target_y: 0.0,
            smoothing: smoothing.clamp(0.0, 1.0),
        }
    }

    /// Latest pointer position wins.
    pub fn point_to(&mut self, x: f64, y: f64) {
        self.target_x = x;
        self.target_y = y;
    }

    pub fn step(&mut self) -> (f64, f64) {
        self.x += (self.target_x - self.x) * self.smoothing;
        self.y += (self.target_y - self.y) * self.smoothing;
        (self.x, self.y)
    }

    pub fn distance(&self) -> f64 {
        (self.target_x - self.x).hypot(self.target_y - self.y)
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn set_smoothing(&mut self, smoothing: f64) {
        self.smoothing = smoothing.clamp(0.0, 1.0);
    }
}

/// The `.cursor-glow` marker, its frame loop and its pointer listeners.
pub struct GlowCursor {
    marker: HtmlElement,
    follower: Rc<RefCell<Follower>>,
    frames: FrameLoop,
    _pointer: EventListener,
    _hover: Vec<EventListener>,
}

impl GlowCursor {
    pub fn mount(smoothing: f64) -> Result<Self, JsValue> {
        let marker = dom::append_to_body("div", "cursor-glow")?;
        let follower = Rc::new(RefCell::new(Follower::new(smoothing)));

        let pointer_follower = Rc::clone(&follower);
        let pointer = EventListener::new(dom::document()?.as_ref(), "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                pointer_follower
                    .borrow_mut()
                    .point_to(event.client_x() as f64, event.client_y() as f64);
            }
        });

        let frame_follower = Rc::clone(&follower);
        let frame_marker = marker.clone();
        let frames = FrameLoop::start(move |_| {
            let (x, y) = frame_follower.borrow_mut().step();
            dom::set_style(&frame_marker, "left", &format!("{x}px"));
            dom::set_style(&frame_marker, "top", &format!("{y}px"));
        });

        let mut hover = Vec::new();
        for target in dom::query_all(CURSOR_HOVER_SELECTOR)? {
            let enter_marker = marker.clone();
            hover.push(EventListener::new(&target, "mouseenter", move |_| {
                dom::set_style(&enter_marker, "transform", CURSOR_HOVER_TRANSFORM);
                dom::set_style(&enter_marker, "background-color", CURSOR_HOVER_COLOR);
            }));
            let leave_marker = marker.clone();
            hover.push(EventListener::new(&target, "mouseleave", move |_| {
                dom::set_style(&leave_marker, "transform", CURSOR_IDLE_TRANSFORM);
                dom::set_style(&leave_marker, "background-color", CURSOR_IDLE_COLOR);
            }));
        }

        dom::log(&format!(
            "Glow cursor following with smoothing {smoothing} over {} hover targets",
            hover.len() / 2
        ));
        Ok(Self {
            marker,
            follower,
            frames,
            _pointer: pointer,
            _hover: hover,
        })
    }

    pub fn stop(&self) {
        self.frames.stop();
    }

    pub fn position(&self) -> (f64, f64) {
        let follower = self.follower.borrow();
        (follower.x, follower.y)
    }

    #[cfg(feature = "configurable")]
    pub fn set_smoothing(&self, smoothing: f64) {
        self.follower.borrow_mut().set_smoothing(smoothing);
    }
}

impl Drop for GlowCursor {
    fn drop(&mut self) {
        dom::detach(&self.marker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_closes_a_tenth_of_the_gap() {
        let mut follower = Follower::new(DEFAULT_CURSOR_SMOOTHING);
        follower.point_to(100.0, -50.0);
        let (x, y) = follower.step();
        assert!((x - 10.0).abs() < 1e-12);
        assert!((y + 5.0).abs() < 1e-12);
    }

    #[test]
    fn gap_shrinks_geometrically_for_a_static_pointer() {
        let mut follower = Follower::new(DEFAULT_CURSOR_SMOOTHING);
        follower.point_to(300.0, 400.0);
        let mut previous = follower.distance();
        for _ in 0..20 {
            follower.step();
            let current = follower.distance();
            assert!((current - previous * 0.9).abs() < 1e-9);
            previous = current;
        }
    }

    #[test]
    fn converges_within_a_pixel_in_about_a_second() {
        let mut follower = Follower::new(DEFAULT_CURSOR_SMOOTHING);
        follower.point_to(40.0, 30.0);
        for _ in 0..60 {
            follower.step();
        }
        assert!(follower.distance() < 1.0);
    }

    #[test]
    fn latest_pointer_position_wins() {
        let mut follower = Follower::new(0.5);
        follower.point_to(10.0, 10.0);
        follower.point_to(-20.0, 40.0);
        assert_eq!(follower.step(), (-10.0, 20.0));
    }

    #[test]
    fn smoothing_is_clamped() {
        let mut follower = Follower::new(3.0);
        assert_eq!(follower.smoothing(), 1.0);
        follower.set_smoothing(-1.0);
        assert_eq!(follower.smoothing(), 0.0);
    }
}
