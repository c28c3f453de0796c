//! Chain of `.cursor-circle` elements trailing the pointer

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent};

use crate::constants::*;
use crate::dom;
use crate::frame::FrameLoop;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailDot {
    pub left: f64,
    pub top: f64,
    pub scale: f64,
}

#[derive(Clone, Debug)]
pub struct Trail {
    points: Vec<(f64, f64)>,
}

impl Trail {
    pub fn new(len: usize) -> Self {
        Self {
            points: vec![(0.0, 0.0); len],
        }
    }

    /// Lays the chain out from `pointer`. Each dot records where it was
    /// placed; the next one starts partway toward its own previous spot.
    pub fn step(&mut self, pointer: (f64, f64)) -> Vec<TrailDot> {
        let len = self.points.len();
        let (mut x, mut y) = pointer;
        let mut dots = Vec::with_capacity(len);

        for i in 0..len {
            dots.push(TrailDot {
                left: x - TRAIL_OFFSET_PX,
                top: y - TRAIL_OFFSET_PX,
                scale: (len - i) as f64 / len as f64,
            });
            self.points[i] = (x, y);

            let (next_x, next_y) = self.points[(i + 1) % len];
            x += (next_x - x) * TRAIL_FOLLOW;
            y += (next_y - y) * TRAIL_FOLLOW;
        }
        dots
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Animates the page's `.cursor-circle` elements every frame.
pub struct CursorTrail {
    frames: FrameLoop,
    _pointer: EventListener,
}

impl CursorTrail {
    /// `Ok(None)` when the page has no trail circles.
    pub fn mount() -> Result<Option<Self>, JsValue> {
        let circles: Vec<HtmlElement> = dom::query_all(".cursor-circle")?;
        if circles.is_empty() {
            dom::log("No .cursor-circle elements found, cursor trail skipped");
            return Ok(None);
        }

        let pointer = Rc::new(Cell::new((0.0, 0.0)));
        let move_pointer = Rc::clone(&pointer);
        let listener = EventListener::new(dom::window()?.as_ref(), "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                move_pointer.set((event.client_x() as f64, event.client_y() as f64));
            }
        });

        let mut trail = Trail::new(circles.len());
        let frames = FrameLoop::start(move |_| {
            let dots = trail.step(pointer.get());
            for (circle, dot) in circles.iter().zip(dots) {
                dom::set_style(circle, "left", &format!("{}px", dot.left));
                dom::set_style(circle, "top", &format!("{}px", dot.top));
                dom::set_style(circle, "transform", &format!("scale({})", dot.scale));
            }
        });

        Ok(Some(Self {
            frames,
            _pointer: listener,
        }))
    }

    pub fn stop(&self) {
        self.frames.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_shrink_along_the_chain() {
        let mut trail = Trail::new(4);
        let scales: Vec<f64> = trail.step((0.0, 0.0)).iter().map(|d| d.scale).collect();
        assert_eq!(scales, [1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn head_sits_on_the_pointer() {
        let mut trail = Trail::new(3);
        let dots = trail.step((100.0, 50.0));
        assert_eq!((dots[0].left, dots[0].top), (88.0, 38.0));
    }

    #[test]
    fn followers_lag_toward_previous_positions() {
        let mut trail = Trail::new(2);
        let dots = trail.step((100.0, 0.0));
        // Second dot starts 30% of the way from the head to its old spot.
        assert!((dots[1].left - (70.0 - TRAIL_OFFSET_PX)).abs() < 1e-9);

        let dots = trail.step((100.0, 0.0));
        assert!((dots[1].left - (91.0 - TRAIL_OFFSET_PX)).abs() < 1e-9);
    }

    #[test]
    fn settles_on_a_still_pointer() {
        let mut trail = Trail::new(5);
        let mut dots = Vec::new();
        for _ in 0..200 {
            dots = trail.step((40.0, 60.0));
        }
        for dot in dots {
            assert!((dot.left - 28.0).abs() < 1e-6);
            assert!((dot.top - 48.0).abs() < 1e-6);
        }
    }
}
