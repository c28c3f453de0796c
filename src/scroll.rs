//! Scroll-driven navbar background and hero parallax

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::constants::*;
use crate::dom;
use crate::frame::FrameGate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavbarStyle {
    Resting,
    Scrolled,
}

impl NavbarStyle {
    /// Pure function of the offset: no hysteresis.
    pub fn for_offset(scroll_y: f64, threshold: f64) -> Self {
        if scroll_y > threshold {
            Self::Scrolled
        } else {
            Self::Resting
        }
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Resting => NAVBAR_RESTING_BACKGROUND,
            Self::Scrolled => NAVBAR_SCROLLED_BACKGROUND,
        }
    }

    pub fn shadow(self) -> &'static str {
        match self {
            Self::Resting => NAVBAR_RESTING_SHADOW,
            Self::Scrolled => NAVBAR_SCROLLED_SHADOW,
        }
    }

    fn apply(self, navbar: &HtmlElement) {
        dom::set_style(navbar, "background", self.background());
        dom::set_style(navbar, "box-shadow", self.shadow());
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    pub translate_y: f64,
    pub opacity: f64,
}

/// Hero transform for a scroll offset, or `None` once the hero has
/// scrolled a full viewport away (the last transform is left in place).
pub fn parallax(scroll_y: f64, viewport_height: f64, factor: f64) -> Option<Parallax> {
    if scroll_y < viewport_height {
        Some(Parallax {
            translate_y: scroll_y * factor,
            opacity: 1.0 - scroll_y / viewport_height,
        })
    } else {
        None
    }
}

impl Parallax {
    fn apply(self, content: &HtmlElement) {
        dom::set_style(
            content,
            "transform",
            &format!("translateY({}px)", self.translate_y),
        );
        dom::set_style(content, "opacity", &self.opacity.to_string());
    }
}

struct ParallaxTarget {
    content: HtmlElement,
    factor: f64,
    gate: FrameGate,
    frame: Option<AnimationFrame>,
}

/// Scroll listeners for the navbar and the hero. Either may be absent
/// when the page lacks the element or the effect is disabled.
pub struct ScrollEffects {
    _navbar: Option<EventListener>,
    _parallax: Option<EventListener>,
    parallax_target: Option<Rc<RefCell<ParallaxTarget>>>,
}

impl ScrollEffects {
    pub fn mount(
        navbar: bool,
        parallax: bool,
        navbar_threshold: f64,
        parallax_factor: f64,
    ) -> Result<Self, JsValue> {
        let window = dom::window()?;

        let navbar_listener = if navbar {
            Self::mount_navbar(&window, navbar_threshold)?
        } else {
            None
        };

        let (parallax_listener, parallax_target) = if parallax {
            Self::mount_parallax(&window, parallax_factor)?
        } else {
            (None, None)
        };

        Ok(Self {
            _navbar: navbar_listener,
            _parallax: parallax_listener,
            parallax_target,
        })
    }

    fn mount_navbar(
        window: &web_sys::Window,
        threshold: f64,
    ) -> Result<Option<EventListener>, JsValue> {
        let Some(navbar) = dom::query(".navbar")? else {
            dom::log("No .navbar found, navbar scroll effect skipped");
            return Ok(None);
        };

        NavbarStyle::for_offset(dom::scroll_y()?, threshold).apply(&navbar);

        Ok(Some(EventListener::new(window, "scroll", move |_| {
            if let Ok(scroll_y) = dom::scroll_y() {
                NavbarStyle::for_offset(scroll_y, threshold).apply(&navbar);
            }
        })))
    }

    #[allow(clippy::type_complexity)]
    fn mount_parallax(
        window: &web_sys::Window,
        factor: f64,
    ) -> Result<(Option<EventListener>, Option<Rc<RefCell<ParallaxTarget>>>), JsValue> {
        let Some(hero) = dom::query(".hero")? else {
            dom::log("No .hero found, parallax skipped");
            return Ok((None, None));
        };
        let Some(content) = hero
            .query_selector(".hero-content")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            dom::log("No .hero-content found, parallax skipped");
            return Ok((None, None));
        };

        let target = Rc::new(RefCell::new(ParallaxTarget {
            content,
            factor,
            gate: FrameGate::default(),
            frame: None,
        }));

        let scroll_target = Rc::clone(&target);
        let listener = EventListener::new(window, "scroll", move |_| {
            if !scroll_target.borrow_mut().gate.claim() {
                return;
            }
            let frame_target = Rc::clone(&scroll_target);
            let frame = request_animation_frame(move |_| {
                let mut target = frame_target.borrow_mut();
                target.gate.release();
                target.frame = None;
                let (Ok(scroll_y), Ok((_, viewport_height))) =
                    (dom::scroll_y(), dom::viewport_size())
                else {
                    return;
                };
                if let Some(step) = parallax(scroll_y, viewport_height, target.factor) {
                    step.apply(&target.content);
                }
            });
            scroll_target.borrow_mut().frame = Some(frame);
        });

        Ok((Some(listener), Some(target)))
    }

    /// Drops a queued parallax frame, if any.
    pub fn cancel_pending(&self) {
        if let Some(target) = &self.parallax_target {
            let mut target = target.borrow_mut();
            target.frame = None;
            target.gate.release();
        }
    }

    /// Whether a parallax frame is queued and not yet run.
    pub fn parallax_pending(&self) -> bool {
        self.parallax_target
            .as_ref()
            .is_some_and(|target| target.borrow().gate.is_pending())
    }

    pub fn parallax_frames_requested(&self) -> u64 {
        self.parallax_target
            .as_ref()
            .map_or(0, |target| target.borrow().gate.requested())
    }
}

impl Drop for ScrollEffects {
    fn drop(&mut self) {
        // The queued frame holds the target alive.
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navbar_switches_strictly_above_threshold() {
        assert_eq!(NavbarStyle::for_offset(0.0, 50.0), NavbarStyle::Resting);
        assert_eq!(NavbarStyle::for_offset(50.0, 50.0), NavbarStyle::Resting);
        assert_eq!(NavbarStyle::for_offset(50.5, 50.0), NavbarStyle::Scrolled);
    }

    #[test]
    fn navbar_has_no_hysteresis() {
        let styles: Vec<NavbarStyle> = [0.0, 60.0, 0.0]
            .into_iter()
            .map(|y| NavbarStyle::for_offset(y, DEFAULT_NAVBAR_THRESHOLD))
            .collect();
        assert_eq!(
            styles,
            vec![
                NavbarStyle::Resting,
                NavbarStyle::Scrolled,
                NavbarStyle::Resting
            ]
        );
        assert_eq!(styles[0].background(), "rgba(10, 14, 39, 0.8)");
        assert_eq!(styles[0].shadow(), "none");
        assert_eq!(styles[1].background(), "rgba(10, 14, 39, 0.95)");
        assert_eq!(styles[1].shadow(), "0 4px 30px rgba(0, 0, 0, 0.3)");
    }

    #[test]
    fn parallax_moves_and_fades_within_first_viewport() {
        let top = parallax(0.0, 800.0, 0.3).unwrap();
        assert_eq!(top.translate_y, 0.0);
        assert_eq!(top.opacity, 1.0);

        let half = parallax(400.0, 800.0, 0.3).unwrap();
        assert!((half.translate_y - 120.0).abs() < 1e-9);
        assert_eq!(half.opacity, 0.5);
    }

    #[test]
    fn parallax_stops_updating_past_one_viewport() {
        assert_eq!(parallax(800.0, 800.0, 0.3), None);
        assert_eq!(parallax(2_000.0, 800.0, 0.3), None);
    }
}
