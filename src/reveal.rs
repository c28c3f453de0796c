//! One-shot reveal of `.fade-in` elements entering the viewport

use wasm_bindgen::prelude::*;
use web_sys::{console, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::constants::*;
use crate::dom;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Pending,
    Visible,
}

/// What to do with an element after one intersection report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealAction {
    /// Add the visible class.
    pub reveal: bool,
    /// Stop observing the element.
    pub release: bool,
}

impl RevealState {
    /// Feeds one intersection report. `reveal` is set only for the single
    /// pending to visible transition. Any intersecting report releases the
    /// element, including one already marked visible in the markup.
    pub fn observe(&mut self, is_intersecting: bool) -> RevealAction {
        if !is_intersecting {
            return RevealAction::default();
        }
        let reveal = *self == Self::Pending;
        *self = Self::Visible;
        RevealAction {
            reveal,
            release: true,
        }
    }
}

/// Wraps the `IntersectionObserver` watching every reveal element.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    watched: usize,
}

impl RevealObserver {
    pub fn mount() -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let action = state_of(&target).observe(entry.is_intersecting());
                    if action.reveal {
                        if let Err(err) = target.class_list().add_1(REVEAL_VISIBLE_CLASS) {
                            console::warn_2(&format!("{LOG_PREFIX} Reveal failed:").into(), &err);
                        }
                    }
                    if action.release {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        options.set_root_margin(REVEAL_ROOT_MARGIN);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        let elements = dom::query_all(REVEAL_SELECTOR)?;
        for element in &elements {
            observer.observe(element);
        }

        dom::log(&format!("Watching {} reveal elements", elements.len()));
        Ok(Self {
            observer,
            _callback: callback,
            watched: elements.len(),
        })
    }

    pub fn watched(&self) -> usize {
        self.watched
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn state_of(element: &Element) -> RevealState {
    if element.class_list().contains(REVEAL_VISIBLE_CLASS) {
        RevealState::Visible
    } else {
        RevealState::Pending
    }
}
