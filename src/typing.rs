//! Typewriter cycling through the hero subtitle roles

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::constants::*;
use crate::dom;

/// Text to show and how long to wait before the next step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keystroke {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    role: usize,
    typed: usize,
    deleting: bool,
}

impl Typewriter {
    /// Splits `text` on the role separator. `None` if there is nothing to type.
    pub fn new(text: &str) -> Option<Self> {
        let roles: Vec<Vec<char>> = text
            .split(TYPING_ROLE_SEPARATOR)
            .filter(|role| !role.is_empty())
            .map(|role| role.chars().collect())
            .collect();
        if roles.is_empty() {
            return None;
        }
        Some(Self {
            roles,
            role: 0,
            typed: 0,
            deleting: false,
        })
    }

    pub fn step(&mut self) -> Keystroke {
        let role = &self.roles[self.role];

        if !self.deleting {
            self.typed += 1;
            let text = role[..self.typed].iter().collect();
            if self.typed == role.len() {
                self.deleting = true;
                return Keystroke {
                    text,
                    delay_ms: TYPING_HOLD_MS,
                };
            }
            return Keystroke {
                text,
                delay_ms: TYPING_CHAR_MS,
            };
        }

        self.typed -= 1;
        let text = role[..self.typed].iter().collect();
        if self.typed == 0 {
            self.deleting = false;
            self.role = (self.role + 1) % self.roles.len();
            return Keystroke {
                text,
                delay_ms: TYPING_NEXT_ROLE_MS,
            };
        }
        Keystroke {
            text,
            delay_ms: DELETING_CHAR_MS,
        }
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

struct TypingState {
    subtitle: HtmlElement,
    writer: RefCell<Typewriter>,
    pending: RefCell<Option<Timeout>>,
}

/// Drives a `Typewriter` on the `.hero-subtitle` element.
pub struct TypingAnimation {
    state: Rc<TypingState>,
    original: String,
}

impl TypingAnimation {
    /// `Ok(None)` when the page has no usable subtitle.
    pub fn mount() -> Result<Option<Self>, JsValue> {
        let Some(subtitle) = dom::query(".hero-subtitle")? else {
            dom::log("No .hero-subtitle found, typing animation skipped");
            return Ok(None);
        };
        let original = subtitle.text_content().unwrap_or_default();
        let Some(writer) = Typewriter::new(&original) else {
            return Ok(None);
        };

        dom::log(&format!("Typing through {} roles", writer.role_count()));
        let state = Rc::new(TypingState {
            subtitle,
            writer: RefCell::new(writer),
            pending: RefCell::new(None),
        });
        schedule(&state, TYPING_START_DELAY_MS);
        Ok(Some(Self { state, original }))
    }

    /// Cancels the next keystroke and puts the original text back.
    pub fn stop(&self) {
        self.state.pending.borrow_mut().take();
        self.state.subtitle.set_text_content(Some(&self.original));
    }
}

impl Drop for TypingAnimation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule(state: &Rc<TypingState>, delay_ms: u32) {
    let next = Rc::clone(state);
    let timeout = Timeout::new(delay_ms, move || {
        let stroke = next.writer.borrow_mut().step();
        next.subtitle.set_text_content(Some(&stroke.text));
        schedule(&next, stroke.delay_ms);
    });
    *state.pending.borrow_mut() = Some(timeout);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(writer: &mut Typewriter, steps: usize) -> Vec<Keystroke> {
        (0..steps).map(|_| writer.step()).collect()
    }

    #[test]
    fn types_holds_deletes_then_moves_on() {
        let mut writer = Typewriter::new("Dev • Ops").unwrap();
        let strokes = run(&mut writer, 7);
        let texts: Vec<&str> = strokes.iter().map(|k| k.text.as_str()).collect();
        let delays: Vec<u32> = strokes.iter().map(|k| k.delay_ms).collect();
        assert_eq!(texts, ["D", "De", "Dev", "De", "D", "", "O"]);
        assert_eq!(delays, [100, 100, 2000, 50, 50, 500, 100]);
    }

    #[test]
    fn wraps_back_to_first_role() {
        let mut writer = Typewriter::new("ab • c").unwrap();
        // "ab": 2 typed + 2 deleted, "c": 1 typed + 1 deleted.
        run(&mut writer, 6);
        assert_eq!(writer.step().text, "a");
    }

    #[test]
    fn handles_multibyte_roles() {
        let mut writer = Typewriter::new("Café").unwrap();
        let texts: Vec<String> = run(&mut writer, 4).into_iter().map(|k| k.text).collect();
        assert_eq!(texts, ["C", "Ca", "Caf", "Café"]);
    }

    #[test]
    fn empty_roles_are_dropped() {
        assert!(Typewriter::new("").is_none());
        assert_eq!(Typewriter::new(" • Rust • ").unwrap().role_count(), 1);
    }
}
