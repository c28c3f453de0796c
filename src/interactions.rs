//! Navigation and card interactions, plus the console greeting

use gloo::events::{EventListener, EventListenerOptions};
use wasm_bindgen::prelude::*;
use web_sys::{console, HtmlElement, ScrollBehavior, ScrollToOptions};

use crate::constants::*;
use crate::dom;

/// Vertical scroll target that puts `section_top` just below the navbar.
pub fn anchor_offset(section_top: f64, navbar_height: f64) -> f64 {
    section_top - navbar_height
}

/// Listeners for in-page navigation and card hover/click behavior.
pub struct Interactions {
    listeners: Vec<EventListener>,
}

impl Interactions {
    pub fn mount(smooth_scroll: bool, card_hover: bool) -> Result<Self, JsValue> {
        let mut listeners = Vec::new();

        if smooth_scroll {
            for link in dom::query_all(".navbar-nav a")? {
                let target_link = link.clone();
                listeners.push(EventListener::new_with_options(
                    &link,
                    "click",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        event.prevent_default();
                        if let Err(err) = scroll_to_section(&target_link) {
                            console::warn_2(
                                &format!("{LOG_PREFIX} Smooth scroll failed:").into(),
                                &err,
                            );
                        }
                    },
                ));
            }
        }

        if card_hover {
            for card in dom::query_all(".skill-card")? {
                let enter_card = card.clone();
                listeners.push(EventListener::new(&card, "mouseenter", move |_| {
                    dom::set_style(&enter_card, "transform", SKILL_CARD_HOVER_SCALE);
                }));
                let leave_card = card.clone();
                listeners.push(EventListener::new(&card, "mouseleave", move |_| {
                    dom::set_style(&leave_card, "transform", SKILL_CARD_REST_SCALE);
                }));
            }
        }

        for card in dom::query_all(".project-card")? {
            let clicked = card.clone();
            listeners.push(EventListener::new(&card, "click", move |_| {
                let title = project_title(&clicked);
                console::log_2(&"Project clicked:".into(), &title);
            }));
        }

        Ok(Self { listeners })
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn scroll_to_section(link: &HtmlElement) -> Result<(), JsValue> {
    let Some(href) = link.get_attribute("href") else {
        return Ok(());
    };
    // Non-selector hrefs (external links) make `querySelector` throw.
    let Ok(Some(section)) = dom::query(&href) else {
        return Ok(());
    };
    let navbar_height = dom::query(".navbar")?
        .map(|navbar| navbar.offset_height() as f64)
        .unwrap_or(0.0);

    let options = ScrollToOptions::new();
    options.set_top(anchor_offset(section.offset_top() as f64, navbar_height));
    options.set_behavior(ScrollBehavior::Smooth);
    dom::window()?.scroll_to_with_scroll_to_options(&options);
    Ok(())
}

fn project_title(card: &HtmlElement) -> JsValue {
    card.query_selector("h3")
        .ok()
        .flatten()
        .and_then(|heading| heading.text_content())
        .map_or(JsValue::UNDEFINED, JsValue::from)
}

/// Styled greeting for anyone opening the devtools console.
pub fn print_banner() {
    let lines = [
        (
            "%c👋 Hey there, curious developer!",
            "color: #00D4FF; font-size: 20px; font-weight: bold;",
        ),
        (
            "%cLike what you see? Let's connect!",
            "color: #8B5CF6; font-size: 14px;",
        ),
        (
            "%c🚀 Built with Rust and WebAssembly",
            "color: #10B981; font-size: 12px;",
        ),
    ];
    for (text, style) in lines {
        console::log_2(&text.into(), &style.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_clears_the_navbar() {
        assert_eq!(anchor_offset(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_offset(40.0, 80.0), -40.0);
    }
}
