//! DOM access helpers

use wasm_bindgen::prelude::*;
use web_sys::{console, Document, Element, HtmlElement, Window};

use crate::constants::LOG_PREFIX;

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| "Failed to get window".into())
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| "Failed to get document".into())
}

pub fn body() -> Result<HtmlElement, JsValue> {
    document()?
        .body()
        .ok_or_else(|| "Document has no body".into())
}

/// First element matching `selector` as an `HtmlElement`, if any.
pub fn query(selector: &str) -> Result<Option<HtmlElement>, JsValue> {
    Ok(document()?
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

/// Every element matching `selector` that is an `HtmlElement`.
pub fn query_all(selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document()?.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Create a `<tag class="..">` and append it to the body.
pub fn append_to_body(tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let element: HtmlElement = document()?.create_element(tag)?.dyn_into()?;
    element.set_class_name(class);
    body()?.append_child(&element)?;
    Ok(element)
}

pub fn set_style(element: &HtmlElement, name: &str, value: &str) {
    if let Err(err) = element.style().set_property(name, value) {
        console::warn_2(&format!("{LOG_PREFIX} Failed to set {name}:").into(), &err);
    }
}

pub fn viewport_size() -> Result<(f64, f64), JsValue> {
    let window = window()?;
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

pub fn scroll_y() -> Result<f64, JsValue> {
    window()?.scroll_y()
}

pub fn detach(element: &Element) {
    element.remove();
}

pub fn log(message: &str) {
    console::log_1(&format!("{LOG_PREFIX} {message}").into());
}
