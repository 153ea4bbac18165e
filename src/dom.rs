use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Style handle for HTML and SVG elements alike.
pub fn style_of(el: &web::Element) -> Option<web::CssStyleDeclaration> {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        return Some(html.style());
    }
    el.dyn_ref::<web::SvgElement>().map(|svg| svg.style())
}

/// Client-space position of a mouse or pointer event.
#[inline]
pub fn pointer_px(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// The element an event was dispatched to, if it is one.
pub fn event_element(ev: &web::Event) -> Option<web::Element> {
    ev.target().and_then(|t| t.dyn_into::<web::Element>().ok())
}

/// Centre and half width of an element's box in client space.
pub fn center_and_half_width(el: &web::Element) -> (Vec2, f32) {
    let rect = el.get_bounding_client_rect();
    let center = Vec2::new(
        (rect.left() + rect.width() * 0.5) as f32,
        (rect.top() + rect.height() * 0.5) as f32,
    );
    (center, (rect.width() * 0.5) as f32)
}

pub fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}
