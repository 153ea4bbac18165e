//! `HostPage` over the live document.

use crate::{audio, dom};
use glam::Vec2;
use kitty_core::error::HostError;
use kitty_core::page::{Deferred, HostPage};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct WebPage {
    window: web::Window,
    document: web::Document,
}

impl WebPage {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow::anyhow!("no document"))?;
        Ok(Self { window, document })
    }

    pub fn document(&self) -> &web::Document {
        &self.document
    }
}

impl HostPage for WebPage {
    type Node = web::Element;

    fn viewport(&self) -> Vec2 {
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        Vec2::new(dim(self.window.inner_width()), dim(self.window.inner_height()))
    }

    fn create_element(&self, tag: &str) -> Result<web::Element, HostError> {
        self.document
            .create_element(tag)
            .map_err(|_| HostError::CreateElement(tag.to_string()))
    }

    fn append_child(&self, parent: &web::Element, child: &web::Element) {
        _ = parent.append_child(child);
    }

    fn append_to_body(&self, node: &web::Element) {
        if let Some(body) = self.document.body() {
            _ = body.append_child(node);
        }
    }

    fn remove(&self, node: &web::Element) {
        node.remove();
    }

    fn is_attached(&self, node: &web::Element) -> bool {
        node.is_connected()
    }

    fn contains(&self, ancestor: &web::Element, node: &web::Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }

    fn tag_name(&self, node: &web::Element) -> String {
        node.tag_name().to_ascii_lowercase()
    }

    fn set_style(&self, node: &web::Element, css: &str) {
        _ = node.set_attribute("style", css);
    }

    fn set_style_property(&self, node: &web::Element, name: &str, value: &str) {
        if let Some(style) = dom::style_of(node) {
            _ = style.set_property(name, value);
        }
    }

    fn set_inner_markup(&self, node: &web::Element, markup: &str) {
        node.set_inner_html(markup);
    }

    fn find_paths(&self, root: &web::Element, fill: &str, data_fragment: &str) -> Vec<web::Element> {
        let selector = format!("path[fill=\"{fill}\"][d*=\"{data_fragment}\"]");
        let Ok(list) = root.query_selector_all(&selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|n| n.dyn_into::<web::Element>().ok())
            .collect()
    }

    fn inline_fill(&self, node: &web::Element) -> Option<String> {
        dom::style_of(node)
            .and_then(|s| s.get_property_value("fill").ok())
            .filter(|v| !v.is_empty())
    }

    fn set_fill(&self, node: &web::Element, fill: Option<&str>) {
        let Some(style) = dom::style_of(node) else {
            return;
        };
        match fill {
            Some(f) => {
                _ = style.set_property("fill", f);
            }
            None => {
                _ = style.remove_property("fill");
            }
        }
    }

    fn play_sound(&self, url: &str, volume: f64) -> Result<(), HostError> {
        audio::play_cue(url, volume)
    }

    fn defer(&self, delay: Duration, task: Deferred<web::Element>) {
        let page = self.clone();
        let cb = Closure::once_into_js(move || page.run_deferred(task));
        _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.unchecked_ref(),
                delay.as_millis() as i32,
            );
    }
}
