use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that unregisters itself when dropped.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        kind: &'static str,
        capture: bool,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback_and_bool(kind, closure.as_ref().unchecked_ref(), capture)
            .map_err(|e| log::warn!("[events] could not listen for {kind}: {:?}", e))
            .ok()?;
        Some(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }

    /// Like [`Listener::new`] but hands the handler the event as a `MouseEvent`
    /// and skips anything else.
    pub fn mouse(
        target: &web::EventTarget,
        kind: &'static str,
        capture: bool,
        mut handler: impl FnMut(&web::MouseEvent) + 'static,
    ) -> Option<Self> {
        Self::new(target, kind, capture, move |ev| {
            if let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() {
                handler(mouse);
            }
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}
