use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drives `tick` from requestAnimationFrame until it returns `Break`.
/// Cancellation is simply not requesting the next frame.
pub fn start_loop(mut tick: impl FnMut(f64) -> ControlFlow<()> + 'static) {
    let slot: FrameSlot = Rc::new(RefCell::new(None));
    let slot_tick = slot.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if tick(timestamp).is_break() {
            // the closure cannot drop itself while running
            let slot = slot_tick.clone();
            spawn_local(async move {
                slot.borrow_mut().take();
            });
            return;
        }
        request_frame(&slot_tick);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&slot);
}

fn request_frame(slot: &FrameSlot) {
    if let (Some(w), Some(cb)) = (web::window(), slot.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
