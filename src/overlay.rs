//! Content-script side: shows the floating avatar on whatever page the
//! extension injected us into and reacts to its show/hide messages.

use crate::dom;
use crate::events::Listener;
use crate::frame;
use crate::page::WebPage;
use glam::Vec2;
use kitty_core::constants::LASER_CUE_PATH;
use kitty_core::layer::AvatarLayers;
use kitty_core::message::OverlayMessage;
use kitty_core::overlay::{OverlayConfig, OverlayController};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = getURL)]
    fn extension_url(path: &str) -> Result<String, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime", "onMessage"], js_name = addListener)]
    fn add_runtime_listener(listener: &JsValue) -> Result<(), JsValue>;
}

struct OverlaySession {
    controller: OverlayController<WebPage>,
    listeners: Vec<Listener>,
}

type Shared = Rc<RefCell<OverlaySession>>;

/// Handle to the page overlay. Dropping it does not remove a shown avatar;
/// call `hide` first.
#[wasm_bindgen]
pub struct KittyOverlay {
    session: Shared,
    // keeps the runtime message closure alive
    _runtime_listener: Option<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl KittyOverlay {
    /// Creates the overlay controller for this page. With `listen` set, also
    /// subscribes to extension runtime messages.
    #[wasm_bindgen(constructor)]
    pub fn new(listen: bool) -> Result<KittyOverlay, JsValue> {
        let page = WebPage::new().map_err(dom::js_error)?;
        let cue_url = extension_url(LASER_CUE_PATH).unwrap_or_else(|_| LASER_CUE_PATH.to_string());
        let config = OverlayConfig {
            cue_url,
            ..OverlayConfig::default()
        };
        let session = Rc::new(RefCell::new(OverlaySession {
            controller: OverlayController::new(page, config),
            listeners: Vec::new(),
        }));

        let runtime_listener = listen.then(|| {
            let weak = Rc::downgrade(&session);
            let closure = Closure::wrap(Box::new(move |message: JsValue| {
                if let Some(session) = weak.upgrade() {
                    dispatch(&session, message);
                }
            }) as Box<dyn FnMut(JsValue)>);
            if let Err(e) = add_runtime_listener(closure.as_ref()) {
                log::warn!("[overlay] no extension runtime: {:?}", e);
            }
            closure
        });

        Ok(KittyOverlay {
            session,
            _runtime_listener: runtime_listener,
        })
    }

    /// Shows the avatar built from `{ body, eyes, mouth }` markup, replacing
    /// any avatar already on the page.
    pub fn show(&self, layers: JsValue) -> Result<(), JsValue> {
        let layers: AvatarLayers = serde_wasm_bindgen::from_value(layers)?;
        show(&self.session, &layers).map_err(dom::js_error)
    }

    pub fn hide(&self) {
        hide(&self.session);
    }

    /// Handles a raw `SHOW_KITTY` / `HIDE_KITTY` message object.
    pub fn handle_message(&self, message: JsValue) {
        dispatch(&self.session, message);
    }

    #[wasm_bindgen(getter)]
    pub fn visible(&self) -> bool {
        self.session.borrow().controller.current().is_some()
    }
}

fn dispatch(session: &Shared, message: JsValue) {
    match serde_wasm_bindgen::from_value::<OverlayMessage>(message) {
        Ok(OverlayMessage::Show { kitty_data }) => {
            if let Err(e) = show(session, &kitty_data) {
                log::error!("[overlay] show failed: {:#}", e);
            }
        }
        Ok(OverlayMessage::Hide) => hide(session),
        Err(e) => log::debug!("[overlay] ignoring message: {}", e),
    }
}

fn show(session: &Shared, layers: &AvatarLayers) -> anyhow::Result<()> {
    let handle = {
        let mut s = session.borrow_mut();
        s.listeners.clear();
        s.controller
            .show(layers)
            .map_err(|e| anyhow::anyhow!("mounting overlay: {e}"))?
    };
    let listeners = wire_listeners(session);
    session.borrow_mut().listeners = listeners;

    let weak = Rc::downgrade(session);
    frame::start_loop(move |timestamp| match weak.upgrade() {
        Some(s) => s.borrow_mut().controller.tick(handle, timestamp),
        None => ControlFlow::Break(()),
    });
    Ok(())
}

fn hide(session: &Shared) {
    let mut s = session.borrow_mut();
    if let Some(handle) = s.controller.current() {
        s.controller.hide(handle);
    }
    s.listeners.clear();
}

fn wire_listeners(session: &Shared) -> Vec<Listener> {
    let document = session.borrow().controller.page().document().clone();
    let target: &web::EventTarget = document.as_ref();
    let weak = Rc::downgrade(session);
    let with = move |f: fn(&mut OverlaySession, &web::MouseEvent)| {
        let weak: Weak<RefCell<OverlaySession>> = weak.clone();
        move |ev: &web::MouseEvent| {
            if let Some(s) = weak.upgrade() {
                f(&mut s.borrow_mut(), ev);
            }
        }
    };

    let listeners = [
        Listener::mouse(target, "pointerdown", false, with(on_pointer_down)),
        Listener::mouse(target, "pointermove", false, with(on_pointer_move)),
        Listener::mouse(target, "pointerup", false, with(on_pointer_up)),
        Listener::mouse(target, "click", true, with(on_click)),
    ];
    listeners.into_iter().flatten().collect()
}

fn on_pointer_down(s: &mut OverlaySession, ev: &web::MouseEvent) {
    let Some(target) = dom::event_element(ev) else {
        return;
    };
    if s.controller.pointer_down(&target, dom::pointer_px(ev)) {
        ev.prevent_default();
    }
}

fn on_pointer_move(s: &mut OverlaySession, ev: &web::MouseEvent) {
    s.controller.pointer_move(dom::pointer_px(ev));
}

fn on_pointer_up(s: &mut OverlaySession, _ev: &web::MouseEvent) {
    s.controller.pointer_up();
}

fn on_click(s: &mut OverlaySession, ev: &web::MouseEvent) {
    let Some(target) = dom::event_element(ev) else {
        return;
    };
    let pointer: Vec2 = dom::pointer_px(ev);
    if s.controller.click(&target, pointer).prevents_default() {
        ev.prevent_default();
        ev.stop_propagation();
    }
}
