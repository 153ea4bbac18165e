//! The in-app designer view exported to JS.
//!
//! Mounts three stacked layer boxes into a host element, keeps them in sync
//! with the core `Designer`, fetches artwork when traits change and persists
//! choices after the quiet period.

use crate::assets;
use crate::constants::*;
use crate::dom;
use crate::events::Listener;
use crate::frame;
use crate::storage::LocalStorageStore;
use instant::Instant;
use kitty_core::catalog::{BodyShape, EyeStyle, MouthStyle, Pattern};
use kitty_core::compositor::LoadTicket;
use kitty_core::constants::{EYE_TRANSLATE_PX, SAVE_DEBOUNCE};
use kitty_core::designer::Designer;
use kitty_core::effects::eye_transform;
use kitty_core::layer::LayerKind;
use kitty_core::message::OverlayMessage;
use kitty_core::palette::Slot;
use kitty_core::session::Identity;
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct DesignerView {
    designer: Designer<LocalStorageStore>,
    container: web::Element,
    // body, mouth, eyes: the same order as LayerKind::STACK
    layers: Vec<(LayerKind, web::Element)>,
    on_change: Option<js_sys::Function>,
    save_timer: Option<i32>,
    _pointer: Option<Listener>,
}

type Shared = Rc<RefCell<DesignerView>>;

#[wasm_bindgen]
pub struct KittyDesigner {
    view: Shared,
}

#[wasm_bindgen]
impl KittyDesigner {
    /// Mounts the designer into the element with id `container_id`.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<KittyDesigner, JsValue> {
        let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{container_id}")))?;

        let mut layers = Vec::with_capacity(LayerKind::STACK.len());
        for kind in LayerKind::STACK {
            let el = document.create_element("div")?;
            let mut css = format!("{DESIGNER_LAYER_CSS} z-index: {};", kind.z_index());
            if kind == LayerKind::Eyes {
                css.push_str(&format!(" transition: {DESIGNER_EYES_TRANSITION};"));
            }
            el.set_attribute("style", &css)?;
            container.append_child(&el)?;
            layers.push((kind, el));
        }

        let view = Rc::new(RefCell::new(DesignerView {
            designer: Designer::new(LocalStorageStore),
            container,
            layers,
            on_change: None,
            save_timer: None,
            _pointer: None,
        }));

        let weak = Rc::downgrade(&view);
        let window: web::EventTarget = web::window()
            .ok_or_else(|| JsValue::from_str("no window"))?
            .into();
        let pointer = Listener::mouse(&window, "pointermove", false, move |ev| {
            if let Some(view) = weak.upgrade() {
                let mut v = view.borrow_mut();
                let (center, half_width) = dom::center_and_half_width(&v.container);
                v.designer
                    .pointer_moved(center, dom::pointer_px(ev), half_width);
            }
        });
        view.borrow_mut()._pointer = pointer;

        let weak = Rc::downgrade(&view);
        frame::start_loop(move |timestamp| match weak.upgrade() {
            Some(view) => view.borrow_mut().tick(timestamp),
            None => ControlFlow::Break(()),
        });

        render(&view);
        log::info!("[designer] mounted into #{container_id}");
        Ok(KittyDesigner { view })
    }

    /// Called with the avatar snapshot after every visible change.
    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        self.view.borrow_mut().on_change = callback;
    }

    pub fn login(&self, identity: &str) -> Result<(), JsValue> {
        let identity = Identity::new(identity).ok_or_else(|| JsValue::from_str("blank identity"))?;
        log::info!("[designer] signed in {identity}");
        let ticket = self.view.borrow_mut().designer.login(identity);
        after_change(&self.view, ticket, false);
        Ok(())
    }

    pub fn logout(&self) {
        let mut v = self.view.borrow_mut();
        v.designer.logout();
        v.cancel_save_timer();
        drop(v);
        render(&self.view);
    }

    pub fn set_body(&self, name: &str) -> Result<(), JsValue> {
        let body: BodyShape = name.parse().map_err(dom::js_error)?;
        self.mutate(|d, now| d.set_body(body, now));
        Ok(())
    }

    pub fn set_pattern(&self, name: &str) -> Result<(), JsValue> {
        let pattern: Pattern = name.parse().map_err(dom::js_error)?;
        self.mutate(|d, now| d.set_pattern(pattern, now));
        Ok(())
    }

    pub fn set_eyes(&self, name: &str) -> Result<(), JsValue> {
        let eyes: EyeStyle = name.parse().map_err(dom::js_error)?;
        self.mutate(|d, now| d.set_eyes(eyes, now));
        Ok(())
    }

    pub fn set_mouth(&self, name: &str) -> Result<(), JsValue> {
        let mouth: MouthStyle = name.parse().map_err(dom::js_error)?;
        self.mutate(|d, now| d.set_mouth(mouth, now));
        Ok(())
    }

    /// `slot` is one of `primary`, `secondary`, `tertiary`, `eyeColor`.
    pub fn set_swatch(&self, slot: &str, name: &str) -> Result<(), JsValue> {
        let slot: Slot = slot.parse().map_err(dom::js_error)?;
        slot.lookup(name).map_err(dom::js_error)?;
        self.mutate(|d, now| d.set_swatch(slot, name, now).ok().flatten());
        Ok(())
    }

    pub fn randomize(&self) {
        self.mutate(|d, now| d.randomize(&mut rand::thread_rng(), now));
    }

    /// `{ layers: { body, eyes, mouth } | null, loading, error }`
    pub fn avatar(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.view.borrow().designer.avatar())?)
    }

    pub fn preferences(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.view.borrow().designer.preferences())?)
    }

    /// `[x, y]` in tracker units, for hosts applying their own transform.
    pub fn eye_offset(&self) -> Vec<f32> {
        self.view.borrow().designer.eye_offset().to_array().to_vec()
    }

    /// The `SHOW_KITTY` message for the current avatar, or `null` while it
    /// is not ready.
    pub fn show_message(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.view.borrow().designer.avatar();
        match snapshot.layers {
            Some(kitty_data) => {
                Ok(serde_wasm_bindgen::to_value(&OverlayMessage::Show { kitty_data })?)
            }
            None => Ok(JsValue::NULL),
        }
    }

    /// Stops tracking and removes the layer boxes.
    pub fn unmount(&self) {
        let mut v = self.view.borrow_mut();
        v.designer.unmount();
        v.cancel_save_timer();
        v._pointer = None;
        for (_, el) in v.layers.drain(..) {
            el.remove();
        }
        log::info!("[designer] unmounted");
    }
}

impl KittyDesigner {
    fn mutate(
        &self,
        f: impl FnOnce(&mut Designer<LocalStorageStore>, Instant) -> Option<LoadTicket>,
    ) {
        let ticket = {
            let mut v = self.view.borrow_mut();
            f(&mut v.designer, Instant::now())
        };
        after_change(&self.view, ticket, true);
    }
}

impl DesignerView {
    fn tick(&mut self, timestamp: f64) -> ControlFlow<()> {
        self.designer.tick(timestamp)?;
        let offset = self.designer.eye_offset() * EYE_TRANSLATE_PX;
        if let Some((_, eyes)) = self.layers.iter().find(|(k, _)| *k == LayerKind::Eyes) {
            if let Some(style) = dom::style_of(eyes) {
                _ = style.set_property("transform", &eye_transform(offset));
            }
        }
        ControlFlow::Continue(())
    }

    fn cancel_save_timer(&mut self) {
        if let (Some(id), Some(w)) = (self.save_timer.take(), web::window()) {
            w.clear_timeout_with_handle(id);
        }
    }
}

fn after_change(view: &Shared, ticket: Option<LoadTicket>, schedule_save: bool) {
    if let Some(ticket) = ticket {
        let weak = Rc::downgrade(view);
        spawn_local(async move {
            let result = assets::fetch_layers(&ticket.keys).await;
            if let Some(view) = weak.upgrade() {
                let fresh = view.borrow_mut().designer.complete_load(ticket, result);
                if fresh {
                    render(&view);
                }
            }
        });
    }
    if schedule_save && view.borrow().designer.save_pending() {
        arm_save_timer(view);
    }
    render(view);
}

fn arm_save_timer(view: &Shared) {
    let Some(window) = web::window() else {
        return;
    };
    view.borrow_mut().cancel_save_timer();
    let weak: Weak<RefCell<DesignerView>> = Rc::downgrade(view);
    let cb = Closure::once_into_js(move || {
        if let Some(view) = weak.upgrade() {
            let mut v = view.borrow_mut();
            v.save_timer = None;
            // failures are logged by the designer; the selection stays in memory
            _ = v.designer.poll_save(Instant::now());
        }
    });
    let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        SAVE_DEBOUNCE.as_millis() as i32,
    );
    view.borrow_mut().save_timer = id.ok();
}

fn render(view: &Shared) {
    let v = view.borrow();
    let snapshot = v.designer.avatar();
    let state = if !v.designer.is_active() {
        STATE_SIGNED_OUT
    } else if snapshot.loading {
        STATE_LOADING
    } else if snapshot.error.is_some() {
        STATE_ERROR
    } else {
        STATE_READY
    };
    _ = v.container.set_attribute(STATE_ATTRIBUTE, state);
    match &snapshot.error {
        Some(e) => {
            _ = v.container.set_attribute("title", e);
        }
        None => {
            _ = v.container.remove_attribute("title");
        }
    }
    for (kind, el) in &v.layers {
        let markup = snapshot.layers.as_ref().map_or("", |l| l.get(*kind));
        el.set_inner_html(markup);
    }

    let Some(callback) = v.on_change.clone() else {
        return;
    };
    drop(v);
    match serde_wasm_bindgen::to_value(&snapshot) {
        Ok(js) => {
            if let Err(e) = callback.call1(&JsValue::NULL, &js) {
                log::warn!("[designer] change callback threw: {:?}", e);
            }
        }
        Err(e) => log::warn!("[designer] snapshot encoding failed: {}", e),
    }
}
