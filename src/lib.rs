#![cfg(target_arch = "wasm32")]
//! Browser front-end: the designer view and the content-script overlay,
//! both thin bindings over `kitty-core`.

use wasm_bindgen::prelude::*;

mod assets;
mod audio;
mod constants;
mod designer;
mod dom;
mod events;
mod frame;
mod overlay;
mod page;
mod storage;

pub use designer::KittyDesigner;
pub use overlay::KittyOverlay;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kitty-web starting");
    Ok(())
}
