//! Layer artwork over `fetch`.

use crate::constants::asset_url;
use js_sys::{Array, Promise};
use kitty_core::error::AssetError;
use kitty_core::layer::{LayerKeys, RawLayers};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn fetch_error(path: &str, e: impl std::fmt::Debug) -> AssetError {
    AssetError::Fetch {
        path: path.to_string(),
        reason: format!("{:?}", e),
    }
}

/// Requests all three layers at once and resolves only when every one of
/// them arrived. The first failure, in body/eyes/mouth order, wins.
pub async fn fetch_layers(keys: &LayerKeys) -> Result<RawLayers, AssetError> {
    let paths = keys.all().map(|k| k.path());
    let window = web::window().ok_or_else(|| fetch_error(&paths[0], "no window"))?;

    let requests = Array::new();
    for path in &paths {
        requests.push(&window.fetch_with_str(&asset_url(path)));
    }
    let responses = JsFuture::from(Promise::all(&requests))
        .await
        .map_err(|e| fetch_error(&paths.join(", "), e))?;
    let responses: Array = responses.unchecked_into();

    let mut texts = Vec::with_capacity(paths.len());
    for (i, path) in paths.iter().enumerate() {
        let resp: web::Response = responses
            .get(i as u32)
            .dyn_into()
            .map_err(|e| fetch_error(path, e))?;
        texts.push(read_text(path, resp).await?);
    }
    let [body, eyes, mouth]: [String; 3] = texts
        .try_into()
        .map_err(|_| fetch_error(&paths[0], "incomplete response set"))?;
    Ok(RawLayers { body, eyes, mouth })
}

async fn read_text(path: &str, resp: web::Response) -> Result<String, AssetError> {
    if resp.status() == 404 {
        return Err(AssetError::Missing {
            path: path.to_string(),
        });
    }
    if !resp.ok() {
        return Err(fetch_error(path, format!("HTTP {}", resp.status())));
    }
    let text = resp.text().map_err(|e| fetch_error(path, e))?;
    JsFuture::from(text)
        .await
        .map_err(|e| fetch_error(path, e))?
        .as_string()
        .ok_or_else(|| fetch_error(path, JsValue::from_str("body is not text")))
}
