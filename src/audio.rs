use kitty_core::error::HostError;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Starts a one-shot sound. Playback is asynchronous: a rejected play
/// promise (autoplay policy, missing file) is logged and otherwise ignored.
pub fn play_cue(url: &str, volume: f64) -> Result<(), HostError> {
    let el = web::HtmlAudioElement::new_with_src(url)
        .map_err(|e| HostError::Audio(format!("{:?}", e)))?;
    el.set_volume(volume);
    let promise = el.play().map_err(|e| HostError::Audio(format!("{:?}", e)))?;
    spawn_local(async move {
        if let Err(e) = JsFuture::from(promise).await {
            log::debug!("[audio] playback rejected: {:?}", e);
        }
    });
    Ok(())
}
