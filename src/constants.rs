// Front-end wiring: artwork location, preference keys and the state
// attribute host pages can style against.

// Artwork is served from the site root
pub const ASSET_BASE: &str = "/";

// localStorage key is this prefix followed by the identity
pub const STORAGE_KEY_PREFIX: &str = "kitty-prefs:";

// Set on the designer container to one of the STATE_* values
pub const STATE_ATTRIBUTE: &str = "data-kitty-state";
pub const STATE_SIGNED_OUT: &str = "signed-out";
pub const STATE_LOADING: &str = "loading";
pub const STATE_READY: &str = "ready";
pub const STATE_ERROR: &str = "error";

// Layer boxes inside the designer container
pub const DESIGNER_LAYER_CSS: &str = "position: absolute; inset: 0;";
pub const DESIGNER_EYES_TRANSITION: &str = "transform 0.05s cubic-bezier(0.4, 0, 0.2, 1)";

pub fn asset_url(path: &str) -> String {
    format!("{ASSET_BASE}{path}")
}

pub fn storage_key(identity: &str) -> String {
    format!("{STORAGE_KEY_PREFIX}{identity}")
}
