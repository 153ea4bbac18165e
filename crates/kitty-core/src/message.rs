//! Messages the extension sends to the page overlay.

use crate::layer::AvatarLayers;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OverlayMessage {
    #[serde(rename = "SHOW_KITTY")]
    Show {
        #[serde(rename = "kittyData")]
        kitty_data: AvatarLayers,
    },
    #[serde(rename = "HIDE_KITTY")]
    Hide,
}

impl OverlayMessage {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
