use thiserror::Error;

/// A name that does not belong to the fixed trait/palette catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown {category} '{name}'")]
    UnknownTrait {
        category: &'static str,
        name: String,
    },
    #[error("unknown palette slot '{0}'")]
    UnknownSlot(String),
    #[error("unknown {slot} swatch '{name}'")]
    UnknownSwatch { slot: &'static str, name: String },
}

/// Failure to obtain the raw markup for one avatar layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("layer asset not found: {path}")]
    Missing { path: String },
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
}

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference storage: {0}")]
    Storage(String),
    #[error("preference encoding: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Render-target failures reported by a [`crate::page::HostPage`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("could not create <{0}> element")]
    CreateElement(String),
    #[error("audio cue failed: {0}")]
    Audio(String),
}
