use crate::catalog::{BodyShape, EyeStyle, MouthStyle, Pattern, TraitSelection};
use crate::error::AssetError;
use serde::{Deserialize, Serialize};

/// The three stacked parts of the avatar, bottom to top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Body,
    Mouth,
    Eyes,
}

impl LayerKind {
    /// Stacking order, body beneath and eyes topmost.
    pub const STACK: [LayerKind; 3] = [LayerKind::Body, LayerKind::Mouth, LayerKind::Eyes];

    pub fn z_index(self) -> u32 {
        match self {
            LayerKind::Body => 10,
            LayerKind::Mouth => 20,
            LayerKind::Eyes => 30,
        }
    }
}

/// Which artwork file backs a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKey {
    Body(BodyShape, Pattern),
    Eyes(EyeStyle),
    Mouth(MouthStyle),
}

impl AssetKey {
    pub fn kind(self) -> LayerKind {
        match self {
            AssetKey::Body(..) => LayerKind::Body,
            AssetKey::Eyes(_) => LayerKind::Eyes,
            AssetKey::Mouth(_) => LayerKind::Mouth,
        }
    }

    /// Path of the artwork relative to the asset root.
    pub fn path(self) -> String {
        match self {
            AssetKey::Body(body, pattern) => format!("cattributes/body/{body}-{pattern}.svg"),
            AssetKey::Eyes(eyes) => format!("cattributes/eye/{eyes}.svg"),
            AssetKey::Mouth(mouth) => format!("cattributes/mouth/{mouth}.svg"),
        }
    }
}

/// Asset keys for all three layers of a trait selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayerKeys {
    pub body: AssetKey,
    pub eyes: AssetKey,
    pub mouth: AssetKey,
}

impl From<&TraitSelection> for LayerKeys {
    fn from(t: &TraitSelection) -> Self {
        Self {
            body: AssetKey::Body(t.body, t.pattern),
            eyes: AssetKey::Eyes(t.eyes),
            mouth: AssetKey::Mouth(t.mouth),
        }
    }
}

impl LayerKeys {
    pub fn all(&self) -> [AssetKey; 3] {
        [self.body, self.eyes, self.mouth]
    }
}

/// Unmodified artwork for the three layers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawLayers {
    pub body: String,
    pub eyes: String,
    pub mouth: String,
}

/// Recolored markup for the three layers, ready to display verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarLayers {
    pub body: String,
    pub eyes: String,
    pub mouth: String,
}

impl AvatarLayers {
    pub fn get(&self, kind: LayerKind) -> &str {
        match kind {
            LayerKind::Body => &self.body,
            LayerKind::Eyes => &self.eyes,
            LayerKind::Mouth => &self.mouth,
        }
    }
}

/// Synchronous artwork provider. Must report missing files as errors.
pub trait AssetSource {
    fn fetch(&self, key: AssetKey) -> Result<String, AssetError>;

    /// Fetches all three layers; the first failure aborts the whole set.
    fn fetch_all(&self, keys: &LayerKeys) -> Result<RawLayers, AssetError> {
        Ok(RawLayers {
            body: self.fetch(keys.body)?,
            eyes: self.fetch(keys.eyes)?,
            mouth: self.fetch(keys.mouth)?,
        })
    }
}
