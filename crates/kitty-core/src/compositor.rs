//! Turns the current trait and palette selection into three recolored layers.
//!
//! Fetching artwork is the caller's job: a trait change yields a
//! [`LoadTicket`], and the caller hands back the three raw layers (or the
//! first failure) through [`Compositor::complete`]. Only the newest ticket is
//! honoured. A palette-only change recolors the raw layers already held and
//! needs no fetch.

use crate::catalog::{BodyShape, EyeStyle, MouthStyle, Pattern, TraitSelection};
use crate::error::{AssetError, CatalogError};
use crate::layer::{AssetSource, AvatarLayers, LayerKeys, LayerKind, RawLayers};
use crate::palette::{PaletteSelection, Slot};
use crate::recolor::{annotate_fill_transitions, recolor};
use rand::Rng;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvatarStatus {
    Loading,
    Ready(AvatarLayers),
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    revision: u64,
    pub keys: LayerKeys,
}

/// Owned view of the avatar for hosts that render it themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AvatarSnapshot {
    pub layers: Option<AvatarLayers>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Recolors raw artwork for `palette`.
pub fn compose(raw: &RawLayers, palette: &PaletteSelection) -> AvatarLayers {
    AvatarLayers {
        body: recolor(&raw.body, LayerKind::Body, palette),
        eyes: recolor(&raw.eyes, LayerKind::Eyes, palette),
        mouth: recolor(&raw.mouth, LayerKind::Mouth, palette),
    }
}

#[derive(Clone, Debug)]
pub struct Compositor {
    traits: TraitSelection,
    palette: PaletteSelection,
    status: AvatarStatus,
    revision: u64,
    raw: Option<(LayerKeys, RawLayers)>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(TraitSelection::default(), PaletteSelection::default())
    }
}

impl Compositor {
    pub fn new(traits: TraitSelection, palette: PaletteSelection) -> Self {
        Self {
            traits,
            palette,
            status: AvatarStatus::Loading,
            revision: 0,
            raw: None,
        }
    }

    pub fn traits(&self) -> &TraitSelection {
        &self.traits
    }

    pub fn palette(&self) -> &PaletteSelection {
        &self.palette
    }

    pub fn status(&self) -> &AvatarStatus {
        &self.status
    }

    pub fn layers(&self) -> Option<&AvatarLayers> {
        match &self.status {
            AvatarStatus::Ready(layers) => Some(layers),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> AvatarSnapshot {
        match &self.status {
            AvatarStatus::Loading => AvatarSnapshot {
                loading: true,
                ..AvatarSnapshot::default()
            },
            AvatarStatus::Ready(layers) => AvatarSnapshot {
                layers: Some(layers.clone()),
                ..AvatarSnapshot::default()
            },
            AvatarStatus::Failed(e) => AvatarSnapshot {
                error: Some(e.clone()),
                ..AvatarSnapshot::default()
            },
        }
    }

    pub fn keys(&self) -> LayerKeys {
        LayerKeys::from(&self.traits)
    }

    pub fn set_traits(&mut self, traits: TraitSelection) -> Option<LoadTicket> {
        self.traits = traits;
        self.refresh()
    }

    pub fn set_body(&mut self, body: BodyShape) -> Option<LoadTicket> {
        self.set_traits(TraitSelection { body, ..self.traits })
    }

    pub fn set_pattern(&mut self, pattern: Pattern) -> Option<LoadTicket> {
        self.set_traits(TraitSelection {
            pattern,
            ..self.traits
        })
    }

    pub fn set_eyes(&mut self, eyes: EyeStyle) -> Option<LoadTicket> {
        self.set_traits(TraitSelection { eyes, ..self.traits })
    }

    pub fn set_mouth(&mut self, mouth: MouthStyle) -> Option<LoadTicket> {
        self.set_traits(TraitSelection { mouth, ..self.traits })
    }

    pub fn set_palette(&mut self, palette: PaletteSelection) -> Option<LoadTicket> {
        self.palette = palette;
        self.refresh()
    }

    pub fn set_swatch(&mut self, slot: Slot, name: &str) -> Result<Option<LoadTicket>, CatalogError> {
        self.palette.set(slot, name)?;
        Ok(self.refresh())
    }

    /// Every trait and every slot picked uniformly at random.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<LoadTicket> {
        self.traits = TraitSelection::random(rng);
        self.palette = PaletteSelection::random(rng);
        self.refresh()
    }

    /// Recomputes the avatar for the current selection. Returns a ticket when
    /// the artwork for the current traits has to be fetched first.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        self.revision += 1;
        let keys = self.keys();
        match &self.raw {
            Some((held, raw)) if *held == keys => {
                self.status = AvatarStatus::Ready(compose(raw, &self.palette));
                None
            }
            _ => {
                self.status = AvatarStatus::Loading;
                Some(LoadTicket {
                    revision: self.revision,
                    keys,
                })
            }
        }
    }

    /// Delivers the fetch result for `ticket`. Returns `false` when the ticket
    /// was superseded and the result discarded.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<RawLayers, AssetError>) -> bool {
        if ticket.revision != self.revision {
            log::debug!("[assets] dropping stale load r{}", ticket.revision);
            return false;
        }
        match result {
            Ok(raw) => {
                let raw = RawLayers {
                    body: annotate_fill_transitions(&raw.body),
                    eyes: annotate_fill_transitions(&raw.eyes),
                    mouth: annotate_fill_transitions(&raw.mouth),
                };
                self.status = AvatarStatus::Ready(compose(&raw, &self.palette));
                self.raw = Some((ticket.keys, raw));
            }
            Err(e) => {
                log::error!("[assets] {e}");
                self.status = AvatarStatus::Failed(e.to_string());
                self.raw = None;
            }
        }
        true
    }

    /// Refreshes and, if needed, fetches synchronously from `source`.
    pub fn load_from<S: AssetSource + ?Sized>(&mut self, source: &S) -> &AvatarStatus {
        if let Some(ticket) = self.refresh() {
            let result = source.fetch_all(&ticket.keys);
            self.complete(ticket, result);
        }
        &self.status
    }
}
