//! Persisted trait/palette choices and the debounced save schedule.

use crate::catalog::TraitSelection;
use crate::constants::SAVE_DEBOUNCE;
use crate::error::PreferenceError;
use crate::palette::PaletteSelection;
use crate::session::Identity;
use fnv::FnvHashMap;
use instant::Instant;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub traits: TraitSelection,
    pub palette: PaletteSelection,
}

impl Preferences {
    pub fn to_json(&self) -> Result<String, PreferenceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PreferenceError> {
        Ok(serde_json::from_str(json)?)
    }
}

pub trait PreferenceStore {
    fn load(&self, identity: &Identity) -> Result<Option<Preferences>, PreferenceError>;
    fn save(&self, identity: &Identity, prefs: &Preferences) -> Result<(), PreferenceError>;
}

/// JSON documents in a map, keyed by identity.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RefCell<FnvHashMap<String, String>>,
    offline: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryStore {
    /// While offline every load and save fails.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn raw(&self, identity: &Identity) -> Option<String> {
        self.docs.borrow().get(identity.as_str()).cloned()
    }

    pub fn insert_raw(&self, identity: &Identity, json: &str) {
        self.docs
            .borrow_mut()
            .insert(identity.as_str().to_string(), json.to_string());
    }

    fn check_online(&self) -> Result<(), PreferenceError> {
        if self.offline.get() {
            return Err(PreferenceError::Storage("store offline".to_string()));
        }
        Ok(())
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, identity: &Identity) -> Result<Option<Preferences>, PreferenceError> {
        self.check_online()?;
        self.raw(identity)
            .map(|json| Preferences::from_json(&json))
            .transpose()
    }

    fn save(&self, identity: &Identity, prefs: &Preferences) -> Result<(), PreferenceError> {
        self.check_online()?;
        self.insert_raw(identity, &prefs.to_json()?);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Fires once a quiet period has passed since the last change. Each change
/// re-arms the timer; nothing is coalesced beyond that, so the last state
/// wins.
#[derive(Clone, Debug)]
pub struct SaveDebouncer {
    quiet: Duration,
    last_change: Option<Instant>,
}

impl Default for SaveDebouncer {
    fn default() -> Self {
        Self::new(SAVE_DEBOUNCE)
    }
}

impl SaveDebouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_change: None,
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }

    pub fn note_change(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn cancel(&mut self) {
        self.last_change = None;
    }

    /// `true` exactly once per burst of changes, when the quiet period is over.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_change {
            Some(t) if now >= t + self.quiet => {
                self.last_change = None;
                true
            }
            _ => false,
        }
    }
}
