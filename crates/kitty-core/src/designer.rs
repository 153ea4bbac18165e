//! State behind the in-app designer view: who is signed in, what they picked,
//! when to persist it, and where the eyes are looking.
//!
//! Everything here is inert while nobody is signed in: mutations are ignored,
//! nothing is saved and the eyes do not move.

use crate::catalog::{BodyShape, EyeStyle, MouthStyle, Pattern};
use crate::compositor::{AvatarSnapshot, Compositor, LoadTicket};
use crate::error::{AssetError, CatalogError, PreferenceError};
use crate::layer::RawLayers;
use crate::palette::Slot;
use crate::prefs::{PreferenceStore, Preferences, SaveDebouncer};
use crate::session::{Identity, Session};
use crate::spring::PointerTracker;
use glam::Vec2;
use instant::Instant;
use rand::Rng;
use std::ops::ControlFlow;

pub struct Designer<S: PreferenceStore> {
    session: Session,
    compositor: Compositor,
    store: S,
    debouncer: SaveDebouncer,
    tracker: PointerTracker,
}

impl<S: PreferenceStore> Designer<S> {
    pub fn new(store: S) -> Self {
        Self {
            session: Session::default(),
            compositor: Compositor::default(),
            store,
            debouncer: SaveDebouncer::default(),
            tracker: PointerTracker::default(),
        }
    }

    pub fn with_debouncer(mut self, debouncer: SaveDebouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn with_tracker(mut self, tracker: PointerTracker) -> Self {
        self.tracker = tracker;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_active(&self) -> bool {
        self.session.is_signed_in()
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            traits: *self.compositor.traits(),
            palette: *self.compositor.palette(),
        }
    }

    /// Signs in and restores saved choices. A failing store is logged and
    /// the current selection kept.
    pub fn login(&mut self, identity: Identity) -> Option<LoadTicket> {
        match self.store.load(&identity) {
            Ok(Some(prefs)) => {
                log::info!("[prefs] restored for {identity}");
                self.compositor.set_traits(prefs.traits);
                self.compositor.set_palette(prefs.palette);
            }
            Ok(None) => {}
            Err(e) => log::warn!("[prefs] load failed: {e}"),
        }
        self.session.login(identity);
        self.debouncer.cancel();
        self.tracker.reset();
        self.compositor.refresh()
    }

    pub fn logout(&mut self) {
        if let Some(identity) = self.session.logout() {
            log::info!("[designer] signed out {identity}");
        }
        self.debouncer.cancel();
        self.tracker.reset();
    }

    pub fn avatar(&self) -> AvatarSnapshot {
        if !self.is_active() {
            return AvatarSnapshot::default();
        }
        self.compositor.snapshot()
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<RawLayers, AssetError>) -> bool {
        self.compositor.complete(ticket, result)
    }

    fn mutate(
        &mut self,
        now: Instant,
        f: impl FnOnce(&mut Compositor) -> Option<LoadTicket>,
    ) -> Option<LoadTicket> {
        if !self.is_active() {
            return None;
        }
        let ticket = f(&mut self.compositor);
        self.debouncer.note_change(now);
        ticket
    }

    pub fn set_body(&mut self, body: BodyShape, now: Instant) -> Option<LoadTicket> {
        self.mutate(now, |c| c.set_body(body))
    }

    pub fn set_pattern(&mut self, pattern: Pattern, now: Instant) -> Option<LoadTicket> {
        self.mutate(now, |c| c.set_pattern(pattern))
    }

    pub fn set_eyes(&mut self, eyes: EyeStyle, now: Instant) -> Option<LoadTicket> {
        self.mutate(now, |c| c.set_eyes(eyes))
    }

    pub fn set_mouth(&mut self, mouth: MouthStyle, now: Instant) -> Option<LoadTicket> {
        self.mutate(now, |c| c.set_mouth(mouth))
    }

    pub fn set_swatch(
        &mut self,
        slot: Slot,
        name: &str,
        now: Instant,
    ) -> Result<Option<LoadTicket>, CatalogError> {
        let swatch = slot.lookup(name)?;
        Ok(self.mutate(now, |c| c.set_swatch(slot, swatch.name).ok().flatten()))
    }

    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) -> Option<LoadTicket> {
        self.mutate(now, |c| c.randomize(rng))
    }

    /// Saves once the quiet period after the last change has passed.
    /// Returns `None` when nothing was due.
    pub fn poll_save(&mut self, now: Instant) -> Option<Result<(), PreferenceError>> {
        let identity = self.session.identity()?.clone();
        if !self.debouncer.poll(now) {
            return None;
        }
        let result = self.store.save(&identity, &self.preferences());
        match &result {
            Ok(()) => log::info!("[prefs] saved for {identity}"),
            Err(e) => log::warn!("[prefs] save failed: {e}"),
        }
        Some(result)
    }

    pub fn save_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Re-aims the eyes at `pointer`, seen from the avatar box centred at
    /// `center` with the given half width.
    pub fn pointer_moved(&mut self, center: Vec2, pointer: Vec2, half_width: f32) {
        if self.is_active() {
            self.tracker.aim_at(center, pointer, half_width);
        }
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> ControlFlow<()> {
        if !self.tracker.is_running() {
            return ControlFlow::Break(());
        }
        if !self.is_active() {
            return ControlFlow::Continue(());
        }
        self.tracker.tick(timestamp_ms)
    }

    /// Stops the tracking loop for good; called when the view unmounts.
    pub fn unmount(&mut self) {
        self.tracker.stop();
    }

    pub fn eye_offset(&self) -> Vec2 {
        self.tracker.position()
    }
}
