// Host-side tests for the designer state: session gating, debounced saves
// and eye tracking.

use glam::Vec2;
use instant::Instant;
use kitty_core::catalog::*;
use kitty_core::designer::Designer;
use kitty_core::error::PreferenceError;
use kitty_core::layer::{AssetKey, RawLayers};
use kitty_core::palette::{PaletteSelection, Slot};
use kitty_core::prefs::*;
use kitty_core::session::Identity;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::ops::ControlFlow;
use std::time::Duration;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn alice() -> Identity {
    Identity::new("alice").unwrap()
}

fn signed_in() -> Designer<MemoryStore> {
    let mut d = Designer::new(MemoryStore::default());
    d.login(alice());
    d
}

#[test]
fn inert_without_identity() {
    let mut d = Designer::new(MemoryStore::default());
    let now = Instant::now();
    assert!(!d.is_active());
    assert_eq!(d.set_body(BodyShape::Sphynx, now), None);
    assert_eq!(d.compositor().traits().body, BodyShape::Cymric);
    assert!(!d.save_pending());
    assert!(d.poll_save(now + ms(5000)).is_none());

    let avatar = d.avatar();
    assert!(avatar.layers.is_none() && !avatar.loading && avatar.error.is_none());

    d.pointer_moved(Vec2::ZERO, Vec2::new(500.0, 0.0), 100.0);
    for frame in 0..30 {
        assert_eq!(d.tick(frame as f64 * 16.0), ControlFlow::Continue(()));
    }
    assert_eq!(d.eye_offset(), Vec2::ZERO);
}

#[test]
fn login_restores_saved_preferences() {
    let store = MemoryStore::default();
    let prefs = Preferences {
        traits: TraitSelection {
            body: BodyShape::Sphynx,
            ..TraitSelection::default()
        },
        palette: PaletteSelection::default().with(Slot::Primary, "salmon").unwrap(),
    };
    store.insert_raw(&alice(), &prefs.to_json().unwrap());

    let mut d = Designer::new(store);
    let ticket = d.login(alice()).unwrap();
    assert_eq!(ticket.keys.body, AssetKey::Body(BodyShape::Sphynx, Pattern::Jaguar));
    assert_eq!(d.preferences(), prefs);
    assert!(d.avatar().loading);
    assert!(!d.save_pending());
}

#[test]
fn unreadable_store_keeps_current_selection() {
    let store = MemoryStore::default();
    store.set_offline(true);
    let mut d = Designer::new(store);
    assert!(d.login(alice()).is_some());
    assert!(d.is_active());
    assert_eq!(d.preferences(), Preferences::default());
}

#[test]
fn save_waits_for_quiet_period() {
    let mut d = signed_in();
    let t0 = Instant::now();
    d.set_body(BodyShape::Munchkin, t0);
    assert!(d.save_pending());
    assert!(d.poll_save(t0 + ms(500)).is_none());

    d.set_eyes(EyeStyle::Googly, t0 + ms(800));
    assert!(d.poll_save(t0 + ms(1500)).is_none());
    assert_eq!(d.store().save_count(), 0);

    assert!(matches!(d.poll_save(t0 + ms(1800)), Some(Ok(()))));
    assert_eq!(d.store().save_count(), 1);
    assert!(d.poll_save(t0 + ms(5000)).is_none());

    let saved = d.store().load(&alice()).unwrap().unwrap();
    assert_eq!(saved.traits.body, BodyShape::Munchkin);
    assert_eq!(saved.traits.eyes, EyeStyle::Googly);
}

#[test]
fn failed_save_is_reported_and_selection_kept() {
    let mut d = signed_in();
    let t0 = Instant::now();
    d.set_swatch(Slot::EyeColor, "topaz", t0).unwrap();
    d.store().set_offline(true);

    let result = d.poll_save(t0 + ms(1000));
    assert!(matches!(result, Some(Err(PreferenceError::Storage(_)))));
    assert_eq!(d.store().save_count(), 0);
    assert_eq!(d.compositor().palette().swatch(Slot::EyeColor).name, "topaz");
}

#[test]
fn invalid_swatch_is_rejected_without_scheduling_a_save() {
    let mut d = signed_in();
    assert!(d.set_swatch(Slot::Tertiary, "gold", Instant::now()).is_err());
    assert!(!d.save_pending());
}

#[test]
fn palette_change_after_load_needs_no_fetch() {
    let mut d = Designer::new(MemoryStore::default());
    let ticket = d.login(alice()).unwrap();
    let raw = RawLayers {
        body: r##"<path fill="#ded0ee"/>"##.to_string(),
        ..RawLayers::default()
    };
    assert!(d.complete_load(ticket, Ok(raw)));

    let ticket = d.set_swatch(Slot::Primary, "salmon", Instant::now()).unwrap();
    assert_eq!(ticket, None);
    let layers = d.avatar().layers.unwrap();
    assert!(layers.body.contains("#f4a792"));
}

#[test]
fn logout_drops_pending_save() {
    let mut d = signed_in();
    let t0 = Instant::now();
    d.randomize(&mut StdRng::seed_from_u64(1), t0);
    assert!(d.save_pending());
    d.logout();
    assert!(!d.is_active());
    assert!(!d.save_pending());
    assert!(d.poll_save(t0 + ms(2000)).is_none());
    assert_eq!(d.set_mouth(MouthStyle::Beard, t0), None);
}

#[test]
fn eyes_track_pointer_and_stop_on_unmount() {
    let mut d = signed_in();
    d.pointer_moved(Vec2::new(100.0, 100.0), Vec2::new(100.0, 400.0), 100.0);
    for frame in 0..300 {
        assert_eq!(d.tick(frame as f64 * 16.0), ControlFlow::Continue(()));
    }
    assert!((d.eye_offset() - Vec2::new(0.0, 0.2)).length() < 1e-3);

    d.unmount();
    assert_eq!(d.tick(10_000.0), ControlFlow::Break(()));
    d.logout();
    d.login(alice());
    assert_eq!(d.tick(10_016.0), ControlFlow::Break(()));
}
