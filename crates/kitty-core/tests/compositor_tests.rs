// Host-side tests for avatar composition and fetch bookkeeping.

use kitty_core::catalog::*;
use kitty_core::compositor::*;
use kitty_core::error::{AssetError, CatalogError};
use kitty_core::layer::*;
use kitty_core::palette::Slot;
use kitty_core::recolor::FILL_TRANSITION;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::collections::HashMap;

struct Artwork {
    files: HashMap<String, String>,
    fetches: Cell<usize>,
}

impl Artwork {
    fn stock() -> Self {
        let files = [
            ("cattributes/body/cymric-jaguar.svg", r##"<svg><path fill="#ded0ee" d="M0 0"/><path fill="#f9cfad"/></svg>"##),
            ("cattributes/body/sphynx-jaguar.svg", r##"<svg><rect fill="#ded0ee"/></svg>"##),
            ("cattributes/eye/fabulous.svg", r##"<svg><circle fill="#fcdf35"/><path fill="#fff" d="M129.7 129.7"/></svg>"##),
            ("cattributes/mouth/soserious.svg", r##"<svg><path fill="#b1b1be"/></svg>"##),
        ];
        Self {
            files: files
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            fetches: Cell::new(0),
        }
    }
}

impl AssetSource for Artwork {
    fn fetch(&self, key: AssetKey) -> Result<String, AssetError> {
        self.fetches.set(self.fetches.get() + 1);
        let path = key.path();
        self.files
            .get(&path)
            .cloned()
            .ok_or(AssetError::Missing { path })
    }
}

fn ready(c: &Compositor) -> &AvatarLayers {
    c.layers().expect("avatar should be ready")
}

#[test]
fn asset_paths_follow_catalog_names() {
    let keys = LayerKeys::from(&TraitSelection::default());
    let paths: Vec<String> = keys.all().iter().map(|k| k.path()).collect();
    assert_eq!(
        paths,
        [
            "cattributes/body/cymric-jaguar.svg",
            "cattributes/eye/fabulous.svg",
            "cattributes/mouth/soserious.svg"
        ]
    );
    assert_eq!(keys.eyes.kind(), LayerKind::Eyes);
}

#[test]
fn layers_stack_body_mouth_eyes() {
    let z: Vec<u32> = LayerKind::STACK.iter().map(|k| k.z_index()).collect();
    assert_eq!(LayerKind::STACK, [LayerKind::Body, LayerKind::Mouth, LayerKind::Eyes]);
    assert!(z.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn first_load_recolors_all_three_layers() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    assert_eq!(c.status(), &AvatarStatus::Loading);

    c.load_from(&art);
    assert_eq!(art.fetches.get(), 3);
    let layers = ready(&c);
    assert!(layers.body.contains("#ded0ee"));
    assert!(layers.body.contains(FILL_TRANSITION));
    assert!(layers.eyes.contains("#ef52d1"));
    assert!(!layers.eyes.contains("#fcdf35"));
    assert!(layers.eyes.contains(r##"fill="#fff""##));
    assert!(layers.mouth.contains("#ded0ee"));
}

#[test]
fn palette_change_reuses_fetched_artwork() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    c.load_from(&art);

    let ticket = c.set_swatch(Slot::Primary, "salmon").unwrap();
    assert_eq!(ticket, None);
    assert_eq!(art.fetches.get(), 3);
    let layers = ready(&c);
    assert!(layers.body.contains(r##"fill="#f4a792""##));
    assert!(!layers.body.contains("#ded0ee"));
    assert!(layers.mouth.contains("#f4a792"));
}

#[test]
fn unknown_swatch_leaves_palette_alone() {
    let mut c = Compositor::default();
    let before = *c.palette();
    let err = c.set_swatch(Slot::Secondary, "mauveover").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownSwatch { .. }));
    assert_eq!(*c.palette(), before);
}

#[test]
fn trait_change_requests_new_artwork() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    c.load_from(&art);

    let ticket = c.set_body(BodyShape::Sphynx).unwrap();
    assert_eq!(ticket.keys.body, AssetKey::Body(BodyShape::Sphynx, Pattern::Jaguar));
    assert_eq!(c.status(), &AvatarStatus::Loading);
    assert!(c.snapshot().loading);

    let raw = art.fetch_all(&ticket.keys).unwrap();
    assert!(c.complete(ticket, Ok(raw)));
    assert!(ready(&c).body.starts_with("<svg><rect style="));
}

#[test]
fn superseded_loads_are_discarded() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    let first = c.set_body(BodyShape::Munchkin).unwrap();
    let second = c.set_body(BodyShape::Sphynx).unwrap();

    let stale = art.fetch_all(&c.keys()).unwrap();
    assert!(!c.complete(first, Ok(stale.clone())));
    assert_eq!(c.status(), &AvatarStatus::Loading);

    assert!(c.complete(second, Ok(stale)));
    assert!(c.layers().is_some());
    assert_eq!(c.traits().body, BodyShape::Sphynx);
}

#[test]
fn any_missing_layer_fails_the_whole_avatar() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    c.load_from(&art);
    assert!(c.layers().is_some());

    art.fetches.set(0);
    c.set_body(BodyShape::Himalayan);
    let status = c.load_from(&art).clone();
    assert_eq!(art.fetches.get(), 1);
    match status {
        AvatarStatus::Failed(msg) => assert!(msg.contains("cattributes/body/himalayan-jaguar.svg")),
        other => panic!("expected failure, got {other:?}"),
    }
    let snap = c.snapshot();
    assert_eq!(snap.layers, None);
    assert!(!snap.loading);
    assert!(snap.error.is_some());

    // the next change retries the fetch
    assert!(c.set_swatch(Slot::Primary, "salmon").unwrap().is_some());
}

#[test]
fn fetch_errors_are_not_silent() {
    let mut art = Artwork::stock();
    art.files.remove("cattributes/mouth/soserious.svg");
    let keys = LayerKeys::from(&TraitSelection::default());
    assert_eq!(
        art.fetch_all(&keys),
        Err(AssetError::Missing {
            path: "cattributes/mouth/soserious.svg".to_string()
        })
    );
}

#[test]
fn randomize_picks_new_traits_and_palette() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut c = Compositor::default();
    let mut differed = false;
    for _ in 0..20 {
        c.randomize(&mut rng);
        differed |= *c.traits() != TraitSelection::default();
    }
    assert!(differed);
}

#[test]
fn snapshot_serializes_for_hosts() {
    let art = Artwork::stock();
    let mut c = Compositor::default();
    c.load_from(&art);
    let json = serde_json::to_value(c.snapshot()).unwrap();
    assert_eq!(json["loading"], false);
    assert!(json["error"].is_null());
    assert!(json["layers"]["eyes"].as_str().unwrap().contains("<circle"));
}
