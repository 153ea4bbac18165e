// Host-side tests for the trait catalog and palette tables.

use kitty_core::catalog::*;
use kitty_core::error::CatalogError;
use kitty_core::palette::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn catalog_sizes_match_reference_artwork() {
    assert_eq!(BodyShape::ALL.len(), 8);
    assert_eq!(Pattern::ALL.len(), 6);
    assert_eq!(EyeStyle::ALL.len(), 8);
    assert_eq!(MouthStyle::ALL.len(), 9);
}

#[test]
fn pick_random_visits_every_body_shape() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        seen.insert(BodyShape::pick_random(&mut rng));
    }
    assert_eq!(seen.len(), BodyShape::ALL.len());
}

#[test]
fn pick_random_visits_every_eye_color() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        seen.insert(Slot::EyeColor.pick_random(&mut rng).name);
    }
    assert_eq!(seen.len(), EYE_COLOR.len());
}

#[test]
fn names_parse_back_to_the_same_value() {
    for body in BodyShape::ALL {
        assert_eq!(body.name().parse::<BodyShape>().ok(), Some(*body));
    }
    for mouth in MouthStyle::ALL {
        assert_eq!(MouthStyle::from_name(mouth.name()).ok(), Some(*mouth));
    }
}

#[test]
fn unknown_trait_name_is_rejected() {
    let err = "persian".parse::<BodyShape>().unwrap_err();
    assert_eq!(
        err,
        CatalogError::UnknownTrait {
            category: "body shape",
            name: "persian".to_string()
        }
    );
    assert!(serde_json::from_str::<EyeStyle>("\"laser\"").is_err());
}

#[test]
fn default_selection_serializes_as_catalog_names() {
    let json = serde_json::to_value(TraitSelection::default()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "body": "cymric",
            "pattern": "jaguar",
            "eyes": "fabulous",
            "mouth": "soserious"
        })
    );
}

#[test]
fn default_palette_uses_reference_swatches() {
    let p = PaletteSelection::default();
    assert_eq!(p.swatch(Slot::Primary).name, "mauveover");
    assert_eq!(p.swatch(Slot::Secondary).name, "peach");
    assert_eq!(p.swatch(Slot::Tertiary).name, "royalpurple");
    assert_eq!(p.swatch(Slot::EyeColor).name, "bubblegum");

    let json = serde_json::to_value(p).unwrap();
    assert_eq!(json["eyeColor"], "bubblegum");
}

#[test]
fn palette_rejects_swatch_from_another_slot() {
    let mut p = PaletteSelection::default();
    let err = p.set(Slot::Primary, "peach").unwrap_err();
    assert!(matches!(err, CatalogError::UnknownSwatch { slot: "primary", .. }));
    assert_eq!(p, PaletteSelection::default());

    let bad = r#"{"primary":"neon","secondary":"peach","tertiary":"coffee","eyeColor":"gold"}"#;
    assert!(serde_json::from_str::<PaletteSelection>(bad).is_err());
}

#[test]
fn slot_names_parse() {
    assert_eq!("eyeColor".parse::<Slot>().ok(), Some(Slot::EyeColor));
    assert_eq!(
        "eyes".parse::<Slot>().unwrap_err(),
        CatalogError::UnknownSlot("eyes".to_string())
    );
}

#[test]
fn swatch_hex_values_decode_and_do_not_overlap() {
    assert_eq!(PRIMARY[0].rgb(), Some([0xde, 0xd0, 0xee]));
    let all: Vec<&Swatch> = Slot::ALL.iter().flat_map(|s| s.table()).collect();
    for s in &all {
        assert_eq!(s.hex.len(), 7, "{}", s.name);
        assert!(s.rgb().is_some(), "{}", s.name);
    }
    for a in &all {
        for b in &all {
            if a.name != b.name {
                assert!(!a.hex.eq_ignore_ascii_case(b.hex), "{} / {}", a.name, b.name);
            }
        }
    }
}

#[test]
fn random_palette_stays_inside_tables() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let p = PaletteSelection::random(&mut rng);
        for slot in Slot::ALL {
            assert!(slot.table().contains(p.swatch(slot)));
        }
    }
}
