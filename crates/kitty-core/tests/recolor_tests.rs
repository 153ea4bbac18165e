// Host-side tests for swatch substitution and fill transition annotation.

use kitty_core::layer::LayerKind;
use kitty_core::palette::{PaletteSelection, Slot};
use kitty_core::recolor::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const BODY: &str = r##"<svg><path fill="#ded0ee" d="M0 0"/><path fill="#F9CFAD"/><circle fill="rgb(207, 91, 232)"/><rect fill="#ffebe9"/></svg>"##;

fn palette(slot: Slot, name: &str) -> PaletteSelection {
    PaletteSelection::default().with(slot, name).unwrap()
}

#[test]
fn primary_swap_replaces_mauveover_with_salmon() {
    let markup = r##"<svg><path fill="#ded0ee" d="M10 10"/></svg>"##;
    let out = recolor(markup, LayerKind::Body, &palette(Slot::Primary, "salmon"));
    assert!(out.contains(r##"fill="#f4a792""##));
    assert_eq!(out.matches("#ded0ee").count(), 0);
}

#[test]
fn recolor_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..50 {
        let p = PaletteSelection::random(&mut rng);
        for layer in LayerKind::STACK {
            let once = recolor(BODY, layer, &p);
            assert_eq!(recolor(&once, layer, &p), once);
        }
    }
}

#[test]
fn occurrence_count_is_preserved() {
    let markup = r##"<path fill="#ded0ee"/><path stroke="#DED0EE"/><path fill="#ded0ee"/>"##;
    let out = recolor(markup, LayerKind::Body, &palette(Slot::Primary, "aquamarine"));
    assert_eq!(out.matches("#add5d2").count(), 3);
    assert_eq!(out.to_ascii_lowercase().matches("#ded0ee").count(), 0);
}

#[test]
fn rgb_notation_is_substituted() {
    let markup = r#"<path fill="rgb(222, 208, 238)"/><path fill="rgb(222,208,238)"/>"#;
    let out = recolor(markup, LayerKind::Body, &palette(Slot::Primary, "salmon"));
    assert_eq!(out.matches("#f4a792").count(), 2);
    assert!(!out.contains("rgb("));
}

#[test]
fn body_draws_from_three_slots() {
    let p = PaletteSelection::default()
        .with(Slot::Primary, "oldlace")
        .and_then(|p| p.with(Slot::Secondary, "bloodred"))
        .and_then(|p| p.with(Slot::Tertiary, "coffee"))
        .unwrap();
    let out = recolor(BODY, LayerKind::Body, &p);
    assert_eq!(out.matches("#ffebe9").count(), 2);
    assert!(out.contains("#ff7a7a"));
    assert!(out.contains("#756650"));
    assert!(!out.to_ascii_lowercase().contains("#f9cfad"));
}

#[test]
fn eyes_only_touch_eye_colors() {
    let markup = r##"<path fill="#fcdf35"/><path fill="#ded0ee"/><path fill="#fff"/>"##;
    let out = recolor(markup, LayerKind::Eyes, &palette(Slot::EyeColor, "topaz"));
    assert!(out.contains("#0ba09c"));
    assert!(!out.contains("#fcdf35"));
    assert!(out.contains("#ded0ee"));
    assert!(out.contains(r##""#fff""##));
}

#[test]
fn mouth_only_touches_shadow_swatch() {
    let markup = r##"<path fill="#b1b1be"/><path fill="#ded0ee"/>"##;
    let out = recolor(markup, LayerKind::Mouth, &palette(Slot::Primary, "salmon"));
    assert_eq!(out, r##"<path fill="#f4a792"/><path fill="#ded0ee"/>"##);

    let subs = substitutions(LayerKind::Mouth);
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].0, Slot::Primary);
    assert_eq!(subs[0].1.len(), 1);
    assert_eq!(subs[0].1[0].name, "shadowgrey");
}

#[test]
fn unknown_or_malformed_markup_is_left_alone() {
    let p = PaletteSelection::default();
    for markup in ["", "<svg><path fill=\"#123456\"/></svg>", "<<<#zz fill=", "rgb(1,2,"] {
        assert_eq!(recolor(markup, LayerKind::Body, &p), markup);
    }
}

#[test]
fn annotation_adds_fill_transition_once() {
    let markup = r#"<svg><path d="M0 0"/><circle r="1"/><g><ellipse/><rect/></g><pathology/></svg>"#;
    let once = annotate_fill_transitions(markup);
    assert_eq!(once.matches(FILL_TRANSITION).count(), 4);
    assert!(once.contains(r#"<path style="transition: fill 0.3s ease-in-out" d="M0 0"/>"#));
    assert!(once.contains("<pathology/>"));
    assert_eq!(annotate_fill_transitions(&once), once);
}

#[test]
fn annotation_survives_recolor() {
    let annotated = annotate_fill_transitions(BODY);
    let out = recolor(&annotated, LayerKind::Body, &palette(Slot::Primary, "salmon"));
    assert_eq!(out.matches(FILL_TRANSITION).count(), 4);
}
