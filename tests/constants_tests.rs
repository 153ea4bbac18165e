// Host-side tests for front-end constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn asset_urls_are_rooted() {
    assert_eq!(
        asset_url("cattributes/eye/fabulous.svg"),
        "/cattributes/eye/fabulous.svg"
    );
}

#[test]
fn storage_keys_are_namespaced_per_identity() {
    assert_eq!(storage_key("alice"), "kitty-prefs:alice");
    assert_ne!(storage_key("alice"), storage_key("bob"));
}

#[test]
fn designer_states_are_distinct() {
    let states = [STATE_SIGNED_OUT, STATE_LOADING, STATE_READY, STATE_ERROR];
    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(STATE_ATTRIBUTE.starts_with("data-"));
}
