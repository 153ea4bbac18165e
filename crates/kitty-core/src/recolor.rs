//! Swatch substitution over raw layer markup.
//!
//! Recoloring is literal token replacement: every known swatch of the slots a
//! layer draws from is replaced, in hex and in `rgb(r,g,b)` form, by the
//! currently selected swatch of that slot. Nothing is parsed and no color math
//! is done, so artwork must only use full `#rrggbb` values taken from the
//! tables and no table value may be a substring of another.

use crate::layer::LayerKind;
use crate::palette::{PaletteSelection, Slot, Swatch, MOUTH_SHADOW_SWATCH};
use fnv::FnvHashMap;
use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

pub const FILL_TRANSITION: &str = "transition: fill 0.3s ease-in-out";

struct ColorPattern {
    hex: Regex,
    rgb: Option<Regex>,
}

impl ColorPattern {
    fn compile(swatch: &Swatch) -> Option<Self> {
        let hex = Regex::new(&format!("(?i){}", regex::escape(swatch.hex))).ok()?;
        let rgb = swatch.rgb().and_then(|[r, g, b]| {
            Regex::new(&format!(r"(?i)rgb\(\s*{r}\s*,\s*{g}\s*,\s*{b}\s*\)")).ok()
        });
        Some(Self { hex, rgb })
    }
}

fn patterns() -> &'static FnvHashMap<&'static str, ColorPattern> {
    static PATTERNS: OnceLock<FnvHashMap<&'static str, ColorPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        Slot::ALL
            .iter()
            .flat_map(|slot| slot.table())
            .filter_map(|swatch| ColorPattern::compile(swatch).map(|p| (swatch.hex, p)))
            .collect()
    })
}

/// Which original swatches a layer's artwork may contain, grouped by the slot
/// whose selection replaces them.
pub fn substitutions(layer: LayerKind) -> Vec<(Slot, Vec<&'static Swatch>)> {
    let whole = |slot: Slot| (slot, slot.table().iter().collect::<Vec<_>>());
    match layer {
        LayerKind::Body => vec![whole(Slot::Primary), whole(Slot::Secondary), whole(Slot::Tertiary)],
        LayerKind::Eyes => vec![whole(Slot::EyeColor)],
        LayerKind::Mouth => {
            let shadow = Slot::Primary.lookup(MOUTH_SHADOW_SWATCH).ok();
            vec![(Slot::Primary, shadow.into_iter().collect())]
        }
    }
}

/// Recolors `markup` for `layer` according to `palette`.
///
/// Never fails: markup without any known swatch comes back unchanged.
pub fn recolor(markup: &str, layer: LayerKind, palette: &PaletteSelection) -> String {
    let patterns = patterns();
    let mut out = markup.to_string();
    for (slot, originals) in substitutions(layer) {
        let replacement = palette.swatch(slot).hex;
        for original in originals {
            let Some(pattern) = patterns.get(original.hex) else {
                continue;
            };
            replace_all(&mut out, &pattern.hex, replacement);
            if let Some(rgb) = &pattern.rgb {
                replace_all(&mut out, rgb, replacement);
            }
        }
    }
    out
}

fn replace_all(markup: &mut String, pattern: &Regex, replacement: &str) {
    let replaced = match pattern.replace_all(markup, NoExpand(replacement)) {
        Cow::Owned(s) => Some(s),
        Cow::Borrowed(_) => None,
    };
    if let Some(s) = replaced {
        *markup = s;
    }
}

/// Adds a fill transition to every shape tag so live recolors animate.
/// Tags that already carry the transition are left alone.
pub fn annotate_fill_transitions(markup: &str) -> String {
    static SHAPE_TAG: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(re) = SHAPE_TAG
        .get_or_init(|| {
            Regex::new(&format!(
                r#"<(path|circle|rect|ellipse)\b( style="{}")?"#,
                regex::escape(FILL_TRANSITION)
            ))
            .ok()
        })
        .as_ref()
    else {
        return markup.to_string();
    };
    re.replace_all(markup, |caps: &Captures| {
        if caps.get(2).is_some() {
            caps[0].to_string()
        } else {
            format!("<{} style=\"{}\"", &caps[1], FILL_TRANSITION)
        }
    })
    .into_owned()
}
