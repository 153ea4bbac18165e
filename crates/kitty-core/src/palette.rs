//! Palette slots and their fixed swatch tables.

use crate::error::CatalogError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named 6-hex-digit color belonging to one slot's table.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Swatch {
    pub name: &'static str,
    pub hex: &'static str,
}

impl Swatch {
    const fn new(name: &'static str, hex: &'static str) -> Self {
        Self { name, hex }
    }

    /// Decodes `#rrggbb` into its channel values.
    pub fn rgb(&self) -> Option<[u8; 3]> {
        let digits = self.hex.strip_prefix('#')?;
        if digits.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        Some([channel(0)?, channel(2)?, channel(4)?])
    }
}

pub static PRIMARY: [Swatch; 9] = [
    Swatch::new("mauveover", "#ded0ee"),
    Swatch::new("cloudwhite", "#ffffff"),
    Swatch::new("salmon", "#f4a792"),
    Swatch::new("shadowgrey", "#b1b1be"),
    Swatch::new("orangesoda", "#f7bc56"),
    Swatch::new("aquamarine", "#add5d2"),
    Swatch::new("greymatter", "#d1dadf"),
    Swatch::new("oldlace", "#ffebe9"),
    Swatch::new("cottoncandy", "#ecd1eb"),
];

pub static SECONDARY: [Swatch; 5] = [
    Swatch::new("peach", "#f9cfad"),
    Swatch::new("bloodred", "#ff7a7a"),
    Swatch::new("emeraldgreen", "#8be179"),
    Swatch::new("granitegrey", "#b1aeb9"),
    Swatch::new("kittencream", "#f7ebda"),
];

pub static TERTIARY: [Swatch; 11] = [
    Swatch::new("barkbrown", "#886662"),
    Swatch::new("cerulian", "#385877"),
    Swatch::new("scarlet", "#ea5f5a"),
    Swatch::new("skyblue", "#83d5ff"),
    Swatch::new("coffee", "#756650"),
    Swatch::new("royalpurple", "#cf5be8"),
    Swatch::new("lemonade", "#ffef85"),
    Swatch::new("swampgreen", "#44e192"),
    Swatch::new("chocolate", "#c47e33"),
    Swatch::new("royalblue", "#5b6ee8"),
    Swatch::new("wolfgrey", "#737184"),
];

pub static EYE_COLOR: [Swatch; 8] = [
    Swatch::new("gold", "#fcdf35"),
    Swatch::new("bubblegum", "#ef52d1"),
    Swatch::new("limegreen", "#aef72f"),
    Swatch::new("chestnut", "#a56429"),
    Swatch::new("topaz", "#0ba09c"),
    Swatch::new("mintgreen", "#43edac"),
    Swatch::new("strawberry", "#ef4b62"),
    Swatch::new("sizzurp", "#7c40ff"),
];

/// The primary swatch mouth artwork uses for its shading.
pub const MOUTH_SHADOW_SWATCH: &str = "shadowgrey";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "primary")]
    Primary,
    #[serde(rename = "secondary")]
    Secondary,
    #[serde(rename = "tertiary")]
    Tertiary,
    #[serde(rename = "eyeColor")]
    EyeColor,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Primary, Slot::Secondary, Slot::Tertiary, Slot::EyeColor];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
            Slot::Tertiary => "tertiary",
            Slot::EyeColor => "eyeColor",
        }
    }

    pub fn table(self) -> &'static [Swatch] {
        match self {
            Slot::Primary => &PRIMARY,
            Slot::Secondary => &SECONDARY,
            Slot::Tertiary => &TERTIARY,
            Slot::EyeColor => &EYE_COLOR,
        }
    }

    pub fn lookup(self, name: &str) -> Result<&'static Swatch, CatalogError> {
        self.table()
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CatalogError::UnknownSwatch {
                slot: self.name(),
                name: name.to_string(),
            })
    }

    pub fn pick_random<R: Rng + ?Sized>(self, rng: &mut R) -> &'static Swatch {
        let table = self.table();
        &table[rng.gen_range(0..table.len())]
    }

    fn index(self) -> usize {
        match self {
            Slot::Primary => 0,
            Slot::Secondary => 1,
            Slot::Tertiary => 2,
            Slot::EyeColor => 3,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slot::ALL
            .into_iter()
            .find(|slot| slot.name() == s)
            .ok_or_else(|| CatalogError::UnknownSlot(s.to_string()))
    }
}

/// The chosen swatch for every slot. Holds table entries directly, so a
/// selection can never name a color outside its slot's table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PaletteNames", into = "PaletteNames")]
pub struct PaletteSelection {
    chosen: [&'static Swatch; 4],
}

impl Default for PaletteSelection {
    fn default() -> Self {
        Self {
            chosen: [&PRIMARY[0], &SECONDARY[0], &TERTIARY[5], &EYE_COLOR[1]],
        }
    }
}

impl PaletteSelection {
    pub fn swatch(&self, slot: Slot) -> &'static Swatch {
        self.chosen[slot.index()]
    }

    pub fn set(&mut self, slot: Slot, name: &str) -> Result<(), CatalogError> {
        self.chosen[slot.index()] = slot.lookup(name)?;
        Ok(())
    }

    pub fn with(mut self, slot: Slot, name: &str) -> Result<Self, CatalogError> {
        self.set(slot, name)?;
        Ok(self)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            chosen: Slot::ALL.map(|slot| slot.pick_random(&mut *rng)),
        }
    }
}

/// Wire form of [`PaletteSelection`]: swatch names keyed by slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteNames {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    #[serde(rename = "eyeColor")]
    pub eye_color: String,
}

impl TryFrom<PaletteNames> for PaletteSelection {
    type Error = CatalogError;

    fn try_from(names: PaletteNames) -> Result<Self, Self::Error> {
        Ok(Self {
            chosen: [
                Slot::Primary.lookup(&names.primary)?,
                Slot::Secondary.lookup(&names.secondary)?,
                Slot::Tertiary.lookup(&names.tertiary)?,
                Slot::EyeColor.lookup(&names.eye_color)?,
            ],
        })
    }
}

impl From<PaletteSelection> for PaletteNames {
    fn from(p: PaletteSelection) -> Self {
        Self {
            primary: p.swatch(Slot::Primary).name.to_string(),
            secondary: p.swatch(Slot::Secondary).name.to_string(),
            tertiary: p.swatch(Slot::Tertiary).name.to_string(),
            eye_color: p.swatch(Slot::EyeColor).name.to_string(),
        }
    }
}
