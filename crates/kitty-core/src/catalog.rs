//! The closed trait catalog: body shapes, coat patterns, eye and mouth styles.
//!
//! Every category is a fixed enum; values serialize as their lowercase catalog
//! names, which are also the file stems of the layer artwork.

use crate::error::CatalogError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of selectable values.
pub trait Choice: Copy + Eq + 'static {
    const ALL: &'static [Self];
    const CATEGORY: &'static str;

    fn name(self) -> &'static str;

    /// Uniformly random member of the set.
    fn pick_random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    fn from_name(name: &str) -> Result<Self, CatalogError> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| CatalogError::UnknownTrait {
                category: Self::CATEGORY,
                name: name.to_string(),
            })
    }
}

macro_rules! catalog {
    ($(#[$meta:meta])* $ty:ident, $category:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $ty {
            $(#[serde(rename = $text)] $variant),+
        }

        impl Choice for $ty {
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const CATEGORY: &'static str = $category;

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_name(s)
            }
        }
    };
}

catalog!(
    /// Body silhouette.
    BodyShape, "body shape" {
        MaineCoon => "mainecoon",
        Cymric => "cymric",
        LaPerm => "laperm",
        Munchkin => "munchkin",
        Sphynx => "sphynx",
        Ragamuffin => "ragamuffin",
        Himalayan => "himalayan",
        Chartreux => "chartreux",
    }
);

catalog!(
    /// Coat pattern; combined with the body shape into a single body asset.
    Pattern, "pattern" {
        Spock => "spock",
        TigerPunk => "tigerpunk",
        CaliCool => "calicool",
        LuckyStripe => "luckystripe",
        Jaguar => "jaguar",
        TotesBasic => "totesbasic",
    }
);

catalog!(
    EyeStyle, "eye style" {
        WingTips => "wingtips",
        Fabulous => "fabulous",
        Otaku => "otaku",
        RaisedBrow => "raisedbrow",
        Simple => "simple",
        Crazy => "crazy",
        ThicccBrowz => "thicccbrowz",
        Googly => "googly",
    }
);

catalog!(
    MouthStyle, "mouth style" {
        Whixtensions => "whixtensions",
        Dali => "dali",
        SayCheese => "saycheese",
        Beard => "beard",
        Tongue => "tongue",
        HappyGoKitty => "happygokitty",
        Pouty => "pouty",
        SoSerious => "soserious",
        Gerbil => "gerbil",
    }
);

/// One value per trait category. Always fully populated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraitSelection {
    pub body: BodyShape,
    pub pattern: Pattern,
    pub eyes: EyeStyle,
    pub mouth: MouthStyle,
}

impl Default for TraitSelection {
    fn default() -> Self {
        Self {
            body: BodyShape::Cymric,
            pattern: Pattern::Jaguar,
            eyes: EyeStyle::Fabulous,
            mouth: MouthStyle::SoSerious,
        }
    }
}

impl TraitSelection {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            body: BodyShape::pick_random(rng),
            pattern: Pattern::pick_random(rng),
            eyes: EyeStyle::pick_random(rng),
            mouth: MouthStyle::pick_random(rng),
        }
    }
}
