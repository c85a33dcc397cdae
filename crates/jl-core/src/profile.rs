//! Traveller bio-profile.
//!
//! Six independent closed enumerations.  Every combination is valid, so the
//! modifier rules downstream have no invalid-input path.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Generate a closed enum with a stable wire spelling per variant.
macro_rules! profile_enum {
    (
        $(#[$attr:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vattr:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis enum $name {
            $(
                $(#[$vattr])*
                #[cfg_attr(feature = "serde", serde(rename = $wire))]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire spelling, e.g. `night_owl`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(CoreError::Parse(format!(
                        "invalid {} {other:?}", stringify!($name)
                    ))),
                }
            }
        }
    };
}

profile_enum! {
    pub enum AgeGroup {
        Under18    => "0-18",
        YoungAdult => "18-30",
        Adult      => "30-50",
        Senior     => "50-70",
        Elder      => "70+",
    }
}

impl AgeGroup {
    /// Groups whose eastbound adaptation is dampened.
    #[inline]
    pub fn adapts_slowly(self) -> bool {
        matches!(self, AgeGroup::Senior | AgeGroup::Elder)
    }
}

profile_enum! {
    pub enum Chronotype {
        EarlyBird => "early_bird",
        Balanced  => "balanced",
        NightOwl  => "night_owl",
    }
}

profile_enum! {
    pub enum CaffeinePreference {
        Avoid     => "avoid",
        Necessary => "necessary",
        Optimized => "optimized",
    }
}

profile_enum! {
    pub enum AlcoholPreference {
        None  => "none",
        Relax => "relax",
    }
}

profile_enum! {
    pub enum MelatoninPreference {
        Natural     => "natural",
        Supplements => "supplements",
    }
}

profile_enum! {
    pub enum LightSensitivity {
        Low    => "low",
        Normal => "normal",
        High   => "high",
    }
}

/// The traveller's full bio-profile.  All six fields are always populated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BioProfile {
    pub age_group: AgeGroup,
    pub chronotype: Chronotype,
    pub caffeine: CaffeinePreference,
    pub alcohol: AlcoholPreference,
    pub melatonin: MelatoninPreference,
    pub light_sensitivity: LightSensitivity,
}

impl Default for BioProfile {
    /// The wizard's initial form state.
    fn default() -> Self {
        Self {
            age_group:         AgeGroup::Adult,
            chronotype:        Chronotype::Balanced,
            caffeine:          CaffeinePreference::Necessary,
            alcohol:           AlcoholPreference::None,
            melatonin:         MelatoninPreference::Natural,
            light_sensitivity: LightSensitivity::Normal,
        }
    }
}

impl BioProfile {
    /// Every one of the 5 × 3 × 3 × 2 × 2 × 3 = 540 profiles.
    pub fn all() -> impl Iterator<Item = BioProfile> {
        AgeGroup::ALL.iter().flat_map(|&age_group| {
            Chronotype::ALL.iter().flat_map(move |&chronotype| {
                CaffeinePreference::ALL.iter().flat_map(move |&caffeine| {
                    AlcoholPreference::ALL.iter().flat_map(move |&alcohol| {
                        MelatoninPreference::ALL.iter().flat_map(move |&melatonin| {
                            LightSensitivity::ALL.iter().map(move |&light_sensitivity| BioProfile {
                                age_group,
                                chronotype,
                                caffeine,
                                alcohol,
                                melatonin,
                                light_sensitivity,
                            })
                        })
                    })
                })
            })
        })
    }
}
