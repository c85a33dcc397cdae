//! Layover classification.

use std::fmt;

use jl_core::time::Minutes;

/// Short or long connection.  The boundary belongs to `Long`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LayoverKind {
    Short,
    Long,
}

impl LayoverKind {
    /// `minutes < threshold` is short, everything else long.
    #[inline]
    pub fn classify(minutes: Minutes, threshold: Minutes) -> LayoverKind {
        if minutes < threshold { LayoverKind::Short } else { LayoverKind::Long }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoverKind::Short => "short",
            LayoverKind::Long => "long",
        }
    }
}

impl fmt::Display for LayoverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
