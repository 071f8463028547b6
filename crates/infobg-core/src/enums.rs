//! Settlement kind and altitude band.
//!
//! Both are stored in the registry as small integers and serialize back to
//! the same integers, so cached JSON stays byte-compatible with the registry
//! export.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// SettlementKind
// ---------------------------------------------------------------------------

/// Registry kind of a territorial unit.
///
/// ```text
/// 1  гр.   town
/// 3  с.    village
/// 7  ман.  monastery
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SettlementKind {
    Town,
    Village,
    Monastery,
}

impl SettlementKind {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Town => 1,
            Self::Village => 3,
            Self::Monastery => 7,
        }
    }

    /// Abbreviated prefix used in front of names in source tables.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Town => "гр.",
            Self::Village => "с.",
            Self::Monastery => "ман.",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Town => "town",
            Self::Village => "village",
            Self::Monastery => "monastery",
        }
    }
}

impl TryFrom<u8> for SettlementKind {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Town),
            3 => Ok(Self::Village),
            7 => Ok(Self::Monastery),
            other => Err(CoreError::InvalidDiscriminant {
                kind: "settlement kind",
                value: i64::from(other),
            }),
        }
    }
}

impl From<SettlementKind> for u8 {
    fn from(value: SettlementKind) -> Self {
        value.code()
    }
}

impl fmt::Display for SettlementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AltitudeBand
// ---------------------------------------------------------------------------

/// Altitude group of a settlement, in metres above sea level.
///
/// ```text
/// 1  up to 49       5  300 - 499
/// 2  50 - 99        6  500 - 699
/// 3  100 - 199      7  700 - 999
/// 4  200 - 299      8  1000 and above
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AltitudeBand {
    Below50,
    From50To99,
    From100To199,
    From200To299,
    From300To499,
    From500To699,
    From700To999,
    From1000,
}

impl AltitudeBand {
    const ALL: [Self; 8] = [
        Self::Below50,
        Self::From50To99,
        Self::From100To199,
        Self::From200To299,
        Self::From300To499,
        Self::From500To699,
        Self::From700To999,
        Self::From1000,
    ];

    /// Ordinal registry code (1..=8).
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8 + 1
    }

    /// Inclusive lower bound of the band, in metres.
    #[must_use]
    pub const fn min_metres(self) -> u32 {
        match self {
            Self::Below50 => 0,
            Self::From50To99 => 50,
            Self::From100To199 => 100,
            Self::From200To299 => 200,
            Self::From300To499 => 300,
            Self::From500To699 => 500,
            Self::From700To999 => 700,
            Self::From1000 => 1000,
        }
    }

    /// Band that contains an altitude given in metres.
    #[must_use]
    pub fn for_metres(metres: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|band| metres >= band.min_metres())
            .unwrap_or(Self::Below50)
    }
}

impl TryFrom<u8> for AltitudeBand {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=8 => Ok(Self::ALL[usize::from(value - 1)]),
            other => Err(CoreError::InvalidDiscriminant {
                kind: "altitude band",
                value: i64::from(other),
            }),
        }
    }
}

impl From<AltitudeBand> for u8 {
    fn from(value: AltitudeBand) -> Self {
        value.code()
    }
}
