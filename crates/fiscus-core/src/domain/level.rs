use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// COFOG classification granularity: 1 = divisions (coarsest), 2 = groups,
/// 3 = classes (finest). `Ord` follows granularity, so `min` picks the
/// coarser of two levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum Level {
    L1 = 1,
    L2 = 2,
    L3 = 3,
}

impl Level {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl TryFrom<u8> for Level {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::L1),
            2 => Ok(Self::L2),
            3 => Ok(Self::L3),
            other => Err(ValidationError::LevelOutOfRange { value: other }),
        }
    }
}

impl From<Level> for u8 {
    fn from(value: Level) -> Self {
        value.as_u8()
    }
}

impl FromStr for Level {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parsed = value.trim().parse::<u8>().map_err(|_| {
            ValidationError::InvalidLevel {
                value: value.to_owned(),
            }
        })?;
        Self::try_from(parsed).map_err(|_| ValidationError::InvalidLevel {
            value: value.to_owned(),
        })
    }
}
