use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Jurisdiction code for the geography whose spending is reported.
///
/// Upstream callers use ISO-style country codes in whatever variant their
/// pipeline emits (`UK`, `GB`, and `GBR` all occur in the wild and are kept
/// distinct here). Parsing trims and uppercases but does not canonicalize
/// one variant onto another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Geography(String);

impl Geography {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyGeography);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if !(2..=3).contains(&len) {
            return Err(ValidationError::GeographyBadLength {
                value: normalized,
                len,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_alphabetic() {
                return Err(ValidationError::GeographyInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Geography {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Geography {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Geography {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Geography> for String {
    fn from(value: Geography) -> Self {
        value.0
    }
}
