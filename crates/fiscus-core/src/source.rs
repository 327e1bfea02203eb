use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical identifiers for the statistical agencies fiscus can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    Eurostat,
    Oecd,
    Imf,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::Eurostat, Self::Oecd, Self::Imf];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eurostat => "eurostat",
            Self::Oecd => "oecd",
            Self::Imf => "imf",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "eurostat" => Ok(Self::Eurostat),
            "oecd" => Ok(Self::Oecd),
            "imf" => Ok(Self::Imf),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}
