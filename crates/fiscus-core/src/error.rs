use thiserror::Error;

/// Validation and contract errors exposed by `fiscus-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("geography cannot be empty")]
    EmptyGeography,
    #[error("geography must be 2-3 characters, got {len}: '{value}'")]
    GeographyBadLength { value: String, len: usize },
    #[error("geography contains invalid character '{ch}' at index {index}")]
    GeographyInvalidChar { ch: char, index: usize },

    #[error("invalid classification level '{value}', expected 1, 2, or 3")]
    InvalidLevel { value: String },
    #[error("classification level out of range: {value}")]
    LevelOutOfRange { value: u8 },

    #[error("invalid provider '{value}', expected one of eurostat, oecd, imf")]
    InvalidProvider { value: String },

    #[error("coverage year range is inverted: min {min_year} > max {max_year}")]
    InvertedYearRange { min_year: i32, max_year: i32 },
    #[error("duplicate coverage key ({provider}, {geography})")]
    DuplicateCoverageKey { provider: String, geography: String },

    #[error("fallback order must contain at least one provider")]
    EmptyFallbackOrder,
}
