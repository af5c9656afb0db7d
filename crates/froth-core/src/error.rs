//! Error types for Froth

use thiserror::Error;

/// The main error type for Froth operations
#[derive(Debug, Error)]
pub enum FrothError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Inverted range: {field} has min {min} greater than max {max}")]
    InvertedRange { field: String, min: f64, max: f64 },

    #[error("Mount point already in use: {0}")]
    MountPointBusy(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

/// Result type alias for Froth operations
pub type Result<T> = std::result::Result<T, FrothError>;

impl From<toml::de::Error> for FrothError {
    fn from(err: toml::de::Error) -> Self {
        FrothError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for FrothError {
    fn from(err: toml::ser::Error) -> Self {
        FrothError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_message() {
        let err = FrothError::ValueOutOfRange {
            field: "margin".into(),
            min: 0.0,
            max: 1.0,
            value: 2.0,
        };
        assert_eq!(
            err.to_string(),
            "Value out of range: margin must be between 0 and 1, got 2"
        );
    }

    #[test]
    fn toml_error_converts() {
        let err: FrothError = toml::from_str::<toml::Value>("= nope")
            .unwrap_err()
            .into();
        assert!(matches!(err, FrothError::TomlParseError(_)));
    }

    #[test]
    fn toml_ser_error_converts() {
        // A bare value cannot be a TOML document
        let err: FrothError = toml::to_string(&1.5f32).unwrap_err().into();
        assert!(matches!(err, FrothError::TomlSerError(_)));
    }
}
