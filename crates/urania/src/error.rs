use thiserror::Error;

/// Errors raised by chart computations.
///
/// Every variant is a local input failure. Nothing is retried and nothing is
/// silently corrected; a failed computation never yields a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid timestamp: {message}")]
    InvalidTimestamp { message: String },
    #[error("Invalid latitude {latitude}: must satisfy |latitude| < 90")]
    InvalidLatitude { latitude: f64 },
    #[error("Invalid longitude {longitude}: must be within [-180, 180]")]
    InvalidLongitude { longitude: f64 },
    #[error("Latitude {latitude} is outside the range supported by the {system} house system (limit {limit})")]
    UnsupportedLatitude {
        system: String,
        latitude: f64,
        limit: f64,
    },
    #[error("Unsupported body: {body}. Valid bodies: {valid:?}")]
    UnsupportedBody { body: String, valid: Vec<String> },
    #[error("Invalid orb {orb} for {aspect}: orb must be greater than 0 and at most {max}")]
    InvalidOrb { aspect: String, orb: f64, max: f64 },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    UnknownHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid aspect: {aspect}. Valid aspects: {valid:?}")]
    UnknownAspect { aspect: String, valid: Vec<String> },
    #[error("Invalid {name} {value}: {reason}")]
    InvalidSetting {
        name: String,
        value: f64,
        reason: String,
    },
}

impl ChartError {
    pub(crate) fn timestamp(message: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            message: message.into(),
        }
    }

    pub(crate) fn setting(name: &str, value: f64, reason: &str) -> Self {
        Self::InvalidSetting {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
