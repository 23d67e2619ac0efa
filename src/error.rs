use thiserror::Error;

/// Error class the external scheduler dispatches on: transient readings get
/// retried, domain and calculation failures get flagged to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unavailable,
    Domain,
    Calculation,
}

#[derive(Error, Debug)]
pub enum EtoError {
    #[error("Reading `{reading}` not yet available; probably still starting up")]
    UnavailableInput { reading: String },
    #[error("Reading `{reading}` is not a finite number: {value}")]
    InvalidReading { reading: String, value: f64 },
    #[error("{step}: value {value} outside valid range {min}..{max}")]
    Domain {
        step: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl EtoError {
    pub fn unavailable(reading: &str) -> Self {
        EtoError::UnavailableInput { reading: reading.to_owned() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EtoError::UnavailableInput { .. } => ErrorKind::Unavailable,
            EtoError::Domain { .. } => ErrorKind::Domain,
            EtoError::InvalidReading { .. } | EtoError::Calculation(_) => ErrorKind::Calculation,
        }
    }

    /// Only a not-yet-available reading is worth another poll; everything else
    /// means a misconfiguration that a retry cannot fix.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Unavailable
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_map_to_retry_policy() {
        assert!(EtoError::unavailable("temp_min").is_retryable());
        assert!(!EtoError::Domain { step: "day_of_year", value: 0., min: 1., max: 366. }.is_retryable());
        assert!(!EtoError::InvalidReading { reading: "wind".into(), value: f64::NAN }.is_retryable());
        assert!(!EtoError::Calculation("zero throughput".into()).is_retryable());
    }

    #[test]
    fn invalid_reading_counts_as_calculation() {
        let err = EtoError::InvalidReading { reading: "solar_rad".into(), value: f64::INFINITY };
        assert_eq!(err.kind(), ErrorKind::Calculation);
    }
}
