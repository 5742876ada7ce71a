use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid duration '{input}': expected <int><unit> with unit h, d, m, or mo")]
    InvalidDuration { input: String },

    #[error("Intensity multiplier must be > 0, got {value}")]
    NonPositiveIntensity { value: f64 },

    #[error("Correlation coefficient must be in [-1, 1], got {coefficient}")]
    CorrelationOutOfRange { coefficient: f64 },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
