use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Degenerate centerline: {points} point(s), at least 2 required")]
    DegenerateInput { points: usize },
}

impl TrackError {
    pub fn config(msg: impl Into<String>) -> Self {
        TrackError::Configuration(msg.into())
    }
}

/// Rejects NaN, infinities and values that are not strictly positive.
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<(), TrackError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrackError::config(format!(
            "{name} must be a positive finite number, got {value}"
        )));
    }
    Ok(())
}
