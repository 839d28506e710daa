use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChartError>;

// Chart Error Handling
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Observer coordinates out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
    #[error("UTC offset of {0} seconds is out of range")]
    InvalidOffset(i32),
    #[error("Provider returned a non-finite {quantity}: {value}")]
    NonFinite { quantity: &'static str, value: f64 },
    #[error("No zodiac range matches month {month}, day {day}")]
    UnmatchedZodiacDate { month: u32, day: u32 },
    #[error("Missing query parameter: {0}")]
    MissingQueryParam(&'static str),
}

impl ChartError {
    /// Rejects NaN and infinities coming back from a provider.
    pub(crate) fn check_finite(quantity: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ChartError::NonFinite { quantity, value })
        }
    }
}
