use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Default rise/set location (New York City).
pub const DEFAULT_LATITUDE: f64 = 40.7128;
pub const DEFAULT_LONGITUDE: f64 = -74.0060;

/// Geographic observer location in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
}

impl Observer {
    /// Creates a validated observer.
    ///
    /// Latitude must lie in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ChartError::InvalidCoordinates { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Creates an observer without validation. Use with trusted constants only.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The location used for rise/set when the caller supplies none.
    pub const fn default_rise_set() -> Self {
        Self::new_unchecked(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }

    /// Latitude 0, longitude 0. Reference point for the moon sign approximation.
    pub const fn null_island() -> Self {
        Self::new_unchecked(0.0, 0.0)
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::default_rise_set()
    }
}

// Configuration for chart calculations
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where moonrise and moonset are observed.
    pub observer: Observer,
    /// Where the moon azimuth for the moon sign is sampled.
    pub moon_sign_reference: Observer,
    /// Offset used to place a calendar date on the timeline and to format
    /// rise/set times.
    pub utc_offset: FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            observer: Observer::default_rise_set(),
            moon_sign_reference: Observer::null_island(),
            utc_offset: Utc.fix(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observer(mut self, observer: Observer) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_moon_sign_reference(mut self, reference: Observer) -> Self {
        self.moon_sign_reference = reference;
        self
    }

    /// Sets the local offset from a signed number of minutes east of UTC.
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Result<Self> {
        let seconds = minutes.saturating_mul(60);
        self.utc_offset = FixedOffset::east_opt(seconds).ok_or(ChartError::InvalidOffset(seconds))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_observer_is_new_york() {
        let config = Config::default();
        assert_eq!(config.observer.latitude, 40.7128);
        assert_eq!(config.observer.longitude, -74.0060);
        assert_eq!(config.moon_sign_reference, Observer::null_island());
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn observer_rejects_out_of_range() {
        assert!(Observer::new(91.0, 0.0).is_err());
        assert!(Observer::new(0.0, -180.5).is_err());
        assert!(Observer::new(f64::NAN, 0.0).is_err());
        assert!(Observer::new(-33.87, 151.21).is_ok());
    }

    #[test]
    fn utc_offset_in_minutes() {
        let config = Config::new().with_utc_offset_minutes(-300).unwrap();
        assert_eq!(config.utc_offset.local_minus_utc(), -5 * 3600);
        assert_eq!(
            Config::new().with_utc_offset_minutes(24 * 60),
            Err(ChartError::InvalidOffset(24 * 3600))
        );
    }
}
