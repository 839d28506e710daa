//! Moon sign approximation.
//!
//! Not an ephemeris: the Moon's horizontal azimuth at a fixed reference
//! location stands in for its ecliptic longitude. Output depends on this
//! exact transformation, so it must not be swapped for a more correct one.

use std::f64::consts::PI;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::astronomical::AstronomyProvider;
use crate::config::Observer;
use crate::error::{ChartError, Result};
use crate::zodiac::{Element, Sign};

/// Moon-in-sign record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonSign {
    pub sign: Sign,
    pub element: Element,
    pub description: String,
}

impl From<Sign> for MoonSign {
    fn from(sign: Sign) -> Self {
        Self {
            sign,
            element: sign.element(),
            description: moon_description(sign).to_string(),
        }
    }
}

pub fn moon_description(sign: Sign) -> &'static str {
    match sign {
        Sign::Aries => "Moon in Aries indicates emotional responses that are quick, direct, and sometimes impulsive. You may feel emotions intensely but move through them quickly. You're emotionally independent and may need action to process feelings.",
        Sign::Taurus => "Moon in Taurus suggests emotional security is found through stability and physical comfort. You process feelings slowly and thoroughly, valuing consistency in your emotional life. Material security helps you feel emotionally grounded.",
        Sign::Gemini => "Moon in Gemini indicates a need for mental stimulation to feel emotionally satisfied. You process emotions through conversation and analysis. Variety and communication are essential for your emotional wellbeing.",
        Sign::Cancer => "Moon in Cancer creates deep emotional sensitivity and strong intuition. Your feelings run deep and you're highly attuned to others' emotions. Home, family, and nurturing connections are central to your emotional security.",
        Sign::Leo => "Moon in Leo suggests you need recognition and creative expression for emotional fulfillment. Your feelings are dramatic, warm, and generous. Being appreciated and admired helps you feel emotionally secure.",
        Sign::Virgo => "Moon in Virgo indicates you process emotions through analysis and practical problem-solving. You need order and usefulness to feel emotionally secure. You may be self-critical but have a genuine desire to improve and help others.",
        Sign::Libra => "Moon in Libra suggests emotional harmony comes through relationships and balance. You need beauty and peaceful surroundings to feel centered. Your emotional responses are measured and considerate of others.",
        Sign::Scorpio => "Moon in Scorpio creates intense, profound emotional experiences. You feel deeply and may be secretive about your true feelings. Emotional authenticity and transformation are essential for your wellbeing.",
        Sign::Sagittarius => "Moon in Sagittarius indicates emotional fulfillment through freedom, exploration, and meaning. Your emotional responses are enthusiastic and optimistic. You need space to follow your beliefs and philosophical interests.",
        Sign::Capricorn => "Moon in Capricorn suggests emotional security comes through achievement and structure. You may appear reserved but have deep feelings beneath the surface. Responsibility and self-discipline help you feel emotionally stable.",
        Sign::Aquarius => "Moon in Aquarius indicates emotional detachment and intellectual processing of feelings. You value emotional independence and may feel most secure when contributing to collective causes. Friendship and ideals are important to your emotional life.",
        Sign::Pisces => "Moon in Pisces creates heightened sensitivity and emotional receptivity. Your boundaries with others' emotions may be fluid, making you compassionate but potentially overwhelmed. Spiritual connection and creativity help you process feelings.",
    }
}

/// Pseudo-longitude in degrees: azimuth in degrees shifted by 180.
pub fn pseudo_longitude(azimuth_radians: f64) -> f64 {
    azimuth_radians * 180.0 / PI + 180.0
}

/// Table index for an azimuth. Anything outside 0..12 falls back to 0.
pub fn moon_sign_index(azimuth_radians: f64) -> usize {
    let position = (pseudo_longitude(azimuth_radians) % 360.0) / 30.0;
    let index = position.floor();
    if (0.0..12.0).contains(&index) {
        index as usize
    } else {
        warn!(
            target: "celestial_calculation",
            azimuth_radians, position, "moon sign index out of range, using first entry"
        );
        0
    }
}

/// Approximate moon sign at `at`, sampled at `reference`.
pub fn compute_moon_sign<P: AstronomyProvider>(
    provider: &P,
    at: DateTime<FixedOffset>,
    reference: Observer,
) -> Result<MoonSign> {
    let position = provider.moon_position(
        at.with_timezone(&Utc),
        reference.latitude,
        reference.longitude,
    );
    let azimuth = ChartError::check_finite("moon azimuth", position.azimuth)?;
    let sign = Sign::ALL[moon_sign_index(azimuth)];
    debug!(target: "celestial_calculation", azimuth, %sign, "approximated moon sign");
    Ok(MoonSign::from(sign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomical::{MoonIllumination, MoonPosition, MoonTimes};
    use chrono::TimeZone;

    struct Azimuth(f64);

    impl AstronomyProvider for Azimuth {
        fn moon_illumination(&self, _at: DateTime<Utc>) -> MoonIllumination {
            MoonIllumination { fraction: 0.0, phase: 0.0, angle: 0.0 }
        }

        fn moon_position(&self, _at: DateTime<Utc>, _lat: f64, _lng: f64) -> MoonPosition {
            MoonPosition { azimuth: self.0, altitude: 0.0, distance: 385_000.0, parallactic_angle: 0.0 }
        }

        fn moon_times(&self, _day_start: DateTime<Utc>, _lat: f64, _lng: f64) -> MoonTimes {
            MoonTimes::default()
        }
    }

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(1990, 3, 21, 0, 0, 0).unwrap()
    }

    #[test]
    fn full_circle_wraps_to_first_entry() {
        // azimuth of +pi gives a pseudo-longitude of exactly 360
        assert_eq!(pseudo_longitude(PI), 360.0);
        assert_eq!(moon_sign_index(PI), 0);
        let sign = compute_moon_sign(&Azimuth(PI), at(), Observer::null_island()).unwrap();
        assert_eq!(sign.sign, Sign::Aries);
    }

    #[test]
    fn azimuth_maps_to_thirty_degree_bins() {
        assert_eq!(moon_sign_index(-PI), 0);
        assert_eq!(moon_sign_index(0.0), 6);
        assert_eq!(moon_sign_index((-150.0_f64).to_radians() + 1e-9), 1);
        assert_eq!(moon_sign_index(PI - 1e-9), 11);
    }

    #[test]
    fn out_of_range_falls_back_to_first_entry() {
        // a negative pseudo-longitude keeps its sign through `%`
        assert_eq!(moon_sign_index(-2.0 * PI), 0);
        assert_eq!(moon_sign_index(f64::NAN), 0);
    }

    #[test]
    fn non_finite_azimuth_is_an_error() {
        let err = compute_moon_sign(&Azimuth(f64::INFINITY), at(), Observer::null_island()).unwrap_err();
        assert!(matches!(err, ChartError::NonFinite { quantity: "moon azimuth", .. }));
    }

    #[test]
    fn record_uses_moon_text() {
        let sign = compute_moon_sign(&Azimuth(0.0), at(), Observer::null_island()).unwrap();
        assert_eq!(sign.sign, Sign::Libra);
        assert_eq!(sign.element, Element::Air);
        assert!(sign.description.starts_with("Moon in Libra"));
    }
}
