//! Astronomical primitives: lunar illumination, position and rise/set.
//!
//! `AstronomyProvider` is the seam the chart calculations depend on.
//! `SunCalcProvider` implements it with the usual low-precision formulas
//! (mean lunar elements, a three-term equation of center for the Sun, fixed
//! obliquity). Accuracy is a few arc-minutes, which is plenty for phase
//! names and whole-minute rise/set times.

use std::f64::consts::PI;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date_utils::{days_since_j2000, hours_later};

const RAD: f64 = PI / 180.0;
/// Obliquity of the ecliptic.
const OBLIQUITY: f64 = RAD * 23.4397;
/// Mean Earth-Sun distance in km.
const SUN_DISTANCE_KM: f64 = 149_598_000.0;
/// Apparent lunar radius plus parallax correction applied to rise/set.
const MOON_HORIZON: f64 = 0.133 * RAD;

/// Illuminated fraction and cycle position of the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonIllumination {
    /// Illuminated fraction of the visible disk, 0..=1.
    pub fraction: f64,
    /// Position in the synodic cycle, 0 = new, 0.5 = full.
    pub phase: f64,
    /// Midpoint angle of the illuminated limb, radians.
    pub angle: f64,
}

/// Horizontal position of the Moon for an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonPosition {
    /// Radians, measured from south towards west.
    pub azimuth: f64,
    /// Radians above the horizon, refraction included.
    pub altitude: f64,
    /// Earth-Moon distance in km.
    pub distance: f64,
    pub parallactic_angle: f64,
}

/// Moonrise and moonset within one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonTimes {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    /// No crossing during the day and the Moon stayed above the horizon.
    pub always_up: bool,
    /// No crossing during the day and the Moon stayed below the horizon.
    pub always_down: bool,
}

/// Source of lunar primitives consumed by the chart calculations.
pub trait AstronomyProvider: Send + Sync {
    fn moon_illumination(&self, at: DateTime<Utc>) -> MoonIllumination;

    fn moon_position(&self, at: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonPosition;

    /// Rise and set during the 24 hours starting at `day_start`.
    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes;
}

impl<P: AstronomyProvider + ?Sized> AstronomyProvider for &P {
    fn moon_illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
        (**self).moon_illumination(at)
    }

    fn moon_position(&self, at: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonPosition {
        (**self).moon_position(at, latitude, longitude)
    }

    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
        (**self).moon_times(day_start, latitude, longitude)
    }
}

/// Stateless provider implementing the low-precision lunar formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunCalcProvider;

impl SunCalcProvider {
    pub fn new() -> Self {
        Self
    }
}

struct Equatorial {
    right_ascension: f64,
    declination: f64,
}

struct LunarCoordinates {
    right_ascension: f64,
    declination: f64,
    distance: f64,
}

fn right_ascension(longitude: f64, latitude: f64) -> f64 {
    (longitude.sin() * OBLIQUITY.cos() - latitude.tan() * OBLIQUITY.sin()).atan2(longitude.cos())
}

fn declination(longitude: f64, latitude: f64) -> f64 {
    (latitude.sin() * OBLIQUITY.cos() + latitude.cos() * OBLIQUITY.sin() * longitude.sin()).asin()
}

fn azimuth(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    hour_angle
        .sin()
        .atan2(hour_angle.cos() * phi.sin() - dec.tan() * phi.cos())
}

fn altitude(hour_angle: f64, phi: f64, dec: f64) -> f64 {
    (phi.sin() * dec.sin() + phi.cos() * dec.cos() * hour_angle.cos()).asin()
}

fn sidereal_time(days: f64, west_longitude: f64) -> f64 {
    RAD * (280.16 + 360.985_623_5 * days) - west_longitude
}

fn astro_refraction(altitude: f64) -> f64 {
    // formula only holds for positive altitudes
    let h = altitude.max(0.0);
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

fn solar_mean_anomaly(days: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * days)
}

fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    let m = mean_anomaly;
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

fn sun_coords(days: f64) -> Equatorial {
    let longitude = ecliptic_longitude(solar_mean_anomaly(days));
    Equatorial {
        right_ascension: right_ascension(longitude, 0.0),
        declination: declination(longitude, 0.0),
    }
}

fn moon_coords(days: f64) -> LunarCoordinates {
    let mean_longitude = RAD * (218.316 + 13.176_396 * days);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * days);
    let mean_distance = RAD * (93.272 + 13.229_350 * days);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * mean_distance.sin();
    let distance = 385_001.0 - 20_905.0 * mean_anomaly.cos();

    LunarCoordinates {
        right_ascension: right_ascension(longitude, latitude),
        declination: declination(longitude, latitude),
        distance,
    }
}

impl AstronomyProvider for SunCalcProvider {
    fn moon_illumination(&self, at: DateTime<Utc>) -> MoonIllumination {
        let days = days_since_j2000(at);
        let sun = sun_coords(days);
        let moon = moon_coords(days);

        let ra_diff = sun.right_ascension - moon.right_ascension;
        let elongation = (sun.declination.sin() * moon.declination.sin()
            + sun.declination.cos() * moon.declination.cos() * ra_diff.cos())
        .acos();
        let incidence = (SUN_DISTANCE_KM * elongation.sin())
            .atan2(moon.distance - SUN_DISTANCE_KM * elongation.cos());
        let angle = (sun.declination.cos() * ra_diff.sin()).atan2(
            sun.declination.sin() * moon.declination.cos()
                - sun.declination.cos() * moon.declination.sin() * ra_diff.cos(),
        );
        let sign = if angle < 0.0 { -1.0 } else { 1.0 };

        MoonIllumination {
            fraction: (1.0 + incidence.cos()) / 2.0,
            phase: 0.5 + 0.5 * incidence * sign / PI,
            angle,
        }
    }

    fn moon_position(&self, at: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonPosition {
        let west_longitude = RAD * -longitude;
        let phi = RAD * latitude;
        let days = days_since_j2000(at);
        let moon = moon_coords(days);

        let hour_angle = sidereal_time(days, west_longitude) - moon.right_ascension;
        let h = altitude(hour_angle, phi, moon.declination);
        let parallactic_angle = hour_angle.sin().atan2(
            phi.tan() * moon.declination.cos() - moon.declination.sin() * hour_angle.cos(),
        );

        MoonPosition {
            azimuth: azimuth(hour_angle, phi, moon.declination),
            altitude: h + astro_refraction(h),
            distance: moon.distance,
            parallactic_angle,
        }
    }

    fn moon_times(&self, day_start: DateTime<Utc>, latitude: f64, longitude: f64) -> MoonTimes {
        let altitude_at = |hours: f64| {
            self.moon_position(hours_later(day_start, hours), latitude, longitude)
                .altitude
                - MOON_HORIZON
        };

        // Fit a parabola through each two-hour window and look for horizon crossings.
        let mut h0 = altitude_at(0.0);
        let mut rise: Option<f64> = None;
        let mut set: Option<f64> = None;
        let mut ye = 0.0;

        let mut i = 1.0;
        while i <= 24.0 {
            let h1 = altitude_at(i);
            let h2 = altitude_at(i + 1.0);

            let a = (h0 + h2) / 2.0 - h1;
            let b = (h2 - h0) / 2.0;
            let xe = -b / (2.0 * a);
            ye = (a * xe + b) * xe + h1;
            let discriminant = b * b - 4.0 * a * h1;

            let mut roots = 0;
            let mut x1 = 0.0;
            let mut x2 = 0.0;
            if discriminant >= 0.0 {
                let dx = discriminant.sqrt() / (a.abs() * 2.0);
                x1 = xe - dx;
                x2 = xe + dx;
                if x1.abs() <= 1.0 {
                    roots += 1;
                }
                if x2.abs() <= 1.0 {
                    roots += 1;
                }
                if x1 < -1.0 {
                    x1 = x2;
                }
            }

            if roots == 1 {
                if h0 < 0.0 {
                    rise = Some(i + x1);
                } else {
                    set = Some(i + x1);
                }
            } else if roots == 2 {
                rise = Some(i + if ye < 0.0 { x2 } else { x1 });
                set = Some(i + if ye < 0.0 { x1 } else { x2 });
            }

            if rise.is_some() && set.is_some() {
                break;
            }
            h0 = h2;
            i += 2.0;
        }

        let neither = rise.is_none() && set.is_none();
        MoonTimes {
            rise: rise.map(|hours| hours_later(day_start, hours)),
            set: set.map(|hours| hours_later(day_start, hours)),
            always_up: neither && ye > 0.0,
            always_down: neither && ye <= 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    // Reference lunations (UTC).
    fn full_moon_jan_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 25, 17, 54, 0).unwrap()
    }

    fn new_moon_jan_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 11, 11, 57, 0).unwrap()
    }

    #[test]
    fn illumination_near_full_moon() {
        let illum = SunCalcProvider.moon_illumination(full_moon_jan_2024());
        assert!(illum.fraction > 0.98, "fraction {}", illum.fraction);
        assert!((illum.phase - 0.5).abs() < 0.02, "phase {}", illum.phase);
    }

    #[test]
    fn illumination_near_new_moon() {
        let illum = SunCalcProvider.moon_illumination(new_moon_jan_2024());
        assert!(illum.fraction < 0.02, "fraction {}", illum.fraction);
        let distance_from_new = illum.phase.min(1.0 - illum.phase);
        assert!(distance_from_new < 0.02, "phase {}", illum.phase);
    }

    #[test]
    fn illumination_stays_in_range() {
        let start = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        for step in 0..400 {
            let illum = SunCalcProvider.moon_illumination(hours_later(start, step as f64 * 7.0));
            assert!((0.0..=1.0).contains(&illum.fraction));
            assert!((0.0..=1.0).contains(&illum.phase));
        }
    }

    #[test]
    fn position_is_bounded() {
        let at = Utc.with_ymd_and_hms(2000, 6, 15, 3, 0, 0).unwrap();
        let pos = SunCalcProvider.moon_position(at, 40.7128, -74.0060);
        assert!(pos.azimuth.abs() <= PI);
        assert!(pos.altitude.abs() <= PI / 2.0 + 0.01);
        assert!((356_000.0..=407_000.0).contains(&pos.distance));
    }

    #[test]
    fn rise_and_set_fall_inside_the_day() {
        let day_start = Utc.with_ymd_and_hms(2024, 1, 25, 5, 0, 0).unwrap();
        let times = SunCalcProvider.moon_times(day_start, 40.7128, -74.0060);
        let day_end = hours_later(day_start, 25.0);
        for event in [times.rise, times.set].into_iter().flatten() {
            assert!(event >= day_start && event <= day_end);
        }
        if times.rise.is_some() || times.set.is_some() {
            assert!(!times.always_up && !times.always_down);
        }
    }

    #[test]
    fn polar_day_without_crossings() {
        // Deep in the Arctic the Moon regularly stays on one side of the horizon all day.
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut saw_circumpolar = false;
        for day in 0..30 {
            let times = SunCalcProvider.moon_times(hours_later(start, day as f64 * 24.0), 85.0, 0.0);
            if times.rise.is_none() && times.set.is_none() {
                assert!(times.always_up ^ times.always_down);
                saw_circumpolar = true;
            }
        }
        assert!(saw_circumpolar);
    }
}
