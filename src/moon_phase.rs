use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::astronomical::AstronomyProvider;
use crate::config::Observer;
use crate::date_utils::{format_clock, local_midnight};
use crate::error::{ChartError, Result};

/// Mean synodic month in days, as used for the displayed lunar age.
pub const SYNODIC_MONTH_DAYS: f64 = 29.53;

/// Shown in place of a rise or set time that does not happen that day.
pub const NOT_VISIBLE: &str = "Not visible";

/// The eight named phases, in cycle order starting at new moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoonPhase {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full Moon")]
    FullMoon,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 8] = [
        MoonPhase::NewMoon,
        MoonPhase::WaxingCrescent,
        MoonPhase::FirstQuarter,
        MoonPhase::WaxingGibbous,
        MoonPhase::FullMoon,
        MoonPhase::WaningGibbous,
        MoonPhase::LastQuarter,
        MoonPhase::WaningCrescent,
    ];

    /// Classify a position in the synodic cycle (0 = new, 0.5 = full).
    ///
    /// Octant bins are centred on the canonical phase points; the new moon bin
    /// wraps across 0/1, and anything outside [0, 1) lands there too.
    pub fn from_cycle_fraction(fraction: f64) -> Self {
        match fraction {
            p if p < 0.0625 => MoonPhase::NewMoon,
            p if p < 0.1875 => MoonPhase::WaxingCrescent,
            p if p < 0.3125 => MoonPhase::FirstQuarter,
            p if p < 0.4375 => MoonPhase::WaxingGibbous,
            p if p < 0.5625 => MoonPhase::FullMoon,
            p if p < 0.6875 => MoonPhase::WaningGibbous,
            p if p < 0.8125 => MoonPhase::LastQuarter,
            p if p < 0.9375 => MoonPhase::WaningCrescent,
            _ => MoonPhase::NewMoon,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "New Moon",
            MoonPhase::WaxingCrescent => "Waxing Crescent",
            MoonPhase::FirstQuarter => "First Quarter",
            MoonPhase::WaxingGibbous => "Waxing Gibbous",
            MoonPhase::FullMoon => "Full Moon",
            MoonPhase::WaningGibbous => "Waning Gibbous",
            MoonPhase::LastQuarter => "Last Quarter",
            MoonPhase::WaningCrescent => "Waning Crescent",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "A time of new beginnings and fresh starts. The sky is dark as the moon is not visible.",
            MoonPhase::WaxingCrescent => "A time of growth and intention-setting. A sliver of the moon is visible, growing each night.",
            MoonPhase::FirstQuarter => "A time of action and decision-making. Half of the moon is visible, increasing in light.",
            MoonPhase::WaxingGibbous => "A time of refinement and perfection. The moon is more than half lit, approaching fullness.",
            MoonPhase::FullMoon => "A time of culmination and illumination. The entire face of the moon is visible and brightly lit.",
            MoonPhase::WaningGibbous => "A time of gratitude and sharing. The moon is still mostly lit but beginning to decrease.",
            MoonPhase::LastQuarter => "A time of release and letting go. Half of the moon is visible, decreasing in light.",
            MoonPhase::WaningCrescent => "A time of surrender and rest. Only a sliver of the moon is visible, fading each night.",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoonPhase::NewMoon => "🌑",
            MoonPhase::WaxingCrescent => "🌒",
            MoonPhase::FirstQuarter => "🌓",
            MoonPhase::WaxingGibbous => "🌔",
            MoonPhase::FullMoon => "🌕",
            MoonPhase::WaningGibbous => "🌖",
            MoonPhase::LastQuarter => "🌗",
            MoonPhase::WaningCrescent => "🌘",
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which half of the disk a renderer should light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LitSide {
    /// Waxing: right side illuminated.
    Right,
    /// Waning: left side illuminated.
    Left,
}

/// Display angle in degrees: 0/360 new moon, 180 full moon.
///
/// Offset by 180 degrees from the raw cycle fraction.
pub fn phase_angle(cycle_fraction: f64) -> f64 {
    (cycle_fraction * 360.0 + 180.0) % 360.0
}

/// Approximate age of the Moon in whole days.
pub fn lunar_age_days(phase_angle: f64) -> i64 {
    ((phase_angle / 360.0) * SYNODIC_MONTH_DAYS).round() as i64
}

/// Illuminated fraction as a whole percentage.
pub fn illumination_percent(illumination: f64) -> i64 {
    (illumination * 100.0).round() as i64
}

pub fn lit_side(phase_angle: f64) -> LitSide {
    if phase_angle < 180.0 {
        LitSide::Right
    } else {
        LitSide::Left
    }
}

/// Moon phase details for one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoonPhaseResult {
    pub phase: MoonPhase,
    pub phase_angle: f64,
    pub illumination: f64,
    pub description: String,
    pub moonrise: String,
    pub moonset: String,
}

impl MoonPhaseResult {
    pub fn lunar_age_days(&self) -> i64 {
        lunar_age_days(self.phase_angle)
    }

    pub fn illumination_percent(&self) -> i64 {
        illumination_percent(self.illumination)
    }

    pub fn lit_side(&self) -> LitSide {
        lit_side(self.phase_angle)
    }
}

fn format_event(event: Option<DateTime<Utc>>, offset: &FixedOffset) -> String {
    event
        .map(|instant| format_clock(&instant.with_timezone(offset)))
        .unwrap_or_else(|| NOT_VISIBLE.to_string())
}

/// Compute the phase, illumination and rise/set times for `at`.
///
/// Rise and set are searched over the local calendar day containing `at`
/// and formatted in the offset of `at`.
pub fn compute_moon_phase<P: AstronomyProvider>(
    provider: &P,
    at: DateTime<FixedOffset>,
    observer: Observer,
) -> Result<MoonPhaseResult> {
    let instant = at.with_timezone(&Utc);
    let illum = provider.moon_illumination(instant);
    let cycle = ChartError::check_finite("phase fraction", illum.phase)?;
    let illumination = ChartError::check_finite("illuminated fraction", illum.fraction)?;

    let phase = MoonPhase::from_cycle_fraction(cycle);
    let angle = phase_angle(cycle);
    debug!(target: "celestial_calculation", %phase, cycle, angle, "classified moon phase");

    let offset = *at.offset();
    let day_start = local_midnight(at.date_naive(), offset)?.with_timezone(&Utc);
    let times = provider.moon_times(day_start, observer.latitude, observer.longitude);

    Ok(MoonPhaseResult {
        phase,
        phase_angle: angle,
        illumination,
        description: phase.description().to_string(),
        moonrise: format_event(times.rise, &offset),
        moonset: format_event(times.set, &offset),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astronomical::{MoonIllumination, MoonPosition, MoonTimes};
    use chrono::{NaiveDate, TimeZone};

    struct FixedSky {
        phase: f64,
        fraction: f64,
        times: MoonTimes,
    }

    impl AstronomyProvider for FixedSky {
        fn moon_illumination(&self, _at: DateTime<Utc>) -> MoonIllumination {
            MoonIllumination { fraction: self.fraction, phase: self.phase, angle: 0.0 }
        }

        fn moon_position(&self, _at: DateTime<Utc>, _lat: f64, _lng: f64) -> MoonPosition {
            MoonPosition { azimuth: 0.0, altitude: 0.0, distance: 385_000.0, parallactic_angle: 0.0 }
        }

        fn moon_times(&self, _day_start: DateTime<Utc>, _lat: f64, _lng: f64) -> MoonTimes {
            self.times
        }
    }

    fn utc_midnight(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .from_local_datetime(&NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn octant_boundaries() {
        use MoonPhase::*;
        let cases = [
            (0.0, NewMoon),
            (0.062_499, NewMoon),
            (0.0625, WaxingCrescent),
            (0.1875, FirstQuarter),
            (0.3125, WaxingGibbous),
            (0.4375, FullMoon),
            (0.5, FullMoon),
            (0.5625, WaningGibbous),
            (0.6875, LastQuarter),
            (0.8125, WaningCrescent),
            (0.937_499, WaningCrescent),
            (0.9375, NewMoon),
            (0.999_999, NewMoon),
        ];
        for (fraction, expected) in cases {
            assert_eq!(MoonPhase::from_cycle_fraction(fraction), expected, "p = {fraction}");
        }
    }

    #[test]
    fn phase_angle_convention() {
        assert_eq!(phase_angle(0.0), 180.0);
        assert_eq!(phase_angle(0.5), 0.0);
        assert_eq!(phase_angle(0.25), 270.0);
        assert_eq!(phase_angle(0.75), 90.0);
    }

    #[test]
    fn derived_quantities() {
        assert_eq!(lunar_age_days(180.0), 15);
        assert_eq!(lunar_age_days(0.0), 0);
        assert_eq!(illumination_percent(0.456), 46);
        assert_eq!(lit_side(90.0), LitSide::Right);
        assert_eq!(lit_side(180.0), LitSide::Left);
    }

    #[test]
    fn missing_rise_becomes_not_visible() {
        let set = Utc.with_ymd_and_hms(1990, 3, 21, 14, 7, 0).unwrap();
        let sky = FixedSky {
            phase: 0.5,
            fraction: 1.0,
            times: MoonTimes { rise: None, set: Some(set), always_up: false, always_down: false },
        };
        let result = compute_moon_phase(&sky, utc_midnight(1990, 3, 21), Observer::default()).unwrap();
        assert_eq!(result.moonrise, NOT_VISIBLE);
        assert_eq!(result.moonset, "2:07 PM");
        assert_eq!(result.phase, MoonPhase::FullMoon);
        assert_eq!(result.phase_angle, 0.0);
        assert_eq!(result.description, MoonPhase::FullMoon.description());
    }

    #[test]
    fn rise_set_formatted_in_local_offset() {
        let rise = Utc.with_ymd_and_hms(1990, 3, 21, 23, 30, 0).unwrap();
        let sky = FixedSky {
            phase: 0.1,
            fraction: 0.1,
            times: MoonTimes { rise: Some(rise), set: None, always_up: false, always_down: false },
        };
        let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = eastern.with_ymd_and_hms(1990, 3, 21, 0, 0, 0).unwrap();
        let result = compute_moon_phase(&sky, at, Observer::default()).unwrap();
        assert_eq!(result.moonrise, "6:30 PM");
        assert_eq!(result.moonset, NOT_VISIBLE);
    }

    #[test]
    fn non_finite_phase_is_an_error() {
        let sky = FixedSky { phase: f64::NAN, fraction: 0.5, times: MoonTimes::default() };
        let err = compute_moon_phase(&sky, utc_midnight(1990, 1, 1), Observer::default()).unwrap_err();
        assert!(matches!(err, ChartError::NonFinite { quantity: "phase fraction", .. }));
    }

    #[test]
    fn names_serialize_as_display_text() {
        for phase in MoonPhase::ALL {
            let json = serde_json::to_string(&phase).unwrap();
            assert_eq!(json, format!("\"{}\"", phase.name()));
        }
    }
}
