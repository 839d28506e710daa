use std::time::Instant;

use chrono::{DateTime, Days, FixedOffset, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::astronomical::{AstronomyProvider, SunCalcProvider};
use crate::characteristics::{self, Characteristic};
use crate::config::Config;
use crate::date_utils::local_midnight;
use crate::error::{ChartError, Result};
use crate::moon_phase::{self, compute_moon_phase, LitSide, MoonPhase, MoonPhaseResult};
use crate::moon_sign::{compute_moon_sign, MoonSign};
use crate::zodiac::{compute_zodiac_sign, ZodiacSign};

/// Everything the presentation layer gets for one birth date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CelestialProfile {
    pub date: NaiveDate,
    pub phase: MoonPhase,
    pub illumination: f64,
    pub phase_angle: f64,
    pub phase_description: String,
    pub moonrise: String,
    pub moonset: String,
    pub zodiac_sign: ZodiacSign,
    pub moon_sign: MoonSign,
}

impl CelestialProfile {
    fn assemble(date: NaiveDate, moon: MoonPhaseResult, zodiac_sign: ZodiacSign, moon_sign: MoonSign) -> Self {
        Self {
            date,
            phase: moon.phase,
            illumination: moon.illumination,
            phase_angle: moon.phase_angle,
            phase_description: moon.description,
            moonrise: moon.moonrise,
            moonset: moon.moonset,
            zodiac_sign,
            moon_sign,
        }
    }

    pub fn lunar_age_days(&self) -> i64 {
        moon_phase::lunar_age_days(self.phase_angle)
    }

    pub fn illumination_percent(&self) -> i64 {
        moon_phase::illumination_percent(self.illumination)
    }

    pub fn lit_side(&self) -> LitSide {
        moon_phase::lit_side(self.phase_angle)
    }

    pub fn birth_phase_meaning(&self) -> &'static str {
        characteristics::birth_phase_meaning(self.phase)
    }

    pub fn phase_traits(&self) -> &'static [&'static str] {
        characteristics::phase_traits(self.phase)
    }

    pub fn zodiac_traits(&self) -> &'static [&'static str] {
        characteristics::zodiac_traits(self.zodiac_sign.sign)
    }

    pub fn moon_sign_traits(&self) -> &'static [&'static str] {
        characteristics::moon_sign_traits(self.moon_sign.sign)
    }

    pub fn highlights(&self) -> Vec<Characteristic> {
        characteristics::highlights(self)
    }
}

/// Computes celestial profiles against an astronomy provider.
///
/// Holds no mutable state; every call is a pure function of its date, the
/// config and the provider.
#[derive(Debug, Clone)]
pub struct CelestialCalculator<P = SunCalcProvider> {
    provider: P,
    config: Config,
}

impl CelestialCalculator<SunCalcProvider> {
    pub fn new(config: Config) -> Self {
        Self::with_provider(SunCalcProvider::new(), config)
    }
}

impl Default for CelestialCalculator<SunCalcProvider> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<P: AstronomyProvider> CelestialCalculator<P> {
    pub fn with_provider(provider: P, config: Config) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Moon phase at `at`, with rise/set seen from the configured observer.
    pub fn compute_moon_phase(&self, at: DateTime<FixedOffset>) -> Result<MoonPhaseResult> {
        compute_moon_phase(&self.provider, at, self.config.observer)
    }

    pub fn compute_zodiac_sign(&self, date: NaiveDate) -> Result<ZodiacSign> {
        compute_zodiac_sign(&date)
    }

    pub fn compute_moon_sign(&self, at: DateTime<FixedOffset>) -> Result<MoonSign> {
        compute_moon_sign(&self.provider, at, self.config.moon_sign_reference)
    }

    /// Profile for an explicit instant; the calendar date is taken in the
    /// instant's own offset.
    pub fn calculate_at(&self, at: DateTime<FixedOffset>) -> Result<CelestialProfile> {
        let date = at.date_naive();
        let moon = self.compute_moon_phase(at)?;
        let zodiac = self.compute_zodiac_sign(date)?;
        let moon_sign = self.compute_moon_sign(at)?;
        Ok(CelestialProfile::assemble(date, moon, zodiac, moon_sign))
    }

    /// Profile for a birth date, evaluated at local midnight in the
    /// configured offset.
    pub fn calculate_single_date(&self, date: NaiveDate) -> Result<CelestialProfile> {
        let start = Instant::now();
        let at = local_midnight(date, self.config.utc_offset)?;
        let profile = self.calculate_at(at)?;
        debug!(
            target: "celestial_calculation",
            %date,
            phase = %profile.phase,
            sun = %profile.zodiac_sign.sign,
            moon = %profile.moon_sign.sign,
            "Single date calculation took {}µs",
            start.elapsed().as_micros()
        );
        Ok(profile)
    }

    /// Profiles for `count` consecutive days starting at `start`, computed in
    /// parallel and returned in date order.
    pub fn calculate_date_range(&self, start: NaiveDate, count: u32) -> Result<Vec<CelestialProfile>> {
        let timer = Instant::now();

        let results = (0..count)
            .into_par_iter()
            .map(|offset| {
                let date = start
                    .checked_add_days(Days::new(u64::from(offset)))
                    .ok_or_else(|| ChartError::InvalidDate(format!("{start} + {offset} days")))?;
                self.calculate_single_date(date)
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            target: "celestial_calculation",
            "Calculated {} dates in {}µs",
            count,
            timer.elapsed().as_micros()
        );

        Ok(results)
    }
}
