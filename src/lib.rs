//! Lunar birth charts.
//!
//! Maps a birth date to the Moon's phase and illumination, a tropical sun
//! sign and an approximate moon sign, each with descriptive text and trait
//! lists. Start from [`CelestialCalculator`]:
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use lunar_aura::{CelestialCalculator, Config};
//!
//! let calculator = CelestialCalculator::new(Config::default());
//! let birthday = NaiveDate::from_ymd_opt(1990, 3, 21).unwrap();
//! let profile = calculator.calculate_single_date(birthday).unwrap();
//! println!("{} / {} / {}", profile.phase, profile.zodiac_sign.sign, profile.moon_sign.sign);
//! ```

pub mod astronomical;
pub mod characteristics;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod moon_phase;
pub mod moon_sign;
pub mod profile;
pub mod share;
pub mod zodiac;

pub use astronomical::{AstronomyProvider, MoonIllumination, MoonPosition, MoonTimes, SunCalcProvider};
pub use characteristics::{Characteristic, ChipSource, Tone};
pub use config::{Config, Observer};
pub use error::{ChartError, Result};
pub use moon_phase::{compute_moon_phase, LitSide, MoonPhase, MoonPhaseResult, NOT_VISIBLE};
pub use moon_sign::{compute_moon_sign, MoonSign};
pub use profile::{CelestialCalculator, CelestialProfile};
pub use share::{parse_query, ShareRequest};
pub use zodiac::{compute_zodiac_sign, Element, Sign, ZodiacSign};
