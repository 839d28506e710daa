use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

/// Classical element of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The twelve tropical signs in zodiac order, Aries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sun sign for a calendar month (1-12) and day (1-31).
    ///
    /// Ranges are inclusive on both ends; Capricorn wraps the new year.
    /// Returns `None` only for a month or day outside the calendar.
    pub fn from_month_day(month: u32, day: u32) -> Option<Sign> {
        if !(1..=31).contains(&day) {
            return None;
        }
        let sign = match (month, day) {
            (3, 21..) | (4, ..=19) => Sign::Aries,
            (4, 20..) | (5, ..=20) => Sign::Taurus,
            (5, 21..) | (6, ..=20) => Sign::Gemini,
            (6, 21..) | (7, ..=22) => Sign::Cancer,
            (7, 23..) | (8, ..=22) => Sign::Leo,
            (8, 23..) | (9, ..=22) => Sign::Virgo,
            (9, 23..) | (10, ..=22) => Sign::Libra,
            (10, 23..) | (11, ..=21) => Sign::Scorpio,
            (11, 22..) | (12, ..=21) => Sign::Sagittarius,
            (12, 22..) | (1, ..=19) => Sign::Capricorn,
            (1, 20..) | (2, ..=18) => Sign::Aquarius,
            (2, 19..) | (3, ..=20) => Sign::Pisces,
            _ => return None,
        };
        Some(sign)
    }

    /// Position in the zodiac, 0 for Aries.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Sign::Aries => "♈",
            Sign::Taurus => "♉",
            Sign::Gemini => "♊",
            Sign::Cancer => "♋",
            Sign::Leo => "♌",
            Sign::Virgo => "♍",
            Sign::Libra => "♎",
            Sign::Scorpio => "♏",
            Sign::Sagittarius => "♐",
            Sign::Capricorn => "♑",
            Sign::Aquarius => "♒",
            Sign::Pisces => "♓",
        }
    }

    pub fn element(self) -> Element {
        match self {
            Sign::Aries | Sign::Leo | Sign::Sagittarius => Element::Fire,
            Sign::Taurus | Sign::Virgo | Sign::Capricorn => Element::Earth,
            Sign::Gemini | Sign::Libra | Sign::Aquarius => Element::Air,
            Sign::Cancer | Sign::Scorpio | Sign::Pisces => Element::Water,
        }
    }

    /// Sun sign personality text.
    pub fn sun_description(self) -> &'static str {
        match self {
            Sign::Aries => "Aries are known for their energy, courage, and pioneering spirit. As the first sign of the zodiac, they embody new beginnings and possess a bold, competitive nature. Aries individuals are natural leaders who approach life with enthusiasm and directness.",
            Sign::Taurus => "Taurus individuals are known for their reliability, practicality, and love of comfort and luxury. They are grounded, patient, and have a strong connection to the physical world. Taureans value stability and are often determined and persistent in pursuing their goals.",
            Sign::Gemini => "Geminis are curious, adaptable, and intellectually driven. They possess excellent communication skills and enjoy learning about diverse subjects. Their dual nature gives them versatility but can also make them seem inconsistent. Geminis thrive on mental stimulation and social interaction.",
            Sign::Cancer => "Cancers are deeply intuitive, emotional, and caring individuals. They have strong connections to home and family and often act as protectors of those they love. Their sensitivity gives them empathy, but they can also be moody and withdraw into their shells when feeling threatened.",
            Sign::Leo => "Leos are confident, dramatic, and passionate individuals who naturally draw attention. They have big hearts, generous spirits, and love being in the spotlight. Their warmth and creativity make them natural leaders, though they can sometimes struggle with pride and ego.",
            Sign::Virgo => "Virgos are analytical, practical, and detail-oriented. They strive for perfection and have a natural ability to see how things could be improved. Their methodical approach and service-oriented nature make them excellent problem-solvers, though they can be overly critical of themselves and others.",
            Sign::Libra => "Libras seek harmony and balance in all areas of life. They have a strong sense of justice and are natural diplomats and peacemakers. Their appreciation for beauty and charm makes them pleasant companions, though they can sometimes be indecisive due to their desire to see all perspectives.",
            Sign::Scorpio => "Scorpios are intense, passionate, and deeply emotional. They have penetrating minds and powerful intuition that allows them to see beyond surface appearances. Their determination and resourcefulness help them overcome challenges, though their secretive nature can sometimes appear mysterious to others.",
            Sign::Sagittarius => "Sagittarians are optimistic, freedom-loving, and philosophical. They have a thirst for knowledge and new experiences that often leads them to travel and explore. Their honest nature and sense of humor make them enjoyable companions, though they can sometimes be tactless in their straightforwardness.",
            Sign::Capricorn => "Capricorns are ambitious, disciplined, and patient. They have a practical approach to life and are willing to work hard for long-term success. Their responsible nature and wisdom beyond their years make them natural leaders, though they can sometimes be too focused on work at the expense of pleasure.",
            Sign::Aquarius => "Aquarians are innovative, progressive, and humanitarian. They think outside the box and often have ideas ahead of their time. Their intellectual approach and interest in the collective good can inspire others, though they can sometimes appear detached or eccentric in their uniqueness.",
            Sign::Pisces => "Pisceans are intuitive, compassionate, and imaginative. They have a deep connection to the spiritual and emotional realms. Their empathetic nature and creativity make them artistic and understanding friends, though they can sometimes lose themselves in dreams or emotions.",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sun sign with its glyph, element and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZodiacSign {
    pub sign: Sign,
    pub symbol: String,
    pub element: Element,
    pub description: String,
}

impl From<Sign> for ZodiacSign {
    fn from(sign: Sign) -> Self {
        Self {
            sign,
            symbol: sign.symbol().to_string(),
            element: sign.element(),
            description: sign.sun_description().to_string(),
        }
    }
}

/// Sun sign for a date, from its month and day alone.
pub fn compute_zodiac_sign<D: Datelike>(date: &D) -> Result<ZodiacSign> {
    let (month, day) = (date.month(), date.day());
    Sign::from_month_day(month, day)
        .map(ZodiacSign::from)
        .ok_or(ChartError::UnmatchedZodiacDate { month, day })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sun_sign(y: i32, m: u32, d: u32) -> Sign {
        compute_zodiac_sign(&NaiveDate::from_ymd_opt(y, m, d).unwrap())
            .unwrap()
            .sign
    }

    #[test]
    fn boundary_days() {
        assert_eq!(sun_sign(1990, 3, 21), Sign::Aries);
        assert_eq!(sun_sign(1990, 3, 20), Sign::Pisces);
        assert_eq!(sun_sign(1990, 12, 22), Sign::Capricorn);
        assert_eq!(sun_sign(1990, 1, 19), Sign::Capricorn);
        assert_eq!(sun_sign(1990, 1, 20), Sign::Aquarius);
        assert_eq!(sun_sign(1990, 2, 18), Sign::Aquarius);
        assert_eq!(sun_sign(1990, 2, 19), Sign::Pisces);
        assert_eq!(sun_sign(1992, 2, 29), Sign::Pisces);
        assert_eq!(sun_sign(1990, 11, 21), Sign::Scorpio);
        assert_eq!(sun_sign(1990, 11, 22), Sign::Sagittarius);
        assert_eq!(sun_sign(1990, 12, 31), Sign::Capricorn);
    }

    #[test]
    fn every_day_of_a_year_has_one_sign() {
        let mut day = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let mut counts = [0u32; 12];
        while day.year() == 1990 {
            let sign = compute_zodiac_sign(&day).expect("every calendar day matches a range");
            counts[sign.sign.index()] += 1;
            day = day.succ_opt().unwrap();
        }
        assert_eq!(counts.iter().sum::<u32>(), 365);
        assert!(counts.iter().all(|&n| (29..=32).contains(&n)), "{counts:?}");
    }

    #[test]
    fn fall_through_is_an_error() {
        assert_eq!(Sign::from_month_day(13, 1), None);
        assert_eq!(Sign::from_month_day(0, 15), None);
        assert_eq!(Sign::from_month_day(5, 0), None);
        assert_eq!(Sign::from_month_day(5, 32), None);
    }

    #[test]
    fn elements_cycle_fire_earth_air_water() {
        let expected = [Element::Fire, Element::Earth, Element::Air, Element::Water];
        for sign in Sign::ALL {
            assert_eq!(sign.element(), expected[sign.index() % 4]);
            assert_eq!(sign.symbol().chars().count(), 1);
        }
    }

    #[test]
    fn record_carries_static_text() {
        let record = ZodiacSign::from(Sign::Leo);
        assert_eq!(record.symbol, "♌");
        assert_eq!(record.element, Element::Fire);
        assert!(record.description.starts_with("Leos are confident"));
    }
}
