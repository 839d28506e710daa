//! Personality traits, birth-phase meanings and highlight chips.
//!
//! One canonical copy of the descriptive tables, read-only.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::moon_phase::MoonPhase;
use crate::profile::CelestialProfile;
use crate::zodiac::{Element, Sign};

/// Colour family a renderer should use for a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Purple,
    Blue,
    Green,
    Yellow,
    Pink,
    Orange,
    Red,
    Indigo,
    Rose,
    Emerald,
    Sky,
}

impl Tone {
    pub fn for_element(element: Element) -> Tone {
        match element {
            Element::Fire => Tone::Rose,
            Element::Earth => Tone::Emerald,
            Element::Air => Tone::Sky,
            Element::Water => Tone::Indigo,
        }
    }

    pub fn for_phase(phase: MoonPhase) -> Tone {
        match phase {
            MoonPhase::NewMoon => Tone::Purple,
            MoonPhase::WaxingCrescent => Tone::Blue,
            MoonPhase::FirstQuarter => Tone::Green,
            MoonPhase::WaxingGibbous => Tone::Yellow,
            MoonPhase::FullMoon => Tone::Pink,
            MoonPhase::WaningGibbous => Tone::Orange,
            MoonPhase::LastQuarter => Tone::Red,
            MoonPhase::WaningCrescent => Tone::Indigo,
        }
    }
}

/// Where a highlight chip comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChipSource {
    Phase,
    SunSign,
    MoonSign,
}

/// A short labelled trait shown as a chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
    pub text: String,
    pub tone: Tone,
    pub source: ChipSource,
}

impl Characteristic {
    fn new(text: impl Into<String>, tone: Tone, source: ChipSource) -> Self {
        Self { text: text.into(), tone, source }
    }
}

lazy_static! {
    static ref PHASE_TRAITS: HashMap<MoonPhase, [&'static str; 6]> = {
        let mut m = HashMap::new();
        m.insert(MoonPhase::NewMoon, ["Innovative", "Pioneer", "Fresh Start", "Intuitive", "Creative", "Visionary"]);
        m.insert(MoonPhase::WaxingCrescent, ["Growth-oriented", "Persistent", "Nurturing", "Determined", "Patient", "Builder"]);
        m.insert(MoonPhase::FirstQuarter, ["Decisive", "Action-oriented", "Resilient", "Strong-willed", "Courageous", "Leadership"]);
        m.insert(MoonPhase::WaxingGibbous, ["Detail-oriented", "Perfectionist", "Analytical", "Methodical", "Refined", "Quality-focused"]);
        m.insert(MoonPhase::FullMoon, ["Charismatic", "Emotionally aware", "Intuitive", "Social", "Expressive", "Magnetic"]);
        m.insert(MoonPhase::WaningGibbous, ["Teacher", "Communicator", "Wise", "Generous", "Helpful", "Mentor"]);
        m.insert(MoonPhase::LastQuarter, ["Critical thinker", "Transformer", "Adaptable", "Wise", "Reflective", "Release-focused"]);
        m.insert(MoonPhase::WaningCrescent, ["Contemplative", "Spiritual", "Peaceful", "Intuitive", "Wise", "Transitional"]);
        m
    };

    static ref ZODIAC_TRAITS: HashMap<Sign, [&'static str; 6]> = {
        let mut m = HashMap::new();
        m.insert(Sign::Aries, ["Bold", "Energetic", "Leader", "Independent", "Competitive", "Adventurous"]);
        m.insert(Sign::Taurus, ["Reliable", "Patient", "Practical", "Determined", "Sensual", "Stable"]);
        m.insert(Sign::Gemini, ["Curious", "Adaptable", "Social", "Quick-witted", "Versatile", "Communicative"]);
        m.insert(Sign::Cancer, ["Nurturing", "Emotional", "Protective", "Intuitive", "Caring", "Home-loving"]);
        m.insert(Sign::Leo, ["Confident", "Creative", "Generous", "Dramatic", "Loyal", "Leadership"]);
        m.insert(Sign::Virgo, ["Analytical", "Practical", "Helpful", "Detail-oriented", "Organized", "Perfectionist"]);
        m.insert(Sign::Libra, ["Harmonious", "Diplomatic", "Social", "Aesthetic", "Fair", "Charming"]);
        m.insert(Sign::Scorpio, ["Intense", "Passionate", "Mysterious", "Transformative", "Loyal", "Intuitive"]);
        m.insert(Sign::Sagittarius, ["Adventurous", "Optimistic", "Philosophical", "Freedom-loving", "Honest", "Enthusiastic"]);
        m.insert(Sign::Capricorn, ["Ambitious", "Disciplined", "Practical", "Responsible", "Patient", "Traditional"]);
        m.insert(Sign::Aquarius, ["Independent", "Innovative", "Humanitarian", "Unique", "Progressive", "Intellectual"]);
        m.insert(Sign::Pisces, ["Compassionate", "Artistic", "Intuitive", "Dreamy", "Sensitive", "Spiritual"]);
        m
    };

    static ref MOON_SIGN_TRAITS: HashMap<Sign, [&'static str; 6]> = {
        let mut m = HashMap::new();
        m.insert(Sign::Aries, ["Impulsive emotions", "Quick reactions", "Passionate", "Independent feelings", "Energetic", "Direct"]);
        m.insert(Sign::Taurus, ["Stable emotions", "Comfort-seeking", "Sensual", "Possessive", "Patient", "Practical feelings"]);
        m.insert(Sign::Gemini, ["Changeable moods", "Curious emotions", "Social needs", "Mental stimulation", "Communicative", "Restless"]);
        m.insert(Sign::Cancer, ["Deep emotions", "Nurturing instincts", "Protective", "Home-oriented", "Sensitive", "Caring"]);
        m.insert(Sign::Leo, ["Dramatic emotions", "Need for attention", "Generous heart", "Creative expression", "Proud", "Warm"]);
        m.insert(Sign::Virgo, ["Analytical emotions", "Need for order", "Helpful nature", "Critical", "Practical", "Service-oriented"]);
        m.insert(Sign::Libra, ["Harmonious emotions", "Need for balance", "Relationship-focused", "Aesthetic", "Diplomatic", "Social"]);
        m.insert(Sign::Scorpio, ["Intense emotions", "Secretive", "Transformative", "Passionate", "Mysterious", "Deep feelings"]);
        m.insert(Sign::Sagittarius, ["Optimistic emotions", "Freedom-loving", "Adventurous spirit", "Philosophical", "Honest", "Restless"]);
        m.insert(Sign::Capricorn, ["Controlled emotions", "Ambitious feelings", "Practical", "Reserved", "Disciplined", "Traditional"]);
        m.insert(Sign::Aquarius, ["Detached emotions", "Unique feelings", "Independent", "Humanitarian", "Progressive", "Intellectual"]);
        m.insert(Sign::Pisces, ["Intuitive emotions", "Compassionate", "Dreamy", "Sensitive", "Spiritual", "Empathetic"]);
        m
    };

    // Highlight chips: three per phase, two per sun sign.
    static ref PHASE_HIGHLIGHTS: HashMap<MoonPhase, [&'static str; 3]> = {
        let mut m = HashMap::new();
        m.insert(MoonPhase::NewMoon, ["Pioneering Spirit", "Fresh Starts", "Creative"]);
        m.insert(MoonPhase::WaxingCrescent, ["Growth-Oriented", "Determined", "Nurturing"]);
        m.insert(MoonPhase::FirstQuarter, ["Action-Driven", "Decisive", "Resilient"]);
        m.insert(MoonPhase::WaxingGibbous, ["Detail-Focused", "Analytical", "Perfectionist"]);
        m.insert(MoonPhase::FullMoon, ["Intuitive", "Emotionally Aware", "Charismatic"]);
        m.insert(MoonPhase::WaningGibbous, ["Knowledge-Sharing", "Communicative", "Teacher"]);
        m.insert(MoonPhase::LastQuarter, ["Transitional", "Critical Thinker", "Adaptable"]);
        m.insert(MoonPhase::WaningCrescent, ["Contemplative", "Spiritual", "Reflective"]);
        m
    };

    static ref ZODIAC_HIGHLIGHTS: HashMap<Sign, [&'static str; 2]> = {
        let mut m = HashMap::new();
        m.insert(Sign::Aries, ["Courageous", "Energetic"]);
        m.insert(Sign::Taurus, ["Reliable", "Patient"]);
        m.insert(Sign::Gemini, ["Adaptable", "Curious"]);
        m.insert(Sign::Cancer, ["Nurturing", "Intuitive"]);
        m.insert(Sign::Leo, ["Confident", "Creative"]);
        m.insert(Sign::Virgo, ["Analytical", "Practical"]);
        m.insert(Sign::Libra, ["Diplomatic", "Harmonious"]);
        m.insert(Sign::Scorpio, ["Intense", "Determined"]);
        m.insert(Sign::Sagittarius, ["Adventurous", "Optimistic"]);
        m.insert(Sign::Capricorn, ["Ambitious", "Disciplined"]);
        m.insert(Sign::Aquarius, ["Innovative", "Independent"]);
        m.insert(Sign::Pisces, ["Compassionate", "Imaginative"]);
        m
    };
}

/// Six personality traits for someone born under `phase`.
pub fn phase_traits(phase: MoonPhase) -> &'static [&'static str] {
    PHASE_TRAITS.get(&phase).map(|t| &t[..]).unwrap_or(&[])
}

/// Six personality traits for a sun sign.
pub fn zodiac_traits(sign: Sign) -> &'static [&'static str] {
    ZODIAC_TRAITS.get(&sign).map(|t| &t[..]).unwrap_or(&[])
}

/// Six emotional traits for a moon sign.
pub fn moon_sign_traits(sign: Sign) -> &'static [&'static str] {
    MOON_SIGN_TRAITS.get(&sign).map(|t| &t[..]).unwrap_or(&[])
}

/// What being born under `phase` is said to mean.
pub fn birth_phase_meaning(phase: MoonPhase) -> &'static str {
    match phase {
        MoonPhase::NewMoon => "Being born during a new moon phase suggests a natural affinity for new beginnings and fresh starts. You possess a pioneering spirit and the ability to initiate projects with enthusiasm. Your intuitive creativity is heightened during new cycles, making you excellent at planting seeds for future growth.",
        MoonPhase::WaxingCrescent => "Being born during a waxing crescent moon phase suggests you're a naturally growth-oriented person with a gift for building momentum. You excel at nurturing ideas from their earliest stages and have a persistent, determined nature that helps you overcome initial obstacles.",
        MoonPhase::FirstQuarter => "Being born during a first quarter moon phase suggests you have a natural ability to overcome obstacles and push through challenges. Your decisiveness and action-oriented nature helps you make progress when others might hesitate, making you a natural problem-solver.",
        MoonPhase::WaxingGibbous => "Being born during a waxing gibbous moon phase suggests you possess a detail-oriented and perfectionistic nature. You excel at refining and improving existing structures and have strong analytical abilities that help you perfect your craft.",
        MoonPhase::FullMoon => "Being born during a full moon phase suggests you have heightened emotional awareness and intuitive abilities. You possess strong interpersonal skills and a natural charisma that draws others to you, making you excellent at connecting with people on a deep level.",
        MoonPhase::WaningGibbous => "Being born during a waning gibbous moon phase suggests you have natural teaching abilities and a gift for communication. You excel at sharing knowledge and helping others understand complex concepts, making you a natural mentor and guide.",
        MoonPhase::LastQuarter => "Being born during a last quarter moon phase suggests you possess strong critical thinking skills and the ability to release what no longer serves you. You're naturally adept at transitions and letting go, helping you navigate life's changes with wisdom.",
        MoonPhase::WaningCrescent => "Being born during a waning crescent moon phase suggests you have a contemplative nature and deep spiritual insights. You're comfortable with endings and the quiet space before new beginnings, making you naturally wise and reflective.",
    }
}

/// Highlight chips for a profile, in display order: sun element, three
/// phase chips, two sun sign chips, moon element.
pub fn highlights(profile: &CelestialProfile) -> Vec<Characteristic> {
    let sun = &profile.zodiac_sign;
    let moon = &profile.moon_sign;
    let phase_tone = Tone::for_phase(profile.phase);
    let sun_tone = Tone::for_element(sun.element);

    let mut chips = Vec::with_capacity(7);
    chips.push(Characteristic::new(
        format!("{} Element", sun.element),
        sun_tone,
        ChipSource::SunSign,
    ));
    if let Some(texts) = PHASE_HIGHLIGHTS.get(&profile.phase) {
        chips.extend(texts.iter().map(|t| Characteristic::new(*t, phase_tone, ChipSource::Phase)));
    }
    if let Some(texts) = ZODIAC_HIGHLIGHTS.get(&sun.sign) {
        chips.extend(texts.iter().map(|t| Characteristic::new(*t, sun_tone, ChipSource::SunSign)));
    }
    chips.push(Characteristic::new(
        format!("{} Moon", moon.element),
        Tone::for_element(moon.element),
        ChipSource::MoonSign,
    ));
    chips
}

/// Highlight chips from one source only, e.g. for a per-tab view.
pub fn highlights_from(profile: &CelestialProfile, source: ChipSource) -> Vec<Characteristic> {
    highlights(profile)
        .into_iter()
        .filter(|chip| chip.source == source)
        .collect()
}
