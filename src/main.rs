use std::error::Error;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use lunar_aura::date_utils::parse_date;
use lunar_aura::share::{card_file_name, parse_query, ShareRequest};
use lunar_aura::{CelestialCalculator, CelestialProfile, Config, Observer};

/// Print a lunar birth chart for a date.
#[derive(Debug, Parser)]
#[command(name = "lunar-aura", version, about)]
struct Args {
    /// Birth date as YYYY-MM-DD (defaults to today)
    date: Option<String>,

    /// Name shown in the chart title
    #[arg(short, long)]
    name: Option<String>,

    /// Read date and name from a share link query such as "date=1990-03-21&name=Ana"
    #[arg(long, conflicts_with_all = ["date", "name"])]
    query: Option<String>,

    /// Observer latitude for moonrise/moonset
    #[arg(long, default_value_t = lunar_aura::config::DEFAULT_LATITUDE, allow_hyphen_values = true)]
    lat: f64,

    /// Observer longitude for moonrise/moonset
    #[arg(long, default_value_t = lunar_aura::config::DEFAULT_LONGITUDE, allow_hyphen_values = true)]
    lon: f64,

    /// Local offset from UTC in minutes (e.g. -300 for UTC-5)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    utc_offset: i32,

    /// Print consecutive days starting at the date instead of a single chart
    #[arg(long)]
    days: Option<u32>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Origin used to print a share link
    #[arg(long)]
    origin: Option<String>,
}

fn init_tracing() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .compact()
        .init();
}

fn print_chart(request: &ShareRequest, profile: &CelestialProfile, origin: Option<&str>) {
    let phase = profile.phase;
    let sun = &profile.zodiac_sign;
    let moon = &profile.moon_sign;

    println!("✨ {}", request.title());
    println!("📆 Birth Date: {}", request.display_date());
    println!();
    println!("{} Moon Phase: {}", phase.emoji(), phase);
    println!("   {}", profile.phase_description);
    println!("💡 Illumination: {}%", profile.illumination_percent());
    println!("🌙 Lunar Age: {} days", profile.lunar_age_days());
    println!("🌅 Moonrise: {}", profile.moonrise);
    println!("🌇 Moonset: {}", profile.moonset);
    println!();
    println!("☀️ Sun Sign: {} {} ({})", sun.sign, sun.symbol, sun.element);
    println!("   {}", sun.description);
    println!("🌟 Moon Sign: {} ({})", moon.sign, moon.element);
    println!("   {}", moon.description);
    println!();
    println!("🔮 Birth Moon Phase Meaning:");
    println!("   {}", profile.birth_phase_meaning());
    println!("🏷️ Highlights: {}", join(profile.highlights().iter().map(|c| c.text.as_str())));
    println!("🌑 Phase traits: {}", join(profile.phase_traits().iter().copied()));
    println!("☀️ Sun traits: {}", join(profile.zodiac_traits().iter().copied()));
    println!("🌙 Moon traits: {}", join(profile.moon_sign_traits().iter().copied()));

    if let Some(origin) = origin {
        println!();
        println!("🔗 Share: {}", request.result_url(origin));
        println!("🖼️ Card: {}", card_file_name(request.date));
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

fn print_range(profiles: &[CelestialProfile]) {
    for profile in profiles {
        println!(
            "{}  {} {:<16} {:>3}%  rise {:>11}  set {:>11}  ☀️ {:<11} 🌙 {}",
            profile.date,
            profile.phase.emoji(),
            profile.phase,
            profile.illumination_percent(),
            profile.moonrise,
            profile.moonset,
            profile.zodiac_sign.sign,
            profile.moon_sign.sign,
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let args = Args::parse();

    let request = match &args.query {
        Some(query) => parse_query(query)?,
        None => {
            let date: NaiveDate = match &args.date {
                Some(text) => parse_date(text)?,
                None => Local::now().date_naive(),
            };
            ShareRequest::new(date, args.name.clone())
        }
    };

    let config = Config::new()
        .with_observer(Observer::new(args.lat, args.lon)?)
        .with_utc_offset_minutes(args.utc_offset)?;
    let calculator = CelestialCalculator::new(config);

    if let Some(days) = args.days {
        let profiles = calculator.calculate_date_range(request.date, days)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&profiles)?);
        } else {
            print_range(&profiles);
        }
        return Ok(());
    }

    let profile = calculator.calculate_single_date(request.date)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        print_chart(&request, &profile, args.origin.as_deref());
    }
    Ok(())
}
