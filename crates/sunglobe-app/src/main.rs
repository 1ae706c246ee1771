//! The `sunglobe` command-line front end.

use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use sunglobe_app::{AppDirs, AppError, GlobeSession, country_source};
use sunglobe_config::{CliArgs, Config};
use sunglobe_countries::{CountryCatalog, find_by_name, gmt_label, local_time_label};
use sunglobe_solar::{
    Clock, FixedClock, SystemClock, equation_of_time_minutes, position::year_fraction,
    sun_direction,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "sunglobe",
    about = "Day/night globe: sun position, terminator shading, and country lookup"
)]
struct Cli {
    #[command(flatten)]
    args: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sub-solar point and the material uniforms.
    Sun {
        /// Instant to evaluate (RFC 3339); defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Globe yaw in radians.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        azimuth: f64,
    },
    /// Day/night factor at a surface point.
    Shade {
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// Instant to evaluate (RFC 3339); defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Search countries by name.
    Search {
        /// Case-insensitive substring of the country name.
        term: String,
        /// Bypass the cached list.
        #[arg(long)]
        refresh: bool,
    },
    /// Fly to a country and pin it.
    Select {
        /// Exact common name of the country.
        name: String,
        /// Instant to evaluate (RFC 3339); defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Keep the sun uniforms current, refreshing on the configured interval.
    Watch {
        /// Stop after this many periodic refreshes.
        #[arg(long)]
        ticks: Option<u64>,
    },
}

/// Wall clock, or a frozen instant when `--at` is given.
enum AppClock {
    System(SystemClock),
    Fixed(FixedClock),
}

impl AppClock {
    fn from_arg(at: Option<DateTime<Utc>>) -> Self {
        match at {
            Some(instant) => AppClock::Fixed(FixedClock::new(instant)),
            None => AppClock::System(SystemClock),
        }
    }
}

impl Clock for AppClock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            AppClock::System(clock) => clock.now(),
            AppClock::Fixed(clock) => clock.now(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let dirs = match AppDirs::resolve(cli.args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve config directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.args);

    if let Err(e) = dirs.create() {
        eprintln!("{e}");
    }
    sunglobe_log::init_logging(Some(&dirs.log_dir), Some(&config));

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<(), AppError> {
    match command {
        Command::Sun { at, azimuth } => {
            let mut session = GlobeSession::new(config, AppClock::from_arg(at));
            session.start();
            let state = session.rotate(azimuth);
            let now = session.clock().now();
            let sun = session.sun_position();

            println!("instant:          {now}");
            println!("sub-solar point:  {sun}");
            println!(
                "equation of time: {:+.2} min",
                equation_of_time_minutes(year_fraction(now))
            );
            println!("sun angle:        {:.6} rad", state.sun_angle);
            println!("sun latitude:     {:.4} deg", state.sun_latitude);
        }
        Command::Shade { lat, lng, at } => {
            let mut session = GlobeSession::new(config, AppClock::from_arg(at));
            session.start();
            let normal = sun_direction(lat, lng.to_radians());
            let factor = session.material().illumination_at(normal);
            let phase = match factor {
                f if f <= 0.0 => "night",
                f if f >= 1.0 => "day",
                _ => "twilight",
            };
            println!("{lat:.3}, {lng:.3}: {factor:.3} ({phase})");
        }
        Command::Search { term, refresh } => {
            let mut catalog = CountryCatalog::new(country_source(config));
            catalog.get(refresh)?;
            let now = Utc::now();
            let matches = catalog.search(&term);
            if matches.is_empty() {
                println!("No countries found");
            }
            for country in matches {
                let tz = country.primary_timezone();
                println!(
                    "{:<40} {:<10} {}",
                    country.name.common,
                    gmt_label(tz),
                    local_time_label(tz, now)
                );
            }
        }
        Command::Select { name, at } => {
            let mut catalog = CountryCatalog::new(country_source(config));
            let countries = catalog.get(false)?;
            let country =
                find_by_name(countries, &name).ok_or_else(|| AppError::UnknownCountry(name))?;

            let mut session = GlobeSession::new(config, AppClock::from_arg(at));
            session.start();
            let pov = session.select(country);
            let normal = sun_direction(country.latitude(), country.longitude().to_radians());
            let factor = session.material().illumination_at(normal);

            println!("{} ({})", country.name.common, country.name.official);
            println!(
                "fly to:   {:.2}, {:.2} at altitude {} over {} ms",
                pov.latitude,
                pov.longitude,
                pov.altitude,
                pov.duration.as_millis()
            );
            println!("daylight: {factor:.3}");
            println!(
                "local:    {}",
                local_time_label(country.primary_timezone(), session.clock().now())
            );
        }
        Command::Watch { ticks } => {
            let mut session = GlobeSession::new(config, AppClock::System(SystemClock));
            session.start();
            let mut refreshes = 0u64;
            while ticks.is_none_or(|limit| refreshes < limit) {
                std::thread::sleep(session.time_until_tick());
                if let Some(state) = session.tick() {
                    refreshes += 1;
                    info!(
                        sun_angle = state.sun_angle,
                        sun_latitude = state.sun_latitude,
                        revision = session.material().revision(),
                        "sun uniforms refreshed"
                    );
                }
            }
        }
    }
    Ok(())
}
