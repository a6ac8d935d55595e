//! shelter-rank - rank shelters and cooling centres for a user
//!
//! Loads a TOML config and a JSON location dataset, scores every location
//! for the given user and day, and prints the ranking to stdout. Logs go to
//! stderr so the output can be piped.
//!
//! Usage:
//!   shelter-rank --lat 43.6532 --lon -79.3832 --restriction male-only
//!   shelter-rank --config config/dev.toml --kind shelters --date 2018-07-04 --format json

use anyhow::Context;
use clap::Parser;
use shelter_finder::domain::{User, UserRestriction};
use shelter_finder::infra::{calendar, Config, OutputFormat};
use shelter_finder::io::{load_locations, render};
use shelter_finder::services::{ranked, score_all, KindFilter, Scorer};
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Rank nearby emergency shelters and cooling centres
#[derive(Parser, Debug)]
#[command(name = "shelter-rank", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to CONFIG_FILE, then config/dev.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Location dataset (JSON); overrides the config file
    #[arg(short, long)]
    data: Option<String>,

    /// User latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// User longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// male-only, female-only or any
    #[arg(short, long, default_value = "any")]
    restriction: UserRestriction,

    /// Date to score for (YYYY-MM-DD, default today)
    #[arg(long)]
    date: Option<String>,

    /// shelters, other or all
    #[arg(short, long)]
    kind: Option<KindFilter>,

    /// Maximum rows (0 = all)
    #[arg(short, long)]
    limit: Option<usize>,

    /// table or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Also list shelters rejected by the eligibility gate
    #[arg(long)]
    include_ineligible: bool,
}

fn main() -> anyhow::Result<()> {
    // Default: INFO, use RUST_LOG=debug for per-pass details
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(git_hash = %env!("GIT_HASH"), "shelter-rank starting");

    let config_path = Config::resolve_config_path(args.config.as_deref());
    let config = Config::load_from_path(&config_path);

    let day = match &args.date {
        Some(date) => calendar::day_index_for(calendar::parse_date(date)?),
        None => calendar::today(),
    };

    let mut options = config.ranking_options();
    if let Some(kind) = args.kind {
        options.kind = kind;
    }
    if let Some(limit) = args.limit {
        options.limit = limit;
    }
    options.include_ineligible |= args.include_ineligible;
    let format = args.format.unwrap_or_else(|| config.output_format());
    let data_file = args.data.as_deref().unwrap_or_else(|| config.data_file());

    info!(
        config_file = %config.config_file(),
        data_file = %data_file,
        day = %day,
        restriction = %args.restriction.as_str(),
        kind = %options.kind.as_str(),
        limit = %options.limit,
        "config_loaded"
    );

    let mut locations = load_locations(data_file)?;
    let user = User::new(args.restriction, args.lat, args.lon);
    let scorer = Scorer::new(config.scoring_params());

    let pass = score_all(&scorer, &mut locations, &user, day);
    let entries = ranked(&locations, &pass, &options);
    info!(
        scored = %pass.scored_count(),
        ineligible = %pass.ineligible_count(),
        failed = %pass.failures().count(),
        ranked = %entries.len(),
        "ranking_ready"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&entries, format, &mut out).context("Failed to write ranking")?;

    Ok(())
}
