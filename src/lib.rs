pub mod api;
pub mod config;
pub mod levels;
pub mod model;
pub mod output;
pub mod pages;

pub use config::{Args, Config};
pub use output::OutputMode;

use clap::Parser;
use std::convert::TryFrom;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};

pub type Error = Box<dyn std::error::Error + Send + Sync>;

fn create_file(path: &Path) -> Result<BufWriter<File>, Error> {
    Ok(BufWriter::new(File::create(path).map_err(|e| {
        format!("Can't create {}: {}", path.display(), e)
    })?))
}

/// Write the scraped records according to the configured output mode
pub fn write_output(config: &Config, records: &[model::Record]) -> Result<(), Error> {
    match config.output {
        OutputMode::Json { levels } => match &config.out {
            Some(path) => output::write_json(records, levels, create_file(path)?),
            None => output::write_json(records, levels, std::io::stdout().lock()),
        },
        OutputMode::Sql => {
            let path = config
                .out
                .as_deref()
                .unwrap_or_else(|| Path::new(output::DEFAULT_SQL_PATH));
            output::write_sql(records, config.guild, create_file(path)?)?;
            log::info!("wrote {} upserts to {}", records.len(), path.display());
            Ok(())
        }
    }
}

pub fn run(config: &Config) -> Result<(), Error> {
    let start = Instant::now();
    log::info!("scraping leaderboard of guild {}", config.guild);

    let client = api::Mee6Client::new(config);
    let fetched = pages::fetch_all(&client)?;
    write_output(config, &fetched.records)?;

    // sub-millisecond precision is just noise here
    let elapsed =
        Duration::from_millis(u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX));
    log::info!(
        "fetched {} players in {} requests, took {}",
        fetched.records.len(),
        fetched.requests,
        humantime::format_duration(elapsed)
    );
    Ok(())
}

fn app() -> Result<(), Error> {
    let args = Args::parse();
    let config = Config::new(args, std::env::var(config::AUTH_VAR).ok())?;
    run(&config)
}

pub fn main() {
    // a missing .env is fine, the variables might be set directly
    dotenv::dotenv().ok();
    env_logger::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = app() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
