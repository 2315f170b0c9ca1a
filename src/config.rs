use crate::model::GuildId;
use crate::output::OutputMode;
use crate::Error;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const AUTH_VAR: &str = "MEE6_AUTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Sql,
}

/// Scrape a MEE6 leaderboard.
///
/// Reads the Authorization token from the MEE6_AUTH environment variable (a .env file works too).
#[derive(Debug, Parser)]
#[command(name = "mee6-scrape", version)]
pub struct Args {
    /// Guild (server) ID whose leaderboard to scrape
    pub guild: String,

    /// json prints an XP snapshot, sql writes upserts that add the XP onto existing rows
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,

    /// Output file. Defaults to stdout for json and dump.sql for sql
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Players per page, 0 to leave it up to the API
    #[arg(long, default_value_t = 1000)]
    pub limit: u32,

    /// Include each player's level in the json output
    #[arg(long)]
    pub levels: bool,

    /// Don't send the browser Referer and User-Agent headers
    #[arg(long)]
    pub no_browser_headers: bool,

    /// Base URL of the MEE6 API
    #[arg(long, env = "MEE6_API_URL", default_value = crate::api::DEFAULT_API_URL)]
    pub api_url: String,
}

/// Everything a run needs, checked before the first request goes out
#[derive(Debug, Clone)]
pub struct Config {
    pub auth: String,
    pub guild: GuildId,
    pub api_url: String,
    pub limit: Option<u32>,
    pub browser_headers: bool,
    pub output: OutputMode,
    pub out: Option<PathBuf>,
}

impl Config {
    pub fn new(args: Args, auth: Option<String>) -> Result<Self, Error> {
        let auth = auth
            .filter(|auth| !auth.trim().is_empty())
            .ok_or_else(|| {
                format!(
                    "Missing {}. Set it to the Authorization token from mee6.xyz",
                    AUTH_VAR
                )
            })?;
        let guild = args.guild.parse()?;

        let output = match args.format {
            Format::Json => OutputMode::Json {
                levels: args.levels,
            },
            Format::Sql => {
                if args.levels {
                    log::warn!("--levels has no effect on sql output");
                }
                OutputMode::Sql
            }
        };

        Ok(Self {
            auth,
            guild,
            api_url: args.api_url,
            limit: Some(args.limit).filter(|&limit| limit != 0),
            browser_headers: !args.no_browser_headers,
            output,
            out: args.out,
        })
    }
}
