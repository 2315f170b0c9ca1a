use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Player identifier as sent by the leaderboard API. Depending on the endpoint version it's
/// either a JSON string (snowflakes don't fit into a double) or a plain number, and we keep
/// whatever we got so the JSON export looks like the API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Int(u64),
    Str(String),
}

/// One leaderboard participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: PlayerId,
    pub xp: i64,
}

/// Body of a single leaderboard response. Other fields (guild info, role rewards, per-player
/// level and avatar) are ignored.
#[derive(Debug, Deserialize)]
pub struct LeaderboardPage {
    pub players: Vec<Record>,
}

/// Discord guild snowflake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuildId(pub u64);

impl FromStr for GuildId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        s.trim()
            .parse()
            .map(GuildId)
            .map_err(|_| format!("invalid guild id `{}`", s).into())
    }
}

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
