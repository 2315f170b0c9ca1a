//! Writing the scraped leaderboard out, either as a JSON snapshot or as SQL upserts

use crate::levels::LevelInfo;
use crate::model::{GuildId, PlayerId, Record};
use crate::Error;

use serde::Serialize;
use std::io::Write;

pub const DEFAULT_SQL_PATH: &str = "dump.sql";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Absolute XP values as a JSON array, optionally with the computed level of each player
    Json { levels: bool },
    /// `INSERT ... ON CONFLICT` statements that add the scraped XP onto existing rows
    Sql,
}

#[derive(Serialize)]
struct LeveledRecord<'a> {
    id: &'a PlayerId,
    xp: i64,
    level: u64,
}

pub fn write_json(
    records: &[Record],
    with_levels: bool,
    mut writer: impl Write,
) -> Result<(), Error> {
    if with_levels {
        let leveled = records
            .iter()
            .map(|r| LeveledRecord {
                id: &r.id,
                xp: r.xp,
                level: LevelInfo::new(r.xp.max(0) as u64).level(),
            })
            .collect::<Vec<_>>();
        serde_json::to_writer(&mut writer, &leveled)?;
    } else {
        serde_json::to_writer(&mut writer, records)?;
    }
    writer.flush()?;
    Ok(())
}

fn sql_literal(id: &PlayerId) -> String {
    match id {
        PlayerId::Int(id) => id.to_string(),
        PlayerId::Str(id) => format!("'{}'", id.replace('\'', "''")),
    }
}

/// A single upsert. On conflict the XP is added to the stored value, not replaced.
pub fn upsert_statement(record: &Record, guild: GuildId) -> String {
    format!(
        "INSERT INTO levels (id, xp, guild) VALUES ({}, {}, {}) \
         ON CONFLICT (id, guild) DO UPDATE SET xp = EXCLUDED.xp + levels.xp;",
        sql_literal(&record.id),
        record.xp,
        guild
    )
}

pub fn write_sql(records: &[Record], guild: GuildId, mut writer: impl Write) -> Result<(), Error> {
    for record in records {
        writeln!(writer, "{}", upsert_statement(record, guild))?;
    }
    writer.flush()?;
    Ok(())
}
