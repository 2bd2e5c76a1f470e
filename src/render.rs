use crate::game_log::GameLog;
use chrono::{Local, TimeZone};
use std::io::{self, Write};

pub const DEFAULT_DATE_FORMAT: &str = "%a %-d %b %H:%M";
const GAME_LIST_URL: &str = "https://np.ironhelmet.com/#load_game";

pub fn format_timestamp(timestamp: i64, date_format: &str) -> String {
    match Local.timestamp_millis_opt(timestamp).single() {
        Some(dt) => dt.format(date_format).to_string(),
        None => format!("@{}", timestamp),
    }
}

/// Prints a game log newest first, one numbered block per entry.
pub fn render_log<W: Write>(out: &mut W, log: &GameLog, date_format: &str) -> io::Result<()> {
    writeln!(out, "Game {}", log.game_id())?;

    if log.is_empty() {
        writeln!(out, "  No log entries yet.")?;
        return Ok(());
    }

    for (position, (_, entry)) in log.newest_first().enumerate() {
        writeln!(
            out,
            "[{}] {}  ({})",
            position + 1,
            format_timestamp(entry.timestamp, date_format),
            entry.id.short()
        )?;
        for line in entry.lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}

pub fn render_wrong_context<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "This tool only works on the Neptune's Pride website. Visit {} to select your game.",
        GAME_LIST_URL
    )
}

pub fn render_game_ids<W: Write>(out: &mut W, ids: &[i64]) -> io::Result<()> {
    if ids.is_empty() {
        writeln!(out, "No games have logs yet.")?;
    }
    for id in ids {
        writeln!(out, "{}", id)?;
    }
    Ok(())
}
