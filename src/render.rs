//! Plain-text rendering of session views for the terminal.
//!
//! Table rows look like
//!
//! ```text
//! 2023-11-14T22:13:20.000Z  app.log:1  {"ts":1700000000000,"msg":"a"}
//! ```

use std::io::{self, Write};

use lognav_core::{AddOutcome, EntryRef, Location, Session};

/// Print the visible table, at most `limit` rows.
pub fn render_table(session: &Session, limit: Option<usize>, out: &mut impl Write) -> io::Result<()> {
    let rows = session.visible_entries();
    let shown = limit.unwrap_or(rows.len()).min(rows.len());
    for entry in &rows[..shown] {
        writeln!(
            out,
            "{}  {}:{}  {}",
            entry.timestamp(),
            entry.file_name,
            entry.line_number,
            entry.content
        )?;
    }
    if shown < rows.len() {
        writeln!(out, "… {} more", rows.len() - shown)?;
    }
    Ok(())
}

/// One line per file: stride, point count, and time span of the sampled
/// series.
pub fn render_timeline(session: &Session, out: &mut impl Write) -> io::Result<()> {
    for series in session.series() {
        let mut points = series.entries(session.files());
        let first = points.next();
        let last = points.last().or(first);
        match (first, last) {
            (Some(first), Some(last)) => writeln!(
                out,
                "{}  stride={}  points={}  {} .. {}",
                series.file_name,
                series.stride,
                series.len(),
                first.timestamp(),
                last.timestamp()
            )?,
            _ => writeln!(out, "{}  stride={}  points=0", series.file_name, series.stride)?,
        }
    }
    Ok(())
}

/// Report skipped and failed files of an `add` batch.
pub fn render_outcome(outcome: &AddOutcome, out: &mut impl Write) -> io::Result<()> {
    for name in &outcome.skipped {
        writeln!(out, "skipped {name}: a file with this name is already loaded")?;
    }
    for (name, failure) in &outcome.failed {
        writeln!(out, "failed {name}: {failure}")?;
    }
    if outcome.stats.dropped() > 0 {
        writeln!(
            out,
            "dropped {} record(s): {} unparsable, {} without timestamp",
            outcome.stats.dropped(),
            outcome.stats.unparsable,
            outcome.stats.missing_timestamp
        )?;
    }
    Ok(())
}

pub fn render_location(entry: &EntryRef, location: Option<Location>, out: &mut impl Write) -> io::Result<()> {
    match location {
        None => writeln!(out, "{entry}: not visible"),
        Some(loc) => {
            write!(out, "{entry}: row {} (file row {})", loc.table_row, loc.file_row)?;
            match loc.sample_slot {
                Some(slot) => writeln!(out, ", timeline point {slot}"),
                None => writeln!(out, ", not sampled"),
            }
        }
    }
}
