//! Month-bucketed CSV visit log.
//!
//! One file per calendar month in the store's timezone-resolved stamps,
//! created on first write. The directory itself must already exist; a
//! missing directory is a fatal I/O error, not something the store papers
//! over.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, FixedOffset};

use crate::error::Result;
use crate::store::Visit;

/// Quote a field when it embeds a separator, a quote, or a line break.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// `YYYYMM.csv`, in the calendar month of the (already timezone-resolved)
/// stamp.
fn month_file(stamp: &DateTime<FixedOffset>) -> String {
    format!("{}.csv", stamp.format("%Y%m"))
}

/// Append one `count,timestamp,remote_addr,user_agent,track_id` row.
pub(crate) fn append_row(
    dir: &Path,
    stamp: DateTime<FixedOffset>,
    count: u64,
    visit: &Visit,
) -> Result<()> {
    let path = dir.join(month_file(&stamp));
    let mut out = OpenOptions::new().append(true).create(true).open(path)?;

    let fields = [
        count.to_string(),
        stamp.to_rfc3339(),
        visit.remote_addr.clone(),
        visit.user_agent.clone(),
        visit.track_id.clone(),
    ];
    let row = fields
        .iter()
        .map(|f| csv_escape(f))
        .collect::<Vec<_>>()
        .join(",");
    writeln!(out, "{row}")?;
    Ok(())
}
