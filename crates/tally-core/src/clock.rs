//! Timezone resolution for timestamps and log-file naming.
//!
//! The configured timezone decides both the offset written into log rows
//! and which `YYYYMM.csv` bucket a visit lands in.

use std::str::FromStr;

use chrono::offset::Offset;
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

use crate::error::{CounterError, Result};

/// Parse an IANA timezone name. Missing or empty input means UTC.
pub fn parse_timezone(value: Option<&str>) -> Result<Tz> {
    let Some(raw) = value else {
        return Ok(chrono_tz::UTC);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(chrono_tz::UTC);
    }
    Tz::from_str(trimmed)
        .map_err(|_| CounterError::Config(format!("unknown timezone: {trimmed}")))
}

/// Current instant in `tz`, flattened to a fixed offset for formatting.
pub fn now_in(tz: Tz) -> DateTime<FixedOffset> {
    to_fixed_offset(Utc::now(), tz)
}

/// Shift a UTC instant into `tz` and pin the offset that was in effect.
pub fn to_fixed_offset(utc: DateTime<Utc>, tz: Tz) -> DateTime<FixedOffset> {
    let local = utc.with_timezone(&tz);
    let offset = local.offset().fix();
    local.with_timezone(&offset)
}
