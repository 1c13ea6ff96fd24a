//! Local calendar-day helpers
//!
//! Every date crosses module boundaries as a `YYYY-MM-DD` string. Parsing splits
//! the string into calendar components instead of going through a general date
//! parser, so a stored day never drifts across a timezone boundary.

use chrono::{Datelike, Days, NaiveDate};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// String <-> Date
// ---------------------------------------------------------------------------

/// Format a calendar day as zero-padded `YYYY-MM-DD`
pub fn to_local_date_string(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// Parse `YYYY-MM-DD` back into a calendar day.
///
/// Returns `None` when a component is missing, non-numeric or zero, or when the
/// components don't name a real day. Anything after the third component is ignored.
pub fn parse_local_date_string(s: &str) -> Option<NaiveDate> {
  let mut parts = s.split('-');
  let year = component(parts.next())?;
  let month = component(parts.next())?;
  let day = component(parts.next())?;

  NaiveDate::from_ymd_opt(
    i32::try_from(year).ok()?,
    u32::try_from(month).ok()?,
    u32::try_from(day).ok()?,
  )
}

fn component(part: Option<&str>) -> Option<i64> {
  part?.trim().parse::<i64>().ok().filter(|n| *n != 0)
}

// ---------------------------------------------------------------------------
// Week anchoring
// ---------------------------------------------------------------------------

/// The Monday on or before `date`
pub fn monday_date(date: NaiveDate) -> NaiveDate {
  // Sunday-first weekday index w maps to (w + 6) % 7 days since Monday
  let offset = u64::from(date.weekday().num_days_from_monday());
  date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// The Monday anchoring `date`'s week, as a date string
pub fn monday_of(date: NaiveDate) -> String {
  to_local_date_string(monday_date(date))
}

/// Move `offset_weeks` weeks from `week_start` and re-anchor on that week's Monday.
/// An unparseable `week_start` counts from `today`. An offset past the calendar's
/// range stays on the starting week.
pub fn shift_week(week_start: &str, offset_weeks: i64, today: NaiveDate) -> String {
  let base = parse_local_date_string(week_start).unwrap_or(today);
  let shifted = offset_weeks
    .checked_mul(7)
    .and_then(chrono::Duration::try_days)
    .and_then(|delta| base.checked_add_signed(delta))
    .unwrap_or(base);
  monday_of(shifted)
}

// ---------------------------------------------------------------------------
// Input coercion & display
// ---------------------------------------------------------------------------

/// Coerce raw metric input to a number, or `None` when there is nothing usable.
/// Blank, unparseable and non-finite input all collapse to `None`, never `0`.
pub fn parse_nullable_number(value: &str) -> Option<f64> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return None;
  }
  trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Human label for a log date relative to `today`: "Today", "Yesterday", or "Wed, 12 Nov"
pub fn format_display_date(date_str: &str, today: NaiveDate) -> String {
  let Some(date) = parse_local_date_string(date_str) else {
    return date_str.to_string();
  };

  if date == today {
    return "Today".to_string();
  }
  if today.pred_opt() == Some(date) {
    return "Yesterday".to_string();
  }

  date.format("%a, %-d %b").to_string()
}
