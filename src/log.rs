//! Log normalizer and journal collection operations
//!
//! Every record entering the journal (from storage or from a shell) passes
//! through `normalize_log_entry`, which is total: missing or mistyped fields get
//! defaults and metrics collapse to "number or nothing". The collection helpers
//! below work on a caller-owned `Vec<LogEntry>`, newest-created first.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

use crate::dates::{parse_local_date_string, parse_nullable_number, to_local_date_string};
use crate::models::{LogEntry, PlanState, PlannedSource, RawLogEntry};
use crate::resolver::resolve_planned_session;

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Fresh opaque identifier for a new entry
pub fn new_entry_id() -> String {
  Uuid::new_v4().to_string()
}

/// Build a canonical entry from an untrusted record.
///
/// An `id` is only generated when the record has none, so normalising an
/// already-normalised entry keeps its identity.
pub fn normalize_log_entry(raw: RawLogEntry) -> LogEntry {
  LogEntry {
    id: raw.id.and_then(id_text).unwrap_or_else(new_entry_id),
    date: text(raw.date),
    planned: text(raw.planned),
    actual: text(raw.actual),
    notes: text(raw.notes),
    rpe: metric(raw.rpe),
    energy: metric(raw.energy),
    sleep: metric(raw.sleep),
    phase: text(raw.phase),
    planned_source: raw.planned_source.and_then(planned_source),
  }
}

/// An entry with every field at its default and a fresh id
pub fn empty_entry() -> LogEntry {
  normalize_log_entry(RawLogEntry::default())
}

fn id_text(value: Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

fn text(value: Option<Value>) -> String {
  match value {
    Some(Value::String(s)) => s,
    _ => String::new(),
  }
}

fn metric(value: Option<Value>) -> Option<f64> {
  match value {
    Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
    _ => None,
  }
}

fn planned_source(value: Value) -> Option<PlannedSource> {
  match value.as_str()? {
    "plan" => Some(PlannedSource::Plan),
    "manual" => Some(PlannedSource::Manual),
    _ => None,
  }
}

// ---------------------------------------------------------------------------
// Collection operations
// ---------------------------------------------------------------------------

/// Create an entry for `selected_date` (or `today` when none is selected),
/// pre-filled from the plan when it has a suggestion, and prepend it.
pub fn create_entry(
  logs: &mut Vec<LogEntry>,
  selected_date: Option<&str>,
  today: NaiveDate,
  plan: Option<&PlanState>,
) -> LogEntry {
  let mut entry = empty_entry();
  entry.date = match selected_date {
    Some(date) if !date.is_empty() => date.to_string(),
    _ => to_local_date_string(today),
  };

  if let Some(suggestion) = plan.and_then(|p| resolve_planned_session(&entry.date, p)) {
    entry.planned = suggestion;
    entry.planned_source = Some(PlannedSource::Plan);
  }

  logs.insert(0, entry.clone());
  entry
}

/// Field-level edit of one entry. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogPatch {
  pub date: Option<String>,
  pub planned: Option<String>,
  pub actual: Option<String>,
  pub notes: Option<String>,
  /// `Some(None)` clears the value
  #[serde(deserialize_with = "present")]
  pub rpe: Option<Option<f64>>,
  #[serde(deserialize_with = "present")]
  pub energy: Option<Option<f64>>,
  #[serde(deserialize_with = "present")]
  pub sleep: Option<Option<f64>>,
  pub phase: Option<String>,
  #[serde(deserialize_with = "present")]
  pub planned_source: Option<Option<PlannedSource>>,
}

// A field that is present (even as null) becomes `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

impl LogPatch {
  pub fn apply_to(self, entry: &mut LogEntry) {
    if let Some(date) = self.date {
      entry.date = date;
    }
    if let Some(planned) = self.planned {
      entry.planned = planned;
      entry.planned_source = Some(PlannedSource::Manual);
    }
    if let Some(actual) = self.actual {
      entry.actual = actual;
    }
    if let Some(notes) = self.notes {
      entry.notes = notes;
    }
    if let Some(rpe) = self.rpe {
      entry.rpe = rpe.filter(|v| v.is_finite());
    }
    if let Some(energy) = self.energy {
      entry.energy = energy.filter(|v| v.is_finite());
    }
    if let Some(sleep) = self.sleep {
      entry.sleep = sleep.filter(|v| v.is_finite());
    }
    if let Some(phase) = self.phase {
      entry.phase = phase;
    }
    if let Some(source) = self.planned_source {
      entry.planned_source = source;
    }
  }
}

/// Metric edits as typed into the entry form. A present field goes through
/// `parse_nullable_number`, so a cleared or unreadable box clears the metric.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetricTextPatch {
  pub rpe: Option<String>,
  pub energy: Option<String>,
  pub sleep: Option<String>,
}

impl From<MetricTextPatch> for LogPatch {
  fn from(text: MetricTextPatch) -> Self {
    let coerce = |raw: Option<String>| raw.map(|s| parse_nullable_number(&s));
    LogPatch {
      rpe: coerce(text.rpe),
      energy: coerce(text.energy),
      sleep: coerce(text.sleep),
      ..Default::default()
    }
  }
}

/// Apply `patch` to the entry with `id`. Returns the updated entry, or `None`
/// when no entry has that id.
pub fn update_entry<'a>(
  logs: &'a mut [LogEntry],
  id: &str,
  patch: LogPatch,
) -> Option<&'a LogEntry> {
  let entry = logs.iter_mut().find(|e| e.id == id)?;
  patch.apply_to(entry);
  Some(entry)
}

/// Remove every entry with `id`. Returns whether anything was removed.
pub fn remove_entry(logs: &mut Vec<LogEntry>, id: &str) -> bool {
  let before = logs.len();
  logs.retain(|e| e.id != id);
  logs.len() != before
}

/// Newest date first; undated or unparseable entries last. Stable.
pub fn sorted_for_display(logs: &[LogEntry]) -> Vec<LogEntry> {
  let mut keyed: Vec<(Option<NaiveDate>, &LogEntry)> = logs
    .iter()
    .map(|e| (parse_local_date_string(&e.date), e))
    .collect();

  keyed.sort_by(|(a, _), (b, _)| match (a, b) {
    (None, None) => Ordering::Equal,
    (None, Some(_)) => Ordering::Greater,
    (Some(_), None) => Ordering::Less,
    (Some(a), Some(b)) => b.cmp(a),
  });

  keyed.into_iter().map(|(_, e)| e.clone()).collect()
}

/// Entries logged on exactly `date`
pub fn entries_for_date<'a>(logs: &'a [LogEntry], date: &str) -> Vec<&'a LogEntry> {
  if date.is_empty() {
    return Vec::new();
  }
  logs.iter().filter(|e| e.date == date).collect()
}
