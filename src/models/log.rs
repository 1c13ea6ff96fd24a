use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where an entry's `planned` text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedSource {
  /// Filled in from the weekly plan
  Plan,
  /// Typed by the user
  Manual,
}

impl PlannedSource {
  pub fn as_str(&self) -> &'static str {
    match self {
      PlannedSource::Plan => "plan",
      PlannedSource::Manual => "manual",
    }
  }
}

/// One journal record for one calendar day.
///
/// Built only through `log::normalize_log_entry`, which guarantees the metric
/// fields are finite or `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
  pub id: String,
  /// `YYYY-MM-DD`, or empty when unset
  pub date: String,
  pub planned: String,
  pub actual: String,
  pub notes: String,
  pub rpe: Option<f64>,
  pub energy: Option<f64>,
  /// Hours
  pub sleep: Option<f64>,
  pub phase: String,
  pub planned_source: Option<PlannedSource>,
}

/// A log record of unknown shape, as read from storage or handed over by a shell.
///
/// Every field is optional and untyped; `log::normalize_log_entry` decides what
/// survives.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLogEntry {
  pub id: Option<Value>,
  pub date: Option<Value>,
  pub planned: Option<Value>,
  pub actual: Option<Value>,
  pub notes: Option<Value>,
  pub rpe: Option<Value>,
  pub energy: Option<Value>,
  pub sleep: Option<Value>,
  pub phase: Option<Value>,
  pub planned_source: Option<Value>,
}

impl RawLogEntry {
  /// Accept any JSON value. Anything but an object reads as an empty record.
  pub fn from_value(value: Value) -> Self {
    match value {
      Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
      _ => Self::default(),
    }
  }
}

fn metric_value(metric: Option<f64>) -> Option<Value> {
  metric.and_then(serde_json::Number::from_f64).map(Value::Number)
}

impl From<&LogEntry> for RawLogEntry {
  fn from(entry: &LogEntry) -> Self {
    Self {
      id: Some(Value::String(entry.id.clone())),
      date: Some(Value::String(entry.date.clone())),
      planned: Some(Value::String(entry.planned.clone())),
      actual: Some(Value::String(entry.actual.clone())),
      notes: Some(Value::String(entry.notes.clone())),
      rpe: metric_value(entry.rpe),
      energy: metric_value(entry.energy),
      sleep: metric_value(entry.sleep),
      phase: Some(Value::String(entry.phase.clone())),
      planned_source: entry
        .planned_source
        .map(|source| Value::String(source.as_str().to_string())),
    }
  }
}
