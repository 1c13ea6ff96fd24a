//! Deterministic insights over the journal
//!
//! Everything here is recomputed from the full log collection on demand:
//! overall counts and averages, a per-phase breakdown, the chart series, and
//! per-day calendar markers. Metrics are averaged only over entries that
//! actually recorded them; "no data" is `None`, never `0`.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::dates::format_display_date;
use crate::log::{entries_for_date, sorted_for_display};
use crate::models::{LogEntry, PhaseLabel};

/// Grouping key for entries without a phase
pub const UNLABELED: &str = "Unlabeled";

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
  pub total_entries: usize,
  /// Distinct non-empty dates
  pub days_with_logs: usize,
  pub avg_energy: Option<f64>,
  pub avg_rpe: Option<f64>,
  pub avg_sleep: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseStats {
  /// Display label
  pub phase: String,
  /// Grouping key (same as the label)
  pub key: String,
  pub entries: usize,
  pub avg_energy: Option<f64>,
  pub avg_rpe: Option<f64>,
  pub avg_sleep: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsStats {
  pub overall: OverallStats,
  pub phases: Vec<PhaseStats>,
}

/// One chart point. Missing metrics are omitted, not zeroed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsPoint {
  pub date: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub energy: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rpe: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sleep: Option<f64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phase: Option<String>,
}

/// Phase marker for one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum DayMarker {
  /// Logged, but no entry carries a phase
  Unlabeled,
  /// Every labelled entry agrees
  Phase(String),
  /// Entries disagree
  Mixed,
}

impl DayMarker {
  /// Key the calendar uses to pick a dot colour
  pub fn phase_key(&self) -> &str {
    match self {
      DayMarker::Unlabeled => "unlabeled",
      DayMarker::Phase(label) => label,
      DayMarker::Mixed => "mixed",
    }
  }
}

/// One entry on the day sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntryView {
  #[serde(flatten)]
  pub entry: LogEntry,
  /// Phase label is set but isn't one of the presets
  pub custom_phase: bool,
}

/// Everything the day sheet shows for one date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
  pub date: String,
  pub label: String,
  /// Calendar dot key, `None` when nothing is logged that day
  pub marker: Option<String>,
  pub entries: Vec<DayEntryView>,
}

// ---------------------------------------------------------------------------
// Running means
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct Mean {
  sum: f64,
  count: usize,
}

impl Mean {
  fn push(&mut self, value: Option<f64>) {
    if let Some(v) = value {
      self.sum += v;
      self.count += 1;
    }
  }

  fn value(&self) -> Option<f64> {
    if self.count == 0 {
      None
    } else {
      Some(self.sum / self.count as f64)
    }
  }
}

#[derive(Debug, Clone, Copy, Default)]
struct MetricMeans {
  energy: Mean,
  rpe: Mean,
  sleep: Mean,
}

impl MetricMeans {
  fn push(&mut self, log: &LogEntry) {
    self.energy.push(log.energy);
    self.rpe.push(log.rpe);
    self.sleep.push(log.sleep);
  }
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn compute_overall_stats(logs: &[LogEntry]) -> OverallStats {
  let mut means = MetricMeans::default();
  let mut dates: HashSet<&str> = HashSet::new();

  for log in logs {
    means.push(log);
    if !log.date.is_empty() {
      dates.insert(log.date.as_str());
    }
  }

  OverallStats {
    total_entries: logs.len(),
    days_with_logs: dates.len(),
    avg_energy: means.energy.value(),
    avg_rpe: means.rpe.value(),
    avg_sleep: means.sleep.value(),
  }
}

/// Group by trimmed phase label ("Unlabeled" when blank), most entries first.
/// Groups with equal counts keep first-seen order.
pub fn compute_phase_stats(logs: &[LogEntry]) -> Vec<PhaseStats> {
  let mut buckets: Vec<(String, usize, MetricMeans)> = Vec::new();
  let mut index: HashMap<String, usize> = HashMap::new();

  for log in logs {
    let trimmed = log.phase.trim();
    let key = if trimmed.is_empty() { UNLABELED } else { trimmed };

    let slot = match index.get(key) {
      Some(&slot) => slot,
      None => {
        buckets.push((key.to_string(), 0, MetricMeans::default()));
        index.insert(key.to_string(), buckets.len() - 1);
        buckets.len() - 1
      }
    };

    let (_, count, means) = &mut buckets[slot];
    *count += 1;
    means.push(log);
  }

  let mut phases: Vec<PhaseStats> = buckets
    .into_iter()
    .map(|(key, entries, means)| PhaseStats {
      phase: key.clone(),
      key,
      entries,
      avg_energy: means.energy.value(),
      avg_rpe: means.rpe.value(),
      avg_sleep: means.sleep.value(),
    })
    .collect();

  // sort_by is stable
  phases.sort_by(|a, b| b.entries.cmp(&a.entries));
  phases
}

pub fn build_insights_stats(logs: &[LogEntry]) -> InsightsStats {
  InsightsStats {
    overall: compute_overall_stats(logs),
    phases: compute_phase_stats(logs),
  }
}

/// Chart series of dated entries with at least one metric, oldest first.
/// Same-day entries stay as separate points in their original order.
pub fn build_metrics_series(logs: &[LogEntry]) -> Vec<MetricsPoint> {
  let mut points: Vec<MetricsPoint> = logs
    .iter()
    .filter(|log| !log.date.is_empty())
    .filter(|log| log.energy.is_some() || log.rpe.is_some() || log.sleep.is_some())
    .map(|log| MetricsPoint {
      date: log.date.clone(),
      energy: log.energy,
      rpe: log.rpe,
      sleep: log.sleep,
      phase: (!log.phase.is_empty()).then(|| log.phase.clone()),
    })
    .collect();

  // Fixed-width YYYY-MM-DD sorts correctly as a string
  points.sort_by(|a, b| a.date.cmp(&b.date));
  points
}

/// Calendar marker for every logged date
pub fn day_markers(logs: &[LogEntry]) -> BTreeMap<String, DayMarker> {
  let mut labels_by_date: BTreeMap<String, Vec<&str>> = BTreeMap::new();

  for log in logs.iter().filter(|l| !l.date.is_empty()) {
    let labels = labels_by_date.entry(log.date.clone()).or_default();
    let phase = log.phase.trim();
    if !phase.is_empty() && !labels.contains(&phase) {
      labels.push(phase);
    }
  }

  labels_by_date
    .into_iter()
    .map(|(date, labels)| {
      let marker = match labels.as_slice() {
        [] => DayMarker::Unlabeled,
        [only] => DayMarker::Phase(only.to_string()),
        _ => DayMarker::Mixed,
      };
      (date, marker)
    })
    .collect()
}

/// The day sheet for `date`: its display label, calendar marker and entries
/// in display order
pub fn build_day_view(logs: &[LogEntry], date: &str, today: NaiveDate) -> DayView {
  let sorted = sorted_for_display(logs);
  let entries: Vec<LogEntry> = entries_for_date(&sorted, date).into_iter().cloned().collect();

  let marker = day_markers(&entries)
    .get(date)
    .map(|marker| marker.phase_key().to_string());

  DayView {
    date: date.to_string(),
    label: format_display_date(date, today),
    marker,
    entries: entries
      .into_iter()
      .map(|entry| DayEntryView {
        custom_phase: PhaseLabel::classify(entry.phase.trim()).is_custom(),
        entry,
      })
      .collect(),
  }
}
