//! Journal commands

use chrono::NaiveDate;
use tracing::info;

use crate::db::AppState;
use crate::insights::{build_day_view, DayView};
use crate::log::{
  create_entry, entries_for_date, remove_entry, sorted_for_display, update_entry, LogPatch,
  MetricTextPatch,
};
use crate::models::LogEntry;
use crate::store::{load_logs, load_plan, save_logs};

/// All entries, newest date first
pub async fn get_logs(state: &AppState) -> Result<Vec<LogEntry>, String> {
  Ok(sorted_for_display(&load_logs(&state.db).await))
}

/// Entries logged on `date`, in display order
pub async fn get_logs_for_date(state: &AppState, date: String) -> Result<Vec<LogEntry>, String> {
  let sorted = sorted_for_display(&load_logs(&state.db).await);
  Ok(entries_for_date(&sorted, &date).into_iter().cloned().collect())
}

/// Day sheet for `date`: display label, calendar marker and entries
pub async fn get_day_view(state: &AppState, date: String, today: NaiveDate) -> Result<DayView, String> {
  let logs = load_logs(&state.db).await;
  Ok(build_day_view(&logs, &date, today))
}

/// Create an entry for the selected date (or today), pre-filled from the plan
pub async fn add_log(
  state: &AppState,
  selected_date: Option<String>,
  today: NaiveDate,
) -> Result<LogEntry, String> {
  let mut logs = load_logs(&state.db).await;
  let plan = load_plan(&state.db, today).await;

  let entry = create_entry(&mut logs, selected_date.as_deref(), today, Some(&plan));

  save_logs(&state.db, &logs)
    .await
    .map_err(|e| format!("Failed to save logs: {}", e))?;

  info!(
    id = %entry.id,
    date = %entry.date,
    from_plan = entry.planned_source.is_some(),
    "Log entry created"
  );

  Ok(entry)
}

pub async fn update_log(state: &AppState, id: String, patch: LogPatch) -> Result<LogEntry, String> {
  let mut logs = load_logs(&state.db).await;

  let updated = update_entry(&mut logs, &id, patch)
    .cloned()
    .ok_or_else(|| format!("Log entry not found: {}", id))?;

  save_logs(&state.db, &logs)
    .await
    .map_err(|e| format!("Failed to save logs: {}", e))?;

  Ok(updated)
}

/// Metric edit straight from the form's text inputs
pub async fn update_log_metrics(
  state: &AppState,
  id: String,
  text: MetricTextPatch,
) -> Result<LogEntry, String> {
  update_log(state, id, text.into()).await
}

/// Returns whether an entry was removed
pub async fn remove_log(state: &AppState, id: String) -> Result<bool, String> {
  let mut logs = load_logs(&state.db).await;
  if !remove_entry(&mut logs, &id) {
    return Ok(false);
  }

  save_logs(&state.db, &logs)
    .await
    .map_err(|e| format!("Failed to save logs: {}", e))?;

  info!(id = %id, remaining = logs.len(), "Log entry removed");
  Ok(true)
}
