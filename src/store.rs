//! Whole-value blob storage for the journal and the plan
//!
//! Each collection lives as one JSON blob under one key in `kv_store`. Loads
//! read the whole blob and saves overwrite it; there are no partial writes.
//! A failed load is logged and reads as "nothing stored yet".

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::dates::monday_of;
use crate::error::StorageError;
use crate::log::normalize_log_entry;
use crate::models::{LogEntry, PlanState, RawLogEntry, WeekPlan};
use crate::plan::create_week;

pub const LOGS_KEY: &str = "cyclesync_mobile_logs_v1";
pub const PLAN_KEY: &str = "cyclesync_mobile_plan_v2";
/// Single-week plan shape from before multi-week plans
pub const LEGACY_PLAN_KEY: &str = "cyclesync_mobile_plan_v1";

// ---------------------------------------------------------------------------
// Raw blobs
// ---------------------------------------------------------------------------

pub async fn get_blob(pool: &SqlitePool, key: &str) -> Result<Option<String>, StorageError> {
  let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
    .bind(key)
    .fetch_optional(pool)
    .await?;

  Ok(value)
}

pub async fn put_blob(pool: &SqlitePool, key: &str, value: &str) -> Result<(), StorageError> {
  sqlx::query(
    r#"
    INSERT INTO kv_store (key, value, updated_at)
    VALUES (?1, ?2, CURRENT_TIMESTAMP)
    ON CONFLICT(key) DO UPDATE SET
      value = excluded.value,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(key)
  .bind(value)
  .execute(pool)
  .await?;

  Ok(())
}

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

/// Decode a stored log blob. A payload that isn't an array holds no entries;
/// every element goes through the normalizer.
pub fn parse_logs(raw: &str) -> Result<Vec<LogEntry>, StorageError> {
  let parsed: Value = serde_json::from_str(raw)?;
  let Value::Array(items) = parsed else {
    return Ok(Vec::new());
  };

  Ok(
    items
      .into_iter()
      .map(|item| normalize_log_entry(RawLogEntry::from_value(item)))
      .collect(),
  )
}

pub async fn load_logs(pool: &SqlitePool) -> Vec<LogEntry> {
  let loaded = match get_blob(pool, LOGS_KEY).await {
    Ok(Some(raw)) => parse_logs(&raw),
    Ok(None) => Ok(Vec::new()),
    Err(e) => Err(e),
  };

  loaded.unwrap_or_else(|e| {
    warn!(error = %e, "[storage] Failed to load logs");
    Vec::new()
  })
}

pub async fn save_logs(pool: &SqlitePool, logs: &[LogEntry]) -> Result<(), StorageError> {
  let result = match serde_json::to_string(logs) {
    Ok(payload) => put_blob(pool, LOGS_KEY, &payload).await,
    Err(e) => Err(e.into()),
  };

  if let Err(e) = &result {
    warn!(error = %e, entries = logs.len(), "[storage] Failed to save logs");
  }
  result
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Decode the multi-week blob. `None` unless it holds a non-empty `weeks` array.
/// Elements that aren't week records are dropped.
pub fn parse_plan(raw: &str) -> Option<PlanState> {
  let parsed: Value = serde_json::from_str(raw).ok()?;
  let Some(Value::Array(items)) = parsed.get("weeks") else {
    return None;
  };

  let weeks: Vec<WeekPlan> = items
    .iter()
    .filter_map(|item| serde_json::from_value(item.clone()).ok())
    .collect();

  (!weeks.is_empty()).then_some(PlanState { weeks })
}

/// Upgrade a legacy single-week blob. A missing start becomes `today`'s Monday
/// and anything other than exactly 7 days is replaced by empty slots.
pub fn migrate_legacy_week(raw: &str, today: NaiveDate) -> Option<WeekPlan> {
  let parsed: Value = serde_json::from_str(raw).ok()?;
  if !parsed.is_object() {
    return None;
  }
  let mut week: WeekPlan = serde_json::from_value(parsed).ok()?;

  if week.week_start.is_empty() {
    week.week_start = monday_of(today);
  }
  if week.days.len() != 7 {
    week.days = create_week(&week.week_start).days;
  }
  Some(week)
}

/// Load the plan, migrating the legacy single-week shape if that's all there
/// is. With nothing stored, returns one empty week for `today` (unsaved).
pub async fn load_plan(pool: &SqlitePool, today: NaiveDate) -> PlanState {
  match get_blob(pool, PLAN_KEY).await {
    Ok(Some(raw)) => {
      if let Some(state) = parse_plan(&raw) {
        return state;
      }
    }
    Ok(None) => {}
    Err(e) => warn!(error = %e, "[storage] Failed to load plan"),
  }

  match get_blob(pool, LEGACY_PLAN_KEY).await {
    Ok(Some(raw)) => {
      if let Some(week) = migrate_legacy_week(&raw, today) {
        let state = PlanState { weeks: vec![week] };
        if save_plan(pool, &state).await.is_ok() {
          info!(week_start = %state.weeks[0].week_start, "[storage] Migrated legacy plan");
        }
        return state;
      }
    }
    Ok(None) => {}
    Err(e) => warn!(error = %e, "[storage] Failed to load legacy plan"),
  }

  PlanState::initial_for_today(today).0
}

pub async fn save_plan(pool: &SqlitePool, plan: &PlanState) -> Result<(), StorageError> {
  let result = match serde_json::to_string(plan) {
    Ok(payload) => put_blob(pool, PLAN_KEY, &payload).await,
    Err(e) => Err(e.into()),
  };

  if let Err(e) = &result {
    warn!(error = %e, weeks = plan.weeks.len(), "[storage] Failed to save plan");
  }
  result
}
