//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Helper assertions

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::AppState;
use crate::log::empty_entry;
use crate::models::{LogEntry, PlanState, WeekPlan};
use crate::plan::create_week;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// App state backed by a fresh in-memory database
pub async fn setup_test_state() -> AppState {
  AppState {
    db: setup_test_db().await,
  }
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Store a plan under the current plan key
pub async fn seed_test_plan(pool: &SqlitePool, plan: &PlanState) {
  crate::store::save_plan(pool, plan)
    .await
    .expect("Failed to seed plan");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// An entry with a fresh id, the given date and phase, and no metrics
pub fn mock_log_entry(date: &str, phase: &str) -> LogEntry {
  let mut entry = empty_entry();
  entry.date = date.to_string();
  entry.phase = phase.to_string();
  entry
}

/// A week with the given `(day index, planned)` slots filled in
pub fn mock_week(week_start: &str, slots: &[(usize, &str)]) -> WeekPlan {
  let mut week = create_week(week_start);
  for (index, planned) in slots {
    week.days[*index].planned = planned.to_string();
  }
  week
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name = 'kv_store'",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_plan_is_readable() {
    let pool = setup_test_db().await;
    let plan = PlanState {
      weeks: vec![mock_week("2025-11-10", &[(2, "Pole")])],
    };

    seed_test_plan(&pool, &plan).await;
    assert_eq!(crate::store::load_plan(&pool, ymd(2025, 11, 12)).await, plan);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_factories_create_valid_data() {
    let entry = mock_log_entry("2025-01-15", "Luteal");
    assert_eq!(entry.date, "2025-01-15");
    assert_eq!(entry.phase, "Luteal");
    assert!(entry.energy.is_none());

    let week = mock_week("2025-11-10", &[(6, "Long run")]);
    assert_eq!(week.days.len(), 7);
    assert_eq!(week.days[6].planned, "Long run");
  }
}
