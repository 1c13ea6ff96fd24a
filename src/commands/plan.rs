//! Weekly plan commands

use chrono::NaiveDate;

use crate::dates::{parse_local_date_string, shift_week};
use crate::db::AppState;
use crate::models::{PlanState, WeekPlan};
use crate::plan::{ensure_week_in_state, set_day_planned, set_focus};
use crate::resolver::resolve_planned_session;
use crate::store::{load_plan, save_plan};

pub async fn get_plan(state: &AppState, today: NaiveDate) -> Result<PlanState, String> {
  Ok(load_plan(&state.db, today).await)
}

/// Make sure a week exists for `week_start` and return it
pub async fn ensure_week(
  state: &AppState,
  today: NaiveDate,
  week_start: String,
) -> Result<WeekPlan, String> {
  let mut plan = load_plan(&state.db, today).await;

  if ensure_week_in_state(&mut plan.weeks, &week_start) {
    save_plan(&state.db, &plan)
      .await
      .map_err(|e| format!("Failed to save plan: {}", e))?;
  }

  Ok(plan.week_or_empty(&week_start))
}

/// Navigate `offset_weeks` away from `week_start`, creating the target week if needed
pub async fn shift_to_week(
  state: &AppState,
  today: NaiveDate,
  week_start: String,
  offset_weeks: i64,
) -> Result<WeekPlan, String> {
  let target = shift_week(&week_start, offset_weeks, today);
  ensure_week(state, today, target).await
}

pub async fn update_week_focus(
  state: &AppState,
  today: NaiveDate,
  week_start: String,
  focus: String,
) -> Result<(), String> {
  let mut plan = load_plan(&state.db, today).await;

  if !set_focus(&mut plan.weeks, &week_start, &focus) {
    return Err(format!("Week not found: {}", week_start));
  }

  save_plan(&state.db, &plan)
    .await
    .map_err(|e| format!("Failed to save plan: {}", e))
}

pub async fn update_day_plan(
  state: &AppState,
  today: NaiveDate,
  week_start: String,
  day_index: usize,
  planned: String,
) -> Result<(), String> {
  let mut plan = load_plan(&state.db, today).await;

  if !set_day_planned(&mut plan.weeks, &week_start, day_index, &planned) {
    return Err(format!("No day {} in week {}", day_index, week_start));
  }

  save_plan(&state.db, &plan)
    .await
    .map_err(|e| format!("Failed to save plan: {}", e))
}

/// What the plan suggests for `date`, if anything
pub async fn suggest_planned_session(
  state: &AppState,
  today: NaiveDate,
  date: String,
) -> Result<Option<String>, String> {
  if parse_local_date_string(&date).is_none() {
    return Ok(None);
  }
  let plan = load_plan(&state.db, today).await;
  Ok(resolve_planned_session(&date, &plan))
}
