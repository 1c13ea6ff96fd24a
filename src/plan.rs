//! Weekly plan construction and editing
//!
//! Weeks are created lazily the first time they're navigated to and are never
//! deleted. Edits always target the first week stored under a given `weekStart`.

use chrono::NaiveDate;

use crate::dates::{monday_of, parse_local_date_string};
use crate::models::{DayPlan, PlanState, WeekPlan};

/// Day labels, Monday first
pub const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// An empty week starting at `week_start`
pub fn create_week(week_start: &str) -> WeekPlan {
  WeekPlan {
    week_start: week_start.to_string(),
    focus: String::new(),
    days: DAYS
      .iter()
      .map(|name| DayPlan {
        name: name.to_string(),
        planned: String::new(),
      })
      .collect(),
  }
}

/// An empty week for the week containing `date`
pub fn create_week_for_date(date: NaiveDate) -> WeekPlan {
  create_week(&monday_of(date))
}

/// Append an empty week for `week_start` unless one is already stored.
/// Returns whether a week was added.
pub fn ensure_week_in_state(weeks: &mut Vec<WeekPlan>, week_start: &str) -> bool {
  if weeks.iter().any(|w| w.week_start == week_start) {
    return false;
  }
  weeks.push(create_week(week_start));
  true
}

impl PlanState {
  /// A plan holding one empty week for `today`, plus that week's start
  pub fn initial_for_today(today: NaiveDate) -> (Self, String) {
    let week = create_week_for_date(today);
    let week_start = week.week_start.clone();
    (Self { weeks: vec![week] }, week_start)
  }

  /// The stored week for `week_start`, or an unsaved empty one
  pub fn week_or_empty(&self, week_start: &str) -> WeekPlan {
    self
      .weeks
      .iter()
      .find(|w| w.week_start == week_start)
      .cloned()
      .unwrap_or_else(|| create_week(week_start))
  }
}

/// Strict lookup: the week whose `weekStart` is exactly `date_str`'s Monday
pub fn find_week_for_date<'a>(weeks: &'a [WeekPlan], date_str: &str) -> Option<&'a WeekPlan> {
  let date = parse_local_date_string(date_str)?;
  let week_start = monday_of(date);
  weeks.iter().find(|w| w.week_start == week_start)
}

/// Set the focus text of the week at `week_start`. Returns whether a week matched.
pub fn set_focus(weeks: &mut [WeekPlan], week_start: &str, focus: &str) -> bool {
  match weeks.iter_mut().find(|w| w.week_start == week_start) {
    Some(week) => {
      week.focus = focus.to_string();
      true
    }
    None => false,
  }
}

/// Set the planned session for day `index` (0 = Monday) of the week at
/// `week_start`. Returns whether a slot was updated.
pub fn set_day_planned(weeks: &mut [WeekPlan], week_start: &str, index: usize, planned: &str) -> bool {
  let Some(week) = weeks.iter_mut().find(|w| w.week_start == week_start) else {
    return false;
  };
  match week.days.get_mut(index) {
    Some(day) => {
      day.planned = planned.to_string();
      true
    }
    None => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_create_week_has_seven_labelled_days() {
    let week = create_week("2025-11-10");
    assert_eq!(week.week_start, "2025-11-10");
    assert_eq!(week.focus, "");
    assert_eq!(week.days.len(), 7);
    assert_eq!(week.days[0].name, "Mon");
    assert_eq!(week.days[6].name, "Sun");
    assert!(week.days.iter().all(|d| d.planned.is_empty()));
  }

  #[test]
  fn test_create_week_for_date_anchors_on_monday() {
    let sunday = NaiveDate::from_ymd_opt(2025, 11, 16).unwrap();
    assert_eq!(create_week_for_date(sunday).week_start, "2025-11-10");
  }

  #[test]
  fn test_ensure_week_is_idempotent() {
    let mut weeks = Vec::new();
    assert!(ensure_week_in_state(&mut weeks, "2025-11-10"));
    assert!(!ensure_week_in_state(&mut weeks, "2025-11-10"));
    assert!(ensure_week_in_state(&mut weeks, "2025-11-17"));
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[1].week_start, "2025-11-17");
  }

  #[test]
  fn test_ensure_week_keeps_existing_content() {
    let mut weeks = vec![create_week("2025-11-10")];
    weeks[0].focus = "Strength".to_string();
    ensure_week_in_state(&mut weeks, "2025-11-10");
    assert_eq!(weeks[0].focus, "Strength");
  }

  #[test]
  fn test_initial_for_today() {
    let today = NaiveDate::from_ymd_opt(2025, 11, 12).unwrap();
    let (state, current) = PlanState::initial_for_today(today);
    assert_eq!(current, "2025-11-10");
    assert_eq!(state.weeks.len(), 1);
    assert_eq!(state.weeks[0].week_start, "2025-11-10");
  }

  #[test]
  fn test_find_week_for_date_is_strict() {
    let weeks = vec![create_week("2025-11-10"), create_week("2025-11-11")];
    let found = find_week_for_date(&weeks, "2025-11-14").unwrap();
    assert_eq!(found.week_start, "2025-11-10");
    assert!(find_week_for_date(&weeks, "2025-11-18").is_none());
    assert!(find_week_for_date(&weeks, "").is_none());
  }

  #[test]
  fn test_week_or_empty() {
    let mut state = PlanState { weeks: vec![create_week("2025-11-10")] };
    state.weeks[0].focus = "Base".to_string();
    assert_eq!(state.week_or_empty("2025-11-10").focus, "Base");
    assert_eq!(state.week_or_empty("2025-11-17").focus, "");
    assert_eq!(state.weeks.len(), 1);
  }

  #[test]
  fn test_edits_target_matching_week() {
    let mut weeks = vec![create_week("2025-11-10"), create_week("2025-11-17")];

    assert!(set_focus(&mut weeks, "2025-11-17", "Deload"));
    assert!(set_day_planned(&mut weeks, "2025-11-17", 2, "Yoga"));
    assert_eq!(weeks[1].focus, "Deload");
    assert_eq!(weeks[1].days[2].planned, "Yoga");
    assert_eq!(weeks[0].days[2].planned, "");

    assert!(!set_focus(&mut weeks, "2025-12-01", "x"));
    assert!(!set_day_planned(&mut weeks, "2025-11-10", 7, "x"));
  }
}
