//! Plan -> log suggestion
//!
//! Given a calendar date, find what the weekly plan says for it. The week keyed
//! by the date's own Monday is tried first. If it's missing or that day is blank,
//! every stored week is scanned in stored order and the first one whose 7-day
//! window covers the date with a non-blank slot wins. The scan recovers legacy
//! weeks whose `weekStart` isn't a Monday; when several weeks overlap a date,
//! stored order decides.

use chrono::NaiveDate;

use crate::dates::{monday_of, parse_local_date_string};
use crate::models::{PlanState, WeekPlan};

/// Suggested planned session for `date_str`, or `None`.
/// Never mutates the plan.
pub fn resolve_planned_session(date_str: &str, plan: &PlanState) -> Option<String> {
    if plan.weeks.is_empty() {
        return None;
    }
    let date = parse_local_date_string(date_str)?;

    // 1) The week whose weekStart is this date's Monday
    let expected = monday_of(date);
    if let Some(planned) = plan
        .weeks
        .iter()
        .find(|w| w.week_start == expected)
        .and_then(|w| pick_from_week(w, date))
    {
        return Some(planned);
    }

    // 2) Any week covering the date by offset, legacy or misaligned included
    plan.weeks.iter().find_map(|w| pick_from_week(w, date))
}

/// Days from the week's start to `date`, if the week's start parses
pub fn day_offset(week: &WeekPlan, date: NaiveDate) -> Option<i64> {
    let start = parse_local_date_string(&week.week_start)?;
    Some((date - start).num_days())
}

fn pick_from_week(week: &WeekPlan, date: NaiveDate) -> Option<String> {
    let offset = day_offset(week, date)?;
    if offset < 0 {
        return None;
    }
    let day = week.days.get(usize::try_from(offset).ok()?)?;
    (!day.planned.is_empty()).then(|| day.planned.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayPlan;
    use crate::plan::create_week;

    fn week_with(week_start: &str, slots: &[(usize, &str)]) -> WeekPlan {
        let mut week = create_week(week_start);
        for (index, text) in slots {
            week.days[*index].planned = text.to_string();
        }
        week
    }

    fn plan(weeks: Vec<WeekPlan>) -> PlanState {
        PlanState { weeks }
    }

    #[test]
    fn test_primary_match() {
        let plan = plan(vec![week_with("2025-11-10", &[(2, "Pole - power tricks")])]);

        assert_eq!(
            resolve_planned_session("2025-11-12", &plan),
            Some("Pole - power tricks".to_string())
        );
        // Following Monday: no week covers it
        assert_eq!(resolve_planned_session("2025-11-17", &plan), None);
    }

    #[test]
    fn test_blank_slot_is_no_suggestion() {
        let plan = plan(vec![week_with("2025-11-10", &[(2, "Run")])]);
        assert_eq!(resolve_planned_session("2025-11-11", &plan), None);
    }

    #[test]
    fn test_empty_inputs() {
        let plan_with_week = plan(vec![week_with("2025-11-10", &[(0, "Run")])]);
        assert_eq!(resolve_planned_session("", &plan_with_week), None);
        assert_eq!(resolve_planned_session("garbage", &plan_with_week), None);
        assert_eq!(resolve_planned_session("2025-11-10", &plan(vec![])), None);
    }

    #[test]
    fn test_fallback_scan_recovers_misaligned_week() {
        // 2025-01-06 is a Monday, but store the week under a Tuesday start
        // so no week matches the queried date's own Monday.
        let plan = plan(vec![week_with("2025-01-07", &[(2, "Hill sprints")])]);

        // 2025-01-09 is offset 2 from 2025-01-07; its own Monday is 2025-01-06
        assert_eq!(
            resolve_planned_session("2025-01-09", &plan),
            Some("Hill sprints".to_string())
        );
    }

    #[test]
    fn test_fallback_when_primary_slot_blank() {
        let plan = plan(vec![
            week_with("2025-01-06", &[]),
            week_with("2025-01-07", &[(1, "Legacy session")]),
        ]);

        assert_eq!(
            resolve_planned_session("2025-01-08", &plan),
            Some("Legacy session".to_string())
        );
    }

    #[test]
    fn test_primary_beats_earlier_overlapping_week() {
        let plan = plan(vec![
            week_with("2025-01-07", &[(1, "Legacy session")]),
            week_with("2025-01-06", &[(2, "Aligned session")]),
        ]);

        assert_eq!(
            resolve_planned_session("2025-01-08", &plan),
            Some("Aligned session".to_string())
        );
    }

    #[test]
    fn test_duplicate_weeks_first_wins() {
        let plan = plan(vec![
            week_with("2025-11-10", &[(0, "First")]),
            week_with("2025-11-10", &[(0, "Second")]),
        ]);

        assert_eq!(
            resolve_planned_session("2025-11-10", &plan),
            Some("First".to_string())
        );
    }

    #[test]
    fn test_unparseable_week_start_is_skipped() {
        let plan = plan(vec![
            week_with("", &[(0, "Broken")]),
            week_with("2025-11-10", &[(0, "Good")]),
        ]);

        assert_eq!(
            resolve_planned_session("2025-11-10", &plan),
            Some("Good".to_string())
        );
    }

    #[test]
    fn test_short_week_is_indexed_defensively() {
        let short = WeekPlan {
            week_start: "2025-11-10".to_string(),
            focus: String::new(),
            days: vec![DayPlan {
                name: "Mon".to_string(),
                planned: "Only Monday".to_string(),
            }],
        };
        let plan = plan(vec![short]);

        assert_eq!(
            resolve_planned_session("2025-11-10", &plan),
            Some("Only Monday".to_string())
        );
        assert_eq!(resolve_planned_session("2025-11-12", &plan), None);
    }

    #[test]
    fn test_resolver_does_not_mutate_plan() {
        let plan = plan(vec![week_with("2025-11-10", &[(2, "Pole")])]);
        let before = plan.clone();
        let _ = resolve_planned_session("2025-11-12", &plan);
        assert_eq!(plan, before);
    }

    #[test]
    fn test_day_offset() {
        let week = create_week("2025-11-10");
        let date = NaiveDate::from_ymd_opt(2025, 11, 16).unwrap();
        assert_eq!(day_offset(&week, date), Some(6));
        assert_eq!(day_offset(&create_week("nope"), date), None);
    }
}
