use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One weekday slot of a weekly plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub planned: String,
}

/// A Monday-anchored week of planned sessions, Monday first.
///
/// Weeks built here always carry 7 days. Weeks read back from storage keep
/// whatever they were saved with, so readers index `days` defensively.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPlan {
  /// `YYYY-MM-DD` of the Monday that starts the week
  #[serde(default, deserialize_with = "null_as_default")]
  pub week_start: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub focus: String,
  #[serde(default, deserialize_with = "null_as_default")]
  pub days: Vec<DayPlan>,
}

/// Every stored week, in stored order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanState {
  #[serde(default, deserialize_with = "null_as_default")]
  pub weeks: Vec<WeekPlan>,
}
