pub mod log;
pub mod phase;
pub mod plan;

pub use log::{LogEntry, PlannedSource, RawLogEntry};
pub use phase::{Phase, PhaseLabel};
pub use plan::{DayPlan, PlanState, WeekPlan};

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
