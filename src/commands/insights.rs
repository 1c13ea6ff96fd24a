//! Insight commands, recomputed from the stored journal on every call

use std::collections::BTreeMap;

use crate::db::AppState;
use crate::insights::{build_insights_stats, build_metrics_series, day_markers, DayMarker, InsightsStats, MetricsPoint};
use crate::store::load_logs;

pub async fn get_insights(state: &AppState) -> Result<InsightsStats, String> {
  let logs = load_logs(&state.db).await;
  Ok(build_insights_stats(&logs))
}

pub async fn get_metrics_series(state: &AppState) -> Result<Vec<MetricsPoint>, String> {
  let logs = load_logs(&state.db).await;
  Ok(build_metrics_series(&logs))
}

pub async fn get_day_markers(state: &AppState) -> Result<BTreeMap<String, DayMarker>, String> {
  let logs = load_logs(&state.db).await;
  Ok(day_markers(&logs))
}
