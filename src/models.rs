use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One logged intake event. Timestamps are local time at second precision,
/// assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkEvent {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub ounces: f64,
}

/// A body-weight configuration row. The most recently inserted row is the
/// authoritative one; older rows are kept but never consulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub timestamp: NaiveDateTime,
    pub weight_lbs: f64,
}

/// One row per calendar date from the `water_log_full` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
    pub weight: f64,
    pub target: f64,
    pub percent_of_target: f64,
}

/// One row per event from the `rolling_log_full` view. `rolling_24h_ounces`
/// sums every event in the trailing 24 hours ending at this event's
/// timestamp, this event included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingEntry {
    pub timestamp: NaiveDateTime,
    pub ounces: f64,
    pub rolling_24h_ounces: f64,
    pub weight: f64,
    pub target: f64,
    pub percent_of_target: f64,
}

/// The single row of the `last_24_hours_summary` view. An empty log still
/// produces a row with a zero total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Last24Summary {
    pub total_ounces_last_24_hours: f64,
    pub weight: f64,
    pub target_ounces: f64,
    pub percent_of_target: f64,
}
