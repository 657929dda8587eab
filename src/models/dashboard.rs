use serde::Serialize;

use crate::models::heart_rate::{HeartRateDaily, HeartRatePoint, HrvDaily, HrvPoint};
use crate::models::respiratory::{BreathingRateDoc, Spo2Daily, Spo2Point, Vo2MaxDoc};
use crate::models::sleep::{SleepSegment, SleepWindow};

/// A daily metric over a trailing window together with its fitted trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesResponse {
    pub series: String,
    pub start: String,
    pub end: String,
    pub dates: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub trend: Vec<Option<f64>>,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsToday {
    pub total_steps: Option<i64>,
    pub hours_over_250_steps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepToday {
    pub minutes_asleep: Option<i64>,
    pub minutes_awake: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub efficiency: Option<f64>,
}

/// Everything the "today" page shows for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodaySnapshot {
    pub date: String,
    pub heart_rate: Option<HeartRateDaily>,
    pub steps: Option<StepsToday>,
    pub vo2max: Option<Vo2MaxDoc>,
    pub breathing_rate: Option<BreathingRateDoc>,
    pub spo2: Option<Spo2Daily>,
    pub sleep: Option<SleepToday>,
    pub hrv: Option<HrvDaily>,
    pub maf_heart_rate: Option<u32>,
}

/// One night: the session window plus intraday series clipped to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepNight {
    pub date: String,
    pub window: Option<SleepWindow>,
    pub stages: Vec<SleepSegment>,
    pub heart_rate: Vec<HeartRatePoint>,
    pub hrv: Vec<HrvPoint>,
    pub spo2: Vec<Spo2Point>,
}
