use bson::Bson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::to_utc;

/// One document of `br_by_date`. Doubles as the response row, the collection
/// is returned as stored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreathingRateDoc {
    pub date: String,
    #[serde(default)]
    pub full_sleep_br: Option<f64>,
    #[serde(default)]
    pub rem_sleep_br: Option<f64>,
    #[serde(default)]
    pub deep_sleep_br: Option<f64>,
    #[serde(default)]
    pub light_sleep_br: Option<f64>,
}

impl BreathingRateDoc {
    pub fn sub_metrics(&self) -> [Option<f64>; 4] {
        [
            self.full_sleep_br,
            self.rem_sleep_br,
            self.deep_sleep_br,
            self.light_sleep_br,
        ]
    }
}

/// One document of `spo2_intraday_by_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spo2DayDoc {
    pub date: String,
    #[serde(default)]
    pub daily_avg: Option<f64>,
    #[serde(default)]
    pub daily_max: Option<f64>,
    #[serde(default)]
    pub daily_min: Option<f64>,
    #[serde(default)]
    pub measurements: Vec<Spo2Measurement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spo2Measurement {
    pub date_time: Bson,
    pub spo2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spo2Point {
    pub date: String,
    pub daily_avg: Option<f64>,
    pub date_time: DateTime<Utc>,
    pub spo2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spo2Daily {
    pub date: String,
    pub daily_avg: Option<f64>,
    pub daily_max: Option<f64>,
    pub daily_min: Option<f64>,
}

impl Spo2DayDoc {
    pub fn points(&self) -> impl Iterator<Item = Spo2Point> + '_ {
        self.measurements.iter().filter_map(move |m| {
            Some(Spo2Point {
                date: self.date.clone(),
                daily_avg: self.daily_avg,
                date_time: to_utc(&m.date_time)?,
                spo2: m.spo2,
            })
        })
    }

    pub fn daily(&self) -> Spo2Daily {
        Spo2Daily {
            date: self.date.clone(),
            daily_avg: self.daily_avg,
            daily_max: self.daily_max,
            daily_min: self.daily_min,
        }
    }
}

/// One document of `vo2max_by_date`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vo2MaxDoc {
    pub date: String,
    #[serde(default)]
    pub vo2_max_high: Option<f64>,
    #[serde(default)]
    pub vo2_max_low: Option<f64>,
}
