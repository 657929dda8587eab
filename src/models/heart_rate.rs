use bson::Bson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::to_utc;

/// One document of `hr_intraday_by_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateDayDoc {
    pub date: String,
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
    #[serde(default)]
    pub daily_average: Option<f64>,
    #[serde(default)]
    pub daily_max: Option<f64>,
    #[serde(default)]
    pub daily_min: Option<f64>,
    #[serde(default)]
    pub measurements: Vec<HeartRateMeasurement>,
    #[serde(default)]
    pub hr_zones: Vec<HeartRateZone>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateMeasurement {
    pub date_time: Bson,
    pub heart_rate: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateZone {
    pub hr_bin_range: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRatePoint {
    pub date_time: DateTime<Utc>,
    pub heart_rate: f64,
    pub resting_heart_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateZoneRow {
    pub date: String,
    pub resting_heart_rate: Option<f64>,
    pub daily_average: Option<f64>,
    pub hr_bin_range: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateDaily {
    pub date: String,
    pub resting_heart_rate: Option<f64>,
    pub daily_average: Option<f64>,
    pub daily_max: Option<f64>,
    pub daily_min: Option<f64>,
}

impl HeartRateDayDoc {
    /// Flattens the intraday measurements. Samples whose timestamp cannot be
    /// read are dropped.
    pub fn points(&self) -> impl Iterator<Item = HeartRatePoint> + '_ {
        self.measurements.iter().filter_map(move |m| {
            Some(HeartRatePoint {
                date_time: to_utc(&m.date_time)?,
                heart_rate: m.heart_rate,
                resting_heart_rate: self.resting_heart_rate,
            })
        })
    }

    pub fn zones(&self) -> impl Iterator<Item = HeartRateZoneRow> + '_ {
        self.hr_zones.iter().map(move |zone| HeartRateZoneRow {
            date: self.date.clone(),
            resting_heart_rate: self.resting_heart_rate,
            daily_average: self.daily_average,
            hr_bin_range: zone.hr_bin_range.clone(),
            count: zone.count,
        })
    }

    pub fn daily(&self) -> HeartRateDaily {
        HeartRateDaily {
            date: self.date.clone(),
            resting_heart_rate: self.resting_heart_rate,
            daily_average: self.daily_average,
            daily_max: self.daily_max,
            daily_min: self.daily_min,
        }
    }
}

/// One document of `hrv_intraday_by_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrvDayDoc {
    pub date: String,
    #[serde(default)]
    pub daily_average_rmssd: Option<f64>,
    #[serde(default)]
    pub daily_max_rmssd: Option<f64>,
    #[serde(default)]
    pub daily_min_rmssd: Option<f64>,
    #[serde(default)]
    pub measurements: Vec<HrvMeasurement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrvMeasurement {
    pub date_time: Bson,
    pub rmssd: f64,
    #[serde(default)]
    pub rmssd_bin_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HrvPoint {
    pub date: String,
    pub daily_average_rmssd: Option<f64>,
    pub date_time: DateTime<Utc>,
    pub rmssd: f64,
    pub rmssd_bin_range: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HrvDaily {
    pub date: String,
    pub daily_average_rmssd: Option<f64>,
    pub daily_max_rmssd: Option<f64>,
    pub daily_min_rmssd: Option<f64>,
}

/// Share of each RMSSD bin per day, in percent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrvDistribution {
    pub dates: Vec<String>,
    pub ranges: Vec<HrvRangeShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HrvRangeShare {
    pub range: String,
    pub percentages: Vec<f64>,
}

impl HrvDayDoc {
    pub fn points(&self) -> impl Iterator<Item = HrvPoint> + '_ {
        self.measurements.iter().filter_map(move |m| {
            Some(HrvPoint {
                date: self.date.clone(),
                daily_average_rmssd: self.daily_average_rmssd,
                date_time: to_utc(&m.date_time)?,
                rmssd: m.rmssd,
                rmssd_bin_range: m.rmssd_bin_range.clone(),
            })
        })
    }

    pub fn daily(&self) -> HrvDaily {
        HrvDaily {
            date: self.date.clone(),
            daily_average_rmssd: self.daily_average_rmssd,
            daily_max_rmssd: self.daily_max_rmssd,
            daily_min_rmssd: self.daily_min_rmssd,
        }
    }
}
