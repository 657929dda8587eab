use bson::Bson;
use serde::{Deserialize, Serialize};

/// One document of `steps_intraday_by_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsDayDoc {
    pub date: String,
    #[serde(default)]
    pub total_steps: Option<i64>,
    #[serde(default)]
    pub hour_gt250_steps: Option<i64>,
    #[serde(default)]
    pub measurements: Vec<StepMeasurement>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepMeasurement {
    pub date_time: Bson,
    pub steps: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsDaily {
    pub date: String,
    pub total_steps: Option<i64>,
}

/// Steps summed per `(date, hour)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlySteps {
    pub date: String,
    pub hour: u32,
    pub date_time: String,
    pub steps: i64,
    pub total_steps: Option<i64>,
    pub hour_gt250_steps: Option<i64>,
}

/// Hourly steps with the running daily total. Boundary records carry only
/// `date_time`, everything else is null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeStepRecord {
    pub date_time: String,
    pub date: Option<String>,
    pub steps: Option<i64>,
    pub total_steps: Option<i64>,
    pub hour_gt250_steps: Option<i64>,
    pub cumulative_steps: Option<i64>,
    pub cumulative_steps_pct: Option<i64>,
}

impl CumulativeStepRecord {
    pub fn boundary(date: &str) -> Self {
        Self {
            date_time: format!("{} 23:59:00", date),
            date: None,
            steps: None,
            total_steps: None,
            hour_gt250_steps: None,
            cumulative_steps: None,
            cumulative_steps_pct: None,
        }
    }

    pub fn is_boundary(&self) -> bool {
        self.date.is_none()
    }
}

impl StepsDayDoc {
    pub fn daily(&self) -> StepsDaily {
        StepsDaily {
            date: self.date.clone(),
            total_steps: self.total_steps,
        }
    }
}
