use serde::{Deserialize, Serialize};

use crate::models::common::Stats;

/// One reading of `bp_by_date`; a day may hold several.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureReading {
    pub date: String,
    #[serde(default)]
    pub systolic: Option<f64>,
    #[serde(default)]
    pub diastolic: Option<f64>,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub arm: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureDay {
    pub date: String,
    pub systolic: Option<Stats>,
    pub diastolic: Option<Stats>,
    pub heart_rate: Option<Stats>,
    pub readings: usize,
}

/// One document of `outlook_exercise_by_date`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExerciseDoc {
    pub date: String,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub run_minutes: Option<f64>,
}
