use bson::Bson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// One document of `sleeplog_by_date`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleeplogDoc {
    pub date: String,
    #[serde(default)]
    pub minutes_asleep: Option<i64>,
    #[serde(default)]
    pub minutes_awake: Option<i64>,
    #[serde(default)]
    pub minutes_to_fall_asleep: Option<i64>,
    #[serde(default)]
    pub minutes_after_wakeup: Option<i64>,
    #[serde(default)]
    pub time_in_bed: Option<i64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub efficiency: Option<f64>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub levels: Option<SleepLevels>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepLevels {
    #[serde(default)]
    pub data: Vec<RawLevel>,
    #[serde(default)]
    pub short_data: Vec<RawLevel>,
    #[serde(default)]
    pub summary: Option<LevelSummary>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLevel {
    pub date_time: Bson,
    pub level: String,
    pub seconds: i64,
}

/// Minutes per stage. Newer devices report deep/light/rem/wake, older ones
/// asleep/restless/awake.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LevelSummary {
    pub deep: Option<StageMinutes>,
    pub light: Option<StageMinutes>,
    pub rem: Option<StageMinutes>,
    pub wake: Option<StageMinutes>,
    pub awake: Option<StageMinutes>,
    pub asleep: Option<StageMinutes>,
    pub restless: Option<StageMinutes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageMinutes {
    #[serde(default)]
    pub minutes: Option<i64>,
}

/// Segment as stored, before stage remapping. `short_` levels come from the
/// short-data array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawSleepSegment {
    pub segment_start_time: DateTime<Utc>,
    pub segment_end_time: DateTime<Utc>,
    pub level: String,
    pub seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SleepStage {
    Deep,
    Light,
    Rem,
    Wake,
    ShortWake,
    Other(String),
}

impl SleepStage {
    pub fn from_label(label: &str) -> Self {
        match label {
            "deep" => SleepStage::Deep,
            "light" => SleepStage::Light,
            "rem" => SleepStage::Rem,
            "wake" => SleepStage::Wake,
            "short_wake" => SleepStage::ShortWake,
            other => SleepStage::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SleepStage::Deep => "deep",
            SleepStage::Light => "light",
            SleepStage::Rem => "rem",
            SleepStage::Wake => "wake",
            SleepStage::ShortWake => "short_wake",
            SleepStage::Other(label) => label,
        }
    }

    /// Chart colour. Labels outside the five canonical stages have none.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            SleepStage::Deep => Some("#333A73"),
            SleepStage::Light => Some("#387ADF"),
            SleepStage::Rem => Some("#50C4ED"),
            SleepStage::Wake => Some("#FF407D"),
            SleepStage::ShortWake => Some("#FFDDE8"),
            SleepStage::Other(_) => None,
        }
    }

    pub fn is_short(&self) -> bool {
        self.as_str().starts_with("short_")
    }
}

impl Serialize for SleepStage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepSegment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub stage: SleepStage,
    pub color: Option<&'static str>,
}

/// Time span of one sleep session, shared by every chart of the sleep page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SleepWindow {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepDaily {
    pub date: String,
    pub minutes_asleep: Option<i64>,
    pub minutes_awake: Option<i64>,
    pub minutes_to_fall_asleep: Option<i64>,
    pub minutes_after_wakeup: Option<i64>,
    pub time_in_bed: Option<i64>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub efficiency: Option<f64>,
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    pub date: String,
    pub minutes_deep: Option<i64>,
    pub minutes_light: Option<i64>,
    pub minutes_rem: Option<i64>,
    pub minutes_awake: i64,
    pub minutes_asleep: Option<i64>,
    pub minutes_restless: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepStages {
    pub window: Option<SleepWindow>,
    pub stages: Vec<SleepSegment>,
}

impl SleeplogDoc {
    pub fn daily(&self) -> SleepDaily {
        SleepDaily {
            date: self.date.clone(),
            minutes_asleep: self.minutes_asleep,
            minutes_awake: self.minutes_awake,
            minutes_to_fall_asleep: self.minutes_to_fall_asleep,
            minutes_after_wakeup: self.minutes_after_wakeup,
            time_in_bed: self.time_in_bed,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            efficiency: self.efficiency,
            duration: self.duration,
        }
    }

    /// Stage minutes; `wake` and `awake` are merged, missing ones count as 0.
    pub fn summary(&self) -> SleepSummary {
        let summary = self
            .levels
            .as_ref()
            .and_then(|levels| levels.summary.clone())
            .unwrap_or_default();
        let minutes = |stage: &Option<StageMinutes>| stage.as_ref().and_then(|s| s.minutes);

        SleepSummary {
            date: self.date.clone(),
            minutes_deep: minutes(&summary.deep),
            minutes_light: minutes(&summary.light),
            minutes_rem: minutes(&summary.rem),
            minutes_awake: minutes(&summary.wake).unwrap_or(0) + minutes(&summary.awake).unwrap_or(0),
            minutes_asleep: minutes(&summary.asleep),
            minutes_restless: minutes(&summary.restless),
        }
    }
}
