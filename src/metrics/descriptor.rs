//! Route name → collection and label for every metric endpoint.

use std::fmt;
use std::str::FromStr;

/// Collections written by the ingestion jobs, one document per date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    BreathingRate,
    HeartRate,
    Hrv,
    Sleeplog,
    Spo2,
    Steps,
    Vo2Max,
    BloodPressure,
    Exercise,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::BreathingRate => "br_by_date",
            Collection::HeartRate => "hr_intraday_by_date",
            Collection::Hrv => "hrv_intraday_by_date",
            Collection::Sleeplog => "sleeplog_by_date",
            Collection::Spo2 => "spo2_intraday_by_date",
            Collection::Steps => "steps_intraday_by_date",
            Collection::Vo2Max => "vo2max_by_date",
            Collection::BloodPressure => "bp_by_date",
            Collection::Exercise => "outlook_exercise_by_date",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Br,
    Hr,
    HrZones,
    HrDaily,
    Hrv,
    HrvDaily,
    HrvDistribution,
    Sleeplog,
    SleeplogDaily,
    SleeplogSummary,
    Spo2,
    Spo2Daily,
    StepsHourly,
    StepsDaily,
    Vo2Max,
    BpDaily,
    BpDetail,
    ExerciseDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDescriptor {
    pub collection: Collection,
    /// Used in logs and in the `Error fetching <label> data` message.
    pub label: &'static str,
}

impl MetricKind {
    pub const ALL: [MetricKind; 18] = [
        MetricKind::Br,
        MetricKind::Hr,
        MetricKind::HrZones,
        MetricKind::HrDaily,
        MetricKind::Hrv,
        MetricKind::HrvDaily,
        MetricKind::HrvDistribution,
        MetricKind::Sleeplog,
        MetricKind::SleeplogDaily,
        MetricKind::SleeplogSummary,
        MetricKind::Spo2,
        MetricKind::Spo2Daily,
        MetricKind::StepsHourly,
        MetricKind::StepsDaily,
        MetricKind::Vo2Max,
        MetricKind::BpDaily,
        MetricKind::BpDetail,
        MetricKind::ExerciseDetail,
    ];

    /// Path segment under `/api`.
    pub fn route(&self) -> &'static str {
        match self {
            MetricKind::Br => "br",
            MetricKind::Hr => "hr",
            MetricKind::HrZones => "hr_zones",
            MetricKind::HrDaily => "hr_daily",
            MetricKind::Hrv => "hrv",
            MetricKind::HrvDaily => "hrv_daily",
            MetricKind::HrvDistribution => "hrv_distribution",
            MetricKind::Sleeplog => "sleeplog",
            MetricKind::SleeplogDaily => "sleeplog_daily",
            MetricKind::SleeplogSummary => "sleeplog_summary",
            MetricKind::Spo2 => "spo2",
            MetricKind::Spo2Daily => "spo2_daily",
            MetricKind::StepsHourly => "steps_hourly",
            MetricKind::StepsDaily => "steps_daily",
            MetricKind::Vo2Max => "vo2max",
            MetricKind::BpDaily => "bp_daily",
            MetricKind::BpDetail => "bp_detail",
            MetricKind::ExerciseDetail => "exercise_detail",
        }
    }

    pub fn descriptor(&self) -> MetricDescriptor {
        let (collection, label) = match self {
            MetricKind::Br => (Collection::BreathingRate, "Breathing Rate"),
            MetricKind::Hr => (Collection::HeartRate, "HR"),
            MetricKind::HrZones => (Collection::HeartRate, "HR Zones"),
            MetricKind::HrDaily => (Collection::HeartRate, "RHR"),
            MetricKind::Hrv => (Collection::Hrv, "HRV"),
            MetricKind::HrvDaily => (Collection::Hrv, "HRV daily"),
            MetricKind::HrvDistribution => (Collection::Hrv, "HRV distribution"),
            MetricKind::Sleeplog => (Collection::Sleeplog, "Sleeplog"),
            MetricKind::SleeplogDaily => (Collection::Sleeplog, "Sleeplog daily"),
            MetricKind::SleeplogSummary => (Collection::Sleeplog, "Sleeplog summary"),
            MetricKind::Spo2 => (Collection::Spo2, "SpO2"),
            MetricKind::Spo2Daily => (Collection::Spo2, "SpO2 daily"),
            MetricKind::StepsHourly => (Collection::Steps, "Steps Hourly"),
            MetricKind::StepsDaily => (Collection::Steps, "Steps Daily"),
            MetricKind::Vo2Max => (Collection::Vo2Max, "VO2 Max"),
            MetricKind::BpDaily => (Collection::BloodPressure, "BP Daily"),
            MetricKind::BpDetail => (Collection::BloodPressure, "BP Detailed"),
            MetricKind::ExerciseDetail => (Collection::Exercise, "exercise"),
        };
        MetricDescriptor { collection, label }
    }

    pub fn collection(&self) -> Collection {
        self.descriptor().collection
    }

    pub fn label(&self) -> &'static str {
        self.descriptor().label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown metric: {}", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for MetricKind {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetricKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.route() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.route())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_parses_back() {
        for kind in MetricKind::ALL {
            assert_eq!(kind.route().parse::<MetricKind>(), Ok(kind));
        }
        assert_eq!("steps".parse::<MetricKind>(), Err(UnknownMetric("steps".into())));
    }

    #[test]
    fn daily_and_intraday_views_share_a_collection() {
        assert_eq!(MetricKind::Hr.collection(), MetricKind::HrZones.collection());
        assert_eq!(MetricKind::HrvDaily.collection().name(), "hrv_intraday_by_date");
        assert_eq!(MetricKind::ExerciseDetail.collection().name(), "outlook_exercise_by_date");
        assert_eq!(MetricKind::StepsHourly.label(), "Steps Hourly");
    }
}
