//! Per-metric projection: one store read, then the transform the metric needs.

use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::MetricStore;
use crate::metrics::aggregate::{
    blood_pressure_daily, breathing_rate_is_plausible, hourly_steps, hrv_day_is_plausible, hrv_distribution,
};
use crate::metrics::cumulative::cumulative_steps;
use crate::metrics::descriptor::MetricKind;
use crate::metrics::error::MetricsError;
use crate::metrics::range::DateRange;
use crate::metrics::sleep_stages::raw_segments;
use crate::models::heart_rate::{
    HeartRateDaily, HeartRateDayDoc, HeartRatePoint, HeartRateZoneRow, HrvDaily, HrvDayDoc, HrvDistribution, HrvPoint,
};
use crate::models::respiratory::{BreathingRateDoc, Spo2Daily, Spo2DayDoc, Spo2Point, Vo2MaxDoc};
use crate::models::sleep::{RawSleepSegment, SleepDaily, SleepSummary, SleeplogDoc};
use crate::models::steps::{CumulativeStepRecord, StepsDaily, StepsDayDoc};
use crate::models::vitals::{BloodPressureDay, BloodPressureReading, ExerciseDoc};

/// Response body of a metric route. Serialized without a tag, so every
/// variant is just its JSON array (or object for the distribution).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricPayload {
    BreathingRate(Vec<BreathingRateDoc>),
    HeartRate(Vec<HeartRatePoint>),
    HeartRateZones(Vec<HeartRateZoneRow>),
    HeartRateDaily(Vec<HeartRateDaily>),
    Hrv(Vec<HrvPoint>),
    HrvDaily(Vec<HrvDaily>),
    HrvDistribution(HrvDistribution),
    Sleeplog(Vec<RawSleepSegment>),
    SleeplogDaily(Vec<SleepDaily>),
    SleeplogSummary(Vec<SleepSummary>),
    Spo2(Vec<Spo2Point>),
    Spo2Daily(Vec<Spo2Daily>),
    StepsHourly(Vec<CumulativeStepRecord>),
    StepsDaily(Vec<StepsDaily>),
    Vo2Max(Vec<Vo2MaxDoc>),
    BloodPressureDaily(Vec<BloodPressureDay>),
    BloodPressureDetail(Vec<BloodPressureReading>),
    Exercise(Vec<ExerciseDoc>),
}

impl MetricPayload {
    /// Number of records, or of dates for the distribution.
    pub fn len(&self) -> usize {
        match self {
            MetricPayload::BreathingRate(rows) => rows.len(),
            MetricPayload::HeartRate(rows) => rows.len(),
            MetricPayload::HeartRateZones(rows) => rows.len(),
            MetricPayload::HeartRateDaily(rows) => rows.len(),
            MetricPayload::Hrv(rows) => rows.len(),
            MetricPayload::HrvDaily(rows) => rows.len(),
            MetricPayload::HrvDistribution(distribution) => distribution.dates.len(),
            MetricPayload::Sleeplog(rows) => rows.len(),
            MetricPayload::SleeplogDaily(rows) => rows.len(),
            MetricPayload::SleeplogSummary(rows) => rows.len(),
            MetricPayload::Spo2(rows) => rows.len(),
            MetricPayload::Spo2Daily(rows) => rows.len(),
            MetricPayload::StepsHourly(rows) => rows.len(),
            MetricPayload::StepsDaily(rows) => rows.len(),
            MetricPayload::Vo2Max(rows) => rows.len(),
            MetricPayload::BloodPressureDaily(rows) => rows.len(),
            MetricPayload::BloodPressureDetail(rows) => rows.len(),
            MetricPayload::Exercise(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn decode<T: DeserializeOwned>(docs: Vec<Document>) -> Result<Vec<T>, MetricsError> {
    docs.into_iter()
        .map(|doc| bson::from_document(doc).map_err(MetricsError::from))
        .collect()
}

/// Reads and decodes every document of `collection` in the range.
pub async fn fetch<T: DeserializeOwned>(
    store: &dyn MetricStore,
    kind: MetricKind,
    range: &DateRange,
) -> Result<Vec<T>, MetricsError> {
    let docs = store.find_by_date(kind.collection(), range).await?;
    decode(docs)
}

pub async fn load_metric(
    store: &dyn MetricStore,
    kind: MetricKind,
    range: &DateRange,
) -> Result<MetricPayload, MetricsError> {
    let payload = match kind {
        MetricKind::Br => {
            let docs: Vec<BreathingRateDoc> = fetch(store, kind, range).await?;
            MetricPayload::BreathingRate(docs.into_iter().filter(breathing_rate_is_plausible).collect())
        }
        MetricKind::Hr => {
            let docs: Vec<HeartRateDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::HeartRate(docs.iter().flat_map(HeartRateDayDoc::points).collect())
        }
        MetricKind::HrZones => {
            let docs: Vec<HeartRateDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::HeartRateZones(docs.iter().flat_map(HeartRateDayDoc::zones).collect())
        }
        MetricKind::HrDaily => {
            let docs: Vec<HeartRateDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::HeartRateDaily(docs.iter().map(HeartRateDayDoc::daily).collect())
        }
        MetricKind::Hrv => {
            let docs: Vec<HrvDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::Hrv(docs.iter().flat_map(HrvDayDoc::points).collect())
        }
        MetricKind::HrvDaily => {
            let docs: Vec<HrvDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::HrvDaily(
                docs.iter()
                    .filter(|doc| hrv_day_is_plausible(doc))
                    .map(HrvDayDoc::daily)
                    .collect(),
            )
        }
        MetricKind::HrvDistribution => {
            let docs: Vec<HrvDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::HrvDistribution(hrv_distribution(&docs))
        }
        MetricKind::Sleeplog => {
            let docs: Vec<SleeplogDoc> = fetch(store, kind, range).await?;
            MetricPayload::Sleeplog(raw_segments(&docs))
        }
        MetricKind::SleeplogDaily => {
            let docs: Vec<SleeplogDoc> = fetch(store, kind, range).await?;
            MetricPayload::SleeplogDaily(docs.iter().map(SleeplogDoc::daily).collect())
        }
        MetricKind::SleeplogSummary => {
            let docs: Vec<SleeplogDoc> = fetch(store, kind, range).await?;
            MetricPayload::SleeplogSummary(docs.iter().map(SleeplogDoc::summary).collect())
        }
        MetricKind::Spo2 => {
            let docs: Vec<Spo2DayDoc> = fetch(store, kind, range).await?;
            MetricPayload::Spo2(docs.iter().flat_map(Spo2DayDoc::points).collect())
        }
        MetricKind::Spo2Daily => {
            let docs: Vec<Spo2DayDoc> = fetch(store, kind, range).await?;
            MetricPayload::Spo2Daily(docs.iter().map(Spo2DayDoc::daily).collect())
        }
        MetricKind::StepsHourly => {
            let docs: Vec<StepsDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::StepsHourly(cumulative_steps(&hourly_steps(&docs)))
        }
        MetricKind::StepsDaily => {
            let docs: Vec<StepsDayDoc> = fetch(store, kind, range).await?;
            MetricPayload::StepsDaily(docs.iter().map(StepsDayDoc::daily).collect())
        }
        MetricKind::Vo2Max => MetricPayload::Vo2Max(fetch(store, kind, range).await?),
        MetricKind::BpDaily => MetricPayload::BloodPressureDaily(blood_pressure_daily(fetch(store, kind, range).await?)),
        MetricKind::BpDetail => MetricPayload::BloodPressureDetail(fetch(store, kind, range).await?),
        MetricKind::ExerciseDetail => MetricPayload::Exercise(fetch(store, kind, range).await?),
    };

    Ok(payload)
}
