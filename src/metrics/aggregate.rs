//! Grouping and reductions over per-day / per-hour records, plus the
//! data-quality filters some metrics apply before anything is returned.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Timelike;

use crate::metrics::error::MetricsError;
use crate::models::common::{to_utc, Stats};
use crate::models::heart_rate::{HrvDayDoc, HrvDistribution, HrvRangeShare};
use crate::models::respiratory::BreathingRateDoc;
use crate::models::steps::{HourlySteps, StepsDayDoc};
use crate::models::vitals::{BloodPressureDay, BloodPressureReading};

/// Breathing rates are trusted only strictly inside this band.
pub const BREATHING_RATE_BAND: (f64, f64) = (5.0, 20.0);
/// Days whose peak RMSSD reaches this value are sensor artifacts.
pub const HRV_MAX_RMSSD_CEILING: f64 = 125.0;
/// Bin label that always sorts last.
const OPEN_ENDED_BIN: &str = "100+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Day,
    Hour,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BucketKey {
    pub date: String,
    pub hour: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    pub count: usize,
    pub sum: f64,
    /// Rounded to one decimal, ties to even.
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Reduction {
    /// Non-finite values are ignored. Nothing left to reduce is an
    /// `EmptySeries` error rather than a NaN average.
    pub fn from_values<I>(values: I) -> Result<Self, MetricsError>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for value in values.into_iter().filter(|v| v.is_finite()) {
            count += 1;
            sum += value;
            min = min.min(value);
            max = max.max(value);
        }

        if count == 0 {
            return Err(MetricsError::EmptySeries);
        }

        Ok(Self {
            count,
            sum,
            avg: round1_half_even(sum / count as f64),
            min,
            max,
        })
    }

    pub fn stats(&self) -> Stats {
        Stats {
            avg: self.avg,
            min: self.min,
            max: self.max,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub key: BucketKey,
    /// `None` when the group had no usable values.
    pub reduction: Option<Reduction>,
}

/// Ties away from zero, as the dashboard rounds trend values.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Ties to even, as the store's `$round` does for grouped averages.
pub fn round1_half_even(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

pub fn mean<I>(values: I) -> Result<f64, MetricsError>
where
    I: IntoIterator<Item = f64>,
{
    Reduction::from_values(values).map(|r| r.sum / r.count as f64)
}

/// Groups records by date (or date and hour), ascending, keeping input order
/// inside each group.
pub fn group_records<T, K>(records: impl IntoIterator<Item = T>, group_by: GroupBy, key: K) -> Vec<(BucketKey, Vec<T>)>
where
    K: Fn(&T) -> (String, u32),
{
    let mut groups: BTreeMap<BucketKey, Vec<T>> = BTreeMap::new();
    for record in records {
        let (date, hour) = key(&record);
        let bucket_key = BucketKey {
            date,
            hour: match group_by {
                GroupBy::Day => None,
                GroupBy::Hour => Some(hour),
            },
        };
        groups.entry(bucket_key).or_default().push(record);
    }
    groups.into_iter().collect()
}

pub fn aggregate<T, K, V>(records: impl IntoIterator<Item = T>, group_by: GroupBy, key: K, value: V) -> Vec<Bucket>
where
    K: Fn(&T) -> (String, u32),
    V: Fn(&T) -> Option<f64>,
{
    group_records(records, group_by, key)
        .into_iter()
        .map(|(key, items)| Bucket {
            key,
            reduction: Reduction::from_values(items.iter().filter_map(&value)).ok(),
        })
        .collect()
}

pub fn breathing_rate_is_plausible(doc: &BreathingRateDoc) -> bool {
    let (low, high) = BREATHING_RATE_BAND;
    doc.sub_metrics()
        .iter()
        .all(|rate| matches!(rate, Some(r) if *r > low && *r < high))
}

pub fn hrv_day_is_plausible(doc: &HrvDayDoc) -> bool {
    matches!(doc.daily_max_rmssd, Some(max) if max < HRV_MAX_RMSSD_CEILING)
}

/// Unwinds intraday step counts and sums them per `(date, hour)`.
pub fn hourly_steps(docs: &[StepsDayDoc]) -> Vec<HourlySteps> {
    let samples = docs.iter().flat_map(|doc| {
        doc.measurements.iter().filter_map(move |m| {
            let at = to_utc(&m.date_time)?;
            Some((doc, at.hour(), m.steps))
        })
    });

    group_records(samples, GroupBy::Hour, |(doc, hour, _)| (doc.date.clone(), *hour))
        .into_iter()
        .map(|(key, items)| {
            let hour = key.hour.unwrap_or_default();
            let first = items[0].0;
            HourlySteps {
                date_time: format!("{} {}:00:00", key.date, hour),
                date: key.date,
                hour,
                steps: items.iter().map(|(_, _, steps)| steps).sum(),
                total_steps: first.total_steps,
                hour_gt250_steps: first.hour_gt250_steps,
            }
        })
        .collect()
}

/// Daily blood pressure statistics; a day without any heart-rate reading
/// gets `heartRate: null`.
pub fn blood_pressure_daily(readings: Vec<BloodPressureReading>) -> Vec<BloodPressureDay> {
    group_records(readings, GroupBy::Day, |r| (r.date.clone(), 0))
        .into_iter()
        .map(|(key, readings)| {
            let stats = |field: fn(&BloodPressureReading) -> Option<f64>| {
                Reduction::from_values(readings.iter().filter_map(field))
                    .ok()
                    .map(|r| r.stats())
            };
            BloodPressureDay {
                systolic: stats(|r| r.systolic),
                diastolic: stats(|r| r.diastolic),
                heart_rate: stats(|r| r.heart_rate),
                readings: readings.len(),
                date: key.date,
            }
        })
        .collect()
}

/// Lower bound of a bin label such as `"40-50"`; the open-ended bin sorts last.
fn bin_order(label: &str) -> (bool, f64) {
    if label == OPEN_ENDED_BIN {
        return (true, f64::INFINITY);
    }
    let lower = label
        .split('-')
        .next()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(f64::INFINITY);
    (false, lower)
}

/// Percentage of HRV measurements per RMSSD bin, per day.
pub fn hrv_distribution(docs: &[HrvDayDoc]) -> HrvDistribution {
    let mut counts: BTreeMap<&str, BTreeMap<&str, usize>> = BTreeMap::new();
    let mut labels: BTreeSet<&str> = BTreeSet::new();

    for doc in docs {
        for m in &doc.measurements {
            let Some(range) = m.rmssd_bin_range.as_deref() else {
                continue;
            };
            labels.insert(range);
            *counts.entry(doc.date.as_str()).or_default().entry(range).or_default() += 1;
        }
    }

    let mut ranges: Vec<&str> = labels.into_iter().collect();
    ranges.sort_by(|a, b| bin_order(a).partial_cmp(&bin_order(b)).unwrap_or(std::cmp::Ordering::Equal));

    let shares = ranges
        .iter()
        .map(|range| HrvRangeShare {
            range: range.to_string(),
            percentages: counts
                .values()
                .map(|per_range| {
                    let total: usize = per_range.values().sum();
                    let hits = per_range.get(range).copied().unwrap_or(0);
                    hits as f64 / total as f64 * 100.0
                })
                .collect(),
        })
        .collect();

    HrvDistribution {
        dates: counts.keys().map(|d| d.to_string()).collect(),
        ranges: shares,
    }
}
