//! Composed views: trailing series with trend, the one-day snapshot and the
//! sleep pages.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::db::MetricStore;
use crate::metrics::aggregate::{breathing_rate_is_plausible, hourly_steps, hrv_day_is_plausible, mean, round1};
use crate::metrics::descriptor::{MetricKind, UnknownMetric};
use crate::metrics::error::MetricsError;
use crate::metrics::pipeline::fetch;
use crate::metrics::range::{previous_day, DateRange};
use crate::metrics::sleep_stages::{map_stages, raw_segments, sleep_window};
use crate::metrics::trend::trend_line;
use crate::models::dashboard::{SeriesResponse, SleepNight, SleepToday, StepsToday, TodaySnapshot};
use crate::models::heart_rate::{HeartRateDayDoc, HrvDayDoc};
use crate::models::respiratory::{BreathingRateDoc, Spo2DayDoc, Vo2MaxDoc};
use crate::models::sleep::{SleepStages, SleeplogDoc};
use crate::models::steps::StepsDayDoc;

/// Hours at or above this step count are "active" hours.
const ACTIVE_HOUR_MIN_STEPS: i64 = 250;
const MAF_BASE: u32 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    RestingHeartRate,
    TotalSteps,
    HoursOver250Steps,
    HrvAverage,
    FullSleepBr,
    Spo2Average,
    Vo2MaxHigh,
    HoursAsleep,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 8] = [
        SeriesKind::RestingHeartRate,
        SeriesKind::TotalSteps,
        SeriesKind::HoursOver250Steps,
        SeriesKind::HrvAverage,
        SeriesKind::FullSleepBr,
        SeriesKind::Spo2Average,
        SeriesKind::Vo2MaxHigh,
        SeriesKind::HoursAsleep,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SeriesKind::RestingHeartRate => "resting_heart_rate",
            SeriesKind::TotalSteps => "total_steps",
            SeriesKind::HoursOver250Steps => "hours_over_250_steps",
            SeriesKind::HrvAverage => "hrv_average",
            SeriesKind::FullSleepBr => "full_sleep_br",
            SeriesKind::Spo2Average => "spo2_average",
            SeriesKind::Vo2MaxHigh => "vo2max_high",
            SeriesKind::HoursAsleep => "hours_asleep",
        }
    }

    /// Metric whose daily documents feed the series.
    pub fn source(&self) -> MetricKind {
        match self {
            SeriesKind::RestingHeartRate => MetricKind::HrDaily,
            SeriesKind::TotalSteps | SeriesKind::HoursOver250Steps => MetricKind::StepsDaily,
            SeriesKind::HrvAverage => MetricKind::HrvDaily,
            SeriesKind::FullSleepBr => MetricKind::Br,
            SeriesKind::Spo2Average => MetricKind::Spo2Daily,
            SeriesKind::Vo2MaxHigh => MetricKind::Vo2Max,
            SeriesKind::HoursAsleep => MetricKind::SleeplogDaily,
        }
    }
}

impl FromStr for SeriesKind {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeriesKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `(date, value)` per stored day. Days dropped by a data-quality filter do
/// not appear at all.
async fn daily_values(
    store: &dyn MetricStore,
    kind: SeriesKind,
    range: &DateRange,
) -> Result<Vec<(String, Option<f64>)>, MetricsError> {
    let source = kind.source();
    let values = match kind {
        SeriesKind::RestingHeartRate => fetch::<HeartRateDayDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.resting_heart_rate))
            .collect(),
        SeriesKind::TotalSteps => fetch::<StepsDayDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.total_steps.map(|steps| steps as f64)))
            .collect(),
        SeriesKind::HoursOver250Steps => fetch::<StepsDayDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.hour_gt250_steps.map(|hours| hours as f64)))
            .collect(),
        SeriesKind::HrvAverage => fetch::<HrvDayDoc>(store, source, range)
            .await?
            .into_iter()
            .filter(hrv_day_is_plausible)
            .map(|doc| (doc.date, doc.daily_average_rmssd))
            .collect(),
        SeriesKind::FullSleepBr => fetch::<BreathingRateDoc>(store, source, range)
            .await?
            .into_iter()
            .filter(breathing_rate_is_plausible)
            .map(|doc| (doc.date, doc.full_sleep_br))
            .collect(),
        SeriesKind::Spo2Average => fetch::<Spo2DayDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.daily_avg))
            .collect(),
        SeriesKind::Vo2MaxHigh => fetch::<Vo2MaxDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.vo2_max_high))
            .collect(),
        SeriesKind::HoursAsleep => fetch::<SleeplogDoc>(store, source, range)
            .await?
            .into_iter()
            .map(|doc| (doc.date, doc.minutes_asleep.map(|minutes| round1(minutes as f64 / 60.0))))
            .collect(),
    };
    Ok(values)
}

/// Builds the response from ordered `(date, value)` pairs.
pub fn build_series(kind: SeriesKind, range: &DateRange, points: Vec<(String, Option<f64>)>) -> Result<SeriesResponse, MetricsError> {
    let (dates, values): (Vec<String>, Vec<Option<f64>>) = points.into_iter().unzip();
    let trend = trend_line(&values)?;
    let average = mean(values.iter().flatten().copied()).ok().map(round1);

    Ok(SeriesResponse {
        series: kind.name().to_string(),
        start: range.start_key(),
        end: range.end_key(),
        dates,
        values,
        trend,
        average,
    })
}

/// `days` days back from `end`, with the fitted trend and the average of the
/// values that are present.
pub async fn load_series(
    store: &dyn MetricStore,
    kind: SeriesKind,
    end: NaiveDate,
    days: u32,
) -> Result<SeriesResponse, MetricsError> {
    let range = DateRange::trailing(end, days)?;
    let points = daily_values(store, kind, &range).await?;
    build_series(kind, &range, points)
}

/// Maximum aerobic function heart rate.
pub fn maf_heart_rate(age: Option<u32>) -> Option<u32> {
    age.filter(|age| *age < MAF_BASE).map(|age| MAF_BASE - age)
}

pub async fn load_today(store: &dyn MetricStore, date: NaiveDate, age: Option<u32>) -> Result<TodaySnapshot, MetricsError> {
    let range = DateRange::single_day(date)?;

    let (hr, steps, vo2max, br, spo2, sleep, hrv) = futures::try_join!(
        fetch::<HeartRateDayDoc>(store, MetricKind::HrDaily, &range),
        fetch::<StepsDayDoc>(store, MetricKind::StepsHourly, &range),
        fetch::<Vo2MaxDoc>(store, MetricKind::Vo2Max, &range),
        fetch::<BreathingRateDoc>(store, MetricKind::Br, &range),
        fetch::<Spo2DayDoc>(store, MetricKind::Spo2Daily, &range),
        fetch::<SleeplogDoc>(store, MetricKind::SleeplogDaily, &range),
        fetch::<HrvDayDoc>(store, MetricKind::HrvDaily, &range),
    )?;

    let steps_today = steps.first().map(|day| StepsToday {
        total_steps: day.total_steps,
        hours_over_250_steps: hourly_steps(&steps)
            .iter()
            .filter(|hour| hour.steps >= ACTIVE_HOUR_MIN_STEPS)
            .count(),
    });

    let sleep_today = sleep.first().map(|log| SleepToday {
        minutes_asleep: log.minutes_asleep,
        minutes_awake: log.minutes_awake,
        start_time: log.start_time.clone(),
        end_time: log.end_time.clone(),
        efficiency: log.efficiency,
    });

    Ok(TodaySnapshot {
        date: range.start_key(),
        heart_rate: hr.first().map(HeartRateDayDoc::daily),
        steps: steps_today,
        vo2max: vo2max.into_iter().next(),
        breathing_rate: br.into_iter().find(breathing_rate_is_plausible),
        spo2: spo2.first().map(Spo2DayDoc::daily),
        sleep: sleep_today,
        hrv: hrv.iter().find(|doc| hrv_day_is_plausible(doc)).map(HrvDayDoc::daily),
        maf_heart_rate: maf_heart_rate(age),
    })
}

pub async fn load_sleep_stages(store: &dyn MetricStore, range: &DateRange) -> Result<SleepStages, MetricsError> {
    let logs: Vec<SleeplogDoc> = fetch(store, MetricKind::Sleeplog, range).await?;
    let stages = map_stages(&raw_segments(&logs));
    Ok(SleepStages {
        window: sleep_window(&stages),
        stages,
    })
}

/// The night ending on `date`. A session usually starts the evening before,
/// so intraday series are read for both days and clipped to the window.
pub async fn load_sleep_night(store: &dyn MetricStore, date: NaiveDate) -> Result<SleepNight, MetricsError> {
    let SleepStages { window, stages } = load_sleep_stages(store, &DateRange::single_day(date)?).await?;

    let Some(window) = window else {
        return Ok(SleepNight {
            date: date.format("%Y-%m-%d").to_string(),
            window: None,
            stages,
            heart_rate: Vec::new(),
            hrv: Vec::new(),
            spo2: Vec::new(),
        });
    };

    let around = DateRange::for_days(previous_day(date)?, date)?;
    let (hr, hrv, spo2) = futures::try_join!(
        fetch::<HeartRateDayDoc>(store, MetricKind::Hr, &around),
        fetch::<HrvDayDoc>(store, MetricKind::Hrv, &around),
        fetch::<Spo2DayDoc>(store, MetricKind::Spo2, &around),
    )?;

    Ok(SleepNight {
        date: date.format("%Y-%m-%d").to_string(),
        window: Some(window),
        stages,
        heart_rate: hr
            .iter()
            .flat_map(HeartRateDayDoc::points)
            .filter(|point| window.contains(point.date_time))
            .collect(),
        hrv: hrv
            .iter()
            .flat_map(HrvDayDoc::points)
            .filter(|point| window.contains(point.date_time))
            .collect(),
        spo2: spo2
            .iter()
            .flat_map(Spo2DayDoc::points)
            .filter(|point| window.contains(point.date_time))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn series_names_parse_back() {
        for kind in SeriesKind::ALL {
            assert_eq!(kind.name().parse::<SeriesKind>(), Ok(kind));
        }
        assert!("weight".parse::<SeriesKind>().is_err());
    }

    #[test]
    fn series_carries_trend_and_average() {
        let range = DateRange::for_days(day(1), day(4)).unwrap();
        let points = vec![
            ("2024-03-01".to_string(), Some(60.0)),
            ("2024-03-02".to_string(), None),
            ("2024-03-03".to_string(), Some(58.0)),
            ("2024-03-04".to_string(), Some(57.0)),
        ];

        let series = build_series(SeriesKind::RestingHeartRate, &range, points).unwrap();
        assert_eq!(series.series, "resting_heart_rate");
        assert_eq!(series.start, "2024-03-01");
        assert_eq!(series.dates.len(), 4);
        assert_eq!(series.trend[1], None);
        assert_eq!(series.trend.len(), 4);
        assert_eq!(series.average, Some(58.3));
    }

    #[test]
    fn series_without_values_has_no_average() {
        let range = DateRange::single_day(day(1)).unwrap();
        let series = build_series(SeriesKind::TotalSteps, &range, vec![("2024-03-01".into(), None)]).unwrap();
        assert_eq!(series.average, None);
        assert_eq!(series.trend, vec![None]);
    }

    #[test]
    fn maf_is_180_minus_age() {
        assert_eq!(maf_heart_rate(Some(45)), Some(135));
        assert_eq!(maf_heart_rate(None), None);
        assert_eq!(maf_heart_rate(Some(200)), None);
    }
}
