use crate::models::steps::{CumulativeStepRecord, HourlySteps};

/// Percentage of the daily total reached so far, rounded up.
fn cumulative_pct(cumulative: i64, total_steps: Option<i64>) -> i64 {
    match total_steps {
        Some(total) if total > 0 => ((cumulative as f64 / total as f64) * 100.0).ceil() as i64,
        _ => 0,
    }
}

/// Running step total per day. Input must be sorted by date then hour.
///
/// A null boundary record (`"{date} 23:59:00"`) closes every day, so the
/// chart draws a break instead of connecting one day's total to the next
/// day's first hour.
pub fn cumulative_steps(hourly: &[HourlySteps]) -> Vec<CumulativeStepRecord> {
    let mut records = Vec::with_capacity(hourly.len() + hourly.len() / 24 + 1);
    let mut current_date: Option<&str> = None;
    let mut cumulative = 0i64;

    for item in hourly {
        if current_date != Some(item.date.as_str()) {
            if let Some(previous) = current_date {
                records.push(CumulativeStepRecord::boundary(previous));
            }
            current_date = Some(item.date.as_str());
            cumulative = 0;
        }

        cumulative += item.steps;

        records.push(CumulativeStepRecord {
            date_time: item.date_time.clone(),
            date: Some(item.date.clone()),
            steps: Some(item.steps),
            total_steps: item.total_steps,
            hour_gt250_steps: item.hour_gt250_steps,
            cumulative_steps: Some(cumulative),
            cumulative_steps_pct: Some(cumulative_pct(cumulative, item.total_steps)),
        });
    }

    if let Some(last) = current_date {
        records.push(CumulativeStepRecord::boundary(last));
    }

    records
}
