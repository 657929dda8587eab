use crate::metrics::aggregate::round1;
use crate::metrics::error::MetricsError;

/// Least-squares line through the valid points of `series`, with `x = index + 1`.
///
/// Positions whose input is missing or not finite stay `None` in the output.
/// With fewer than two valid points there is no line and every position is
/// `None`.
pub fn trend_line(series: &[Option<f64>]) -> Result<Vec<Option<f64>>, MetricsError> {
    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .filter_map(|(i, value)| match value {
            Some(y) if y.is_finite() => Some(((i + 1) as f64, *y)),
            _ => None,
        })
        .collect();

    if points.len() < 2 {
        return Ok(vec![None; series.len()]);
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;
    for &(x, y) in &points {
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return Err(MetricsError::DegenerateInput);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Ok(series
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Some(y) if y.is_finite() => Some(round1(slope * (i + 1) as f64 + intercept)),
            _ => None,
        })
        .collect())
}
