use crate::models::{
    CorrelationStrength, Parameter, ParameterCorrelation, ParameterForecast, ParameterStats,
    SoilReading, SoilSummary, Trend,
};

/// Percent change below which a first-vs-last comparison counts as stable.
const TREND_TOLERANCE_PCT: f64 = 5.0;

/// Slope magnitude below which a regression direction counts as flat.
const SLOPE_DEADBAND: f64 = 0.01;

/// Only correlations with |r| above this are surfaced.
const CORRELATION_FLOOR: f64 = 0.3;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// Closed-form least-squares slope with the reading index as x.
/// Returns 0 for fewer than two points or a degenerate denominator.
pub fn regression_slope(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    if slope.is_finite() {
        slope
    } else {
        0.0
    }
}

/// Naive linear forecast: extrapolate the regression slope `steps`
/// readings past the end of the series.
pub fn linear_forecast(values: &[f64], steps: usize) -> Option<f64> {
    let last = values.last()?;
    Some(last + regression_slope(values) * steps as f64)
}

/// Direction of the regression slope with a small deadband around zero.
pub fn slope_direction(slope: f64) -> Trend {
    if slope > SLOPE_DEADBAND {
        Trend::Increasing
    } else if slope < -SLOPE_DEADBAND {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Pearson correlation coefficient. None when either series is shorter
/// than two points, the lengths differ, or a series has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    Some(cov / (var_x.sqrt() * var_y.sqrt()))
}

/// First-vs-last trend over a chronological series. Stable when the
/// percent change is under tolerance, or when the first value is 0 and
/// the percent change is undefined.
fn first_last_trend(values: &[f64]) -> Trend {
    let (first, last) = match (values.first(), values.last()) {
        (Some(f), Some(l)) if values.len() >= 2 => (*f, *l),
        _ => return Trend::Stable,
    };

    if first == 0.0 {
        return Trend::Stable;
    }

    let pct_change = (last - first) / first * 100.0;
    if pct_change.abs() < TREND_TOLERANCE_PCT {
        Trend::Stable
    } else if pct_change > 0.0 {
        Trend::Increasing
    } else {
        Trend::Decreasing
    }
}

/// `1 - stddev/average`, clamped to [0,1]; 0 when the average is 0.
fn stability(values: &[f64]) -> f64 {
    match (mean(values), std_dev(values)) {
        (Some(avg), Some(sd)) if avg != 0.0 => (1.0 - sd / avg).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn sorted_by_time(readings: &[SoilReading]) -> Vec<SoilReading> {
    let mut sorted = readings.to_vec();
    sorted.sort_by_key(|r| r.timestamp);
    sorted
}

fn series(readings: &[SoilReading], parameter: Parameter) -> Vec<f64> {
    readings.iter().filter_map(|r| r.value(parameter)).collect()
}

/// Per-parameter descriptive statistics over a reading window. The
/// window is re-sorted by timestamp internally so trends follow
/// chronological order regardless of input order. An empty window
/// yields the explicit empty summary.
pub fn summarize(readings: &[SoilReading]) -> SoilSummary {
    if readings.is_empty() {
        return SoilSummary::empty();
    }

    let sorted = sorted_by_time(readings);
    let mut parameters = Vec::new();

    for &parameter in Parameter::all() {
        let values = series(&sorted, parameter);
        if values.is_empty() {
            continue;
        }

        // mean/median/std_dev cannot fail on a non-empty series
        parameters.push(ParameterStats {
            parameter,
            count: values.len(),
            average: mean(&values).unwrap_or_default(),
            median: median(&values).unwrap_or_default(),
            std_dev: std_dev(&values).unwrap_or_default(),
            trend: first_last_trend(&values),
            stability: stability(&values),
            slope: regression_slope(&values),
        });
    }

    SoilSummary {
        count: sorted.len(),
        window_start: sorted.first().map(|r| r.timestamp),
        window_end: sorted.last().map(|r| r.timestamp),
        parameters,
    }
}

/// Project each measured parameter `steps` readings ahead along its
/// regression line. Parameters need at least two points to extrapolate.
pub fn forecasts(readings: &[SoilReading], steps: usize) -> Vec<ParameterForecast> {
    if readings.len() < 2 {
        return Vec::new();
    }

    let sorted = sorted_by_time(readings);
    Parameter::all()
        .iter()
        .filter_map(|&parameter| {
            let values = series(&sorted, parameter);
            if values.len() < 2 {
                return None;
            }
            linear_forecast(&values, steps).map(|projected| ParameterForecast {
                parameter,
                steps_ahead: steps,
                projected,
            })
        })
        .collect()
}

/// Pairwise Pearson correlations across parameters, surfaced only when
/// |r| clears the floor, bucketed by qualitative strength.
pub fn correlations(readings: &[SoilReading]) -> Vec<ParameterCorrelation> {
    if readings.len() < 2 {
        return Vec::new();
    }

    let sorted = sorted_by_time(readings);
    let all = Parameter::all();
    let mut result = Vec::new();

    for (i, &first) in all.iter().enumerate() {
        for &second in &all[i + 1..] {
            let xs = series(&sorted, first);
            let ys = series(&sorted, second);
            // Optional channels may be sparse; only compare full pairs.
            if xs.len() != sorted.len() || ys.len() != sorted.len() {
                continue;
            }

            if let Some(r) = pearson(&xs, &ys) {
                if r.abs() > CORRELATION_FLOOR {
                    result.push(ParameterCorrelation {
                        first,
                        second,
                        coefficient: r,
                        strength: CorrelationStrength::from_coefficient(r),
                    });
                }
            }
        }
    }

    result
}
