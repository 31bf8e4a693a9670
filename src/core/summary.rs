use crate::domain::model::{ClassifiedYear, ClimateSummary};

/// Least-squares slope of `values` against `years`.
///
/// Returns 0 for fewer than two points, or when all years are equal.
pub fn linear_trend(years: &[i32], values: &[f64]) -> f64 {
    let n = years.len();
    if n < 2 || n != values.len() {
        return 0.0;
    }

    let n_f = n as f64;
    let mean_x = years.iter().map(|&y| y as f64).sum::<f64>() / n_f;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&year, &value) in years.iter().zip(values.iter()) {
        let dx = year as f64 - mean_x;
        sxy += dx * (value - mean_y);
        sxx += dx * dx;
    }

    if sxx == 0.0 {
        0.0
    } else {
        sxy / sxx
    }
}

/// Period statistics over classified years. `None` for an empty period.
pub fn summarize(years: &[ClassifiedYear]) -> Option<ClimateSummary> {
    let last = years.last()?;
    let n = years.len() as f64;

    let year_axis: Vec<i32> = years.iter().map(|y| y.year).collect();
    let temps: Vec<f64> = years.iter().map(|y| y.tmean_c).collect();
    let precs: Vec<f64> = years.iter().map(|y| y.prec_mm).collect();

    Some(ClimateSummary {
        mean_temp_c: temps.iter().sum::<f64>() / n,
        mean_prec_mm: precs.iter().sum::<f64>() / n,
        temp_trend_c_per_year: linear_trend(&year_axis, &temps),
        prec_trend_mm_per_year: linear_trend(&year_axis, &precs),
        latest_class: last.class,
    })
}
