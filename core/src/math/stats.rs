use crate::prelude::ChartSeries;

pub struct RateHelper;

impl RateHelper {
    /// Average per-second rate of `count` events over `window_secs`.
    pub fn per_second(count: u64, window_secs: u64) -> f64 {
        if window_secs == 0 {
            return 0.0;
        }
        count as f64 / window_secs as f64
    }

    /// Largest finite sample across all series, never below zero.
    pub fn peak(series: &[ChartSeries]) -> f64 {
        series
            .iter()
            .flat_map(|entry| entry.points.iter())
            .map(|point| point.value)
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }
}
