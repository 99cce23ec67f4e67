use crate::prelude::PlotPoint;
use std::collections::VecDeque;

/// Fixed-capacity rolling window of samples, oldest first.
///
/// Once full, every push evicts the oldest sample so the length never
/// exceeds the capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SeriesBuffer {
    /// Empty buffer that fills up to `capacity` and then rolls.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Buffer already holding `capacity` zero samples.
    pub fn zeroed(capacity: usize) -> Self {
        let mut buffer = Self::with_capacity(capacity);
        buffer.samples.resize(buffer.capacity, 0.0);
        buffer
    }

    /// Appends `sample` as the newest element. Values are stored unchecked.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Pairs each sample with a timestamp counted back from `now_ms`.
    ///
    /// For a buffer of length `L` the i-th point is stamped
    /// `now_ms - (L - i) * sample_interval_ms`.
    pub fn to_points(&self, now_ms: i64, sample_interval_ms: i64) -> Vec<PlotPoint> {
        let len = self.samples.len() as i64;
        self.samples
            .iter()
            .enumerate()
            .map(|(idx, &value)| PlotPoint {
                timestamp_ms: now_ms - (len - idx as i64) * sample_interval_ms,
                value,
            })
            .collect()
    }

    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(buffer: &SeriesBuffer) -> Vec<f64> {
        buffer.samples().collect()
    }

    #[test]
    fn zeroed_buffer_stays_full_on_every_push() {
        let mut buffer = SeriesBuffer::zeroed(300);
        assert_eq!(buffer.len(), 300);
        for step in 0..300 {
            buffer.push(step as f64);
            assert_eq!(buffer.len(), 300);
        }
        assert_eq!(buffer.samples().next(), Some(0.0));
        assert_eq!(buffer.samples().last(), Some(299.0));
    }

    #[test]
    fn fifo_eviction_follows_push_order() {
        let mut buffer = SeriesBuffer::zeroed(5);
        buffer.push(3.0);
        buffer.push(7.0);
        buffer.push(2.0);
        assert_eq!(contents(&buffer), vec![0.0, 0.0, 3.0, 7.0, 2.0]);

        buffer.push(9.0);
        buffer.push(1.0);
        assert_eq!(contents(&buffer), vec![3.0, 7.0, 2.0, 9.0, 1.0]);
    }

    #[test]
    fn overfilling_keeps_the_last_capacity_samples() {
        let mut buffer = SeriesBuffer::with_capacity(4);
        assert!(buffer.is_empty());
        for value in 1..=10 {
            buffer.push(value as f64);
        }
        assert_eq!(contents(&buffer), vec![7.0, 8.0, 9.0, 10.0]);
    }

    #[test]
    fn growing_buffer_reports_partial_length() {
        let mut buffer = SeriesBuffer::with_capacity(4);
        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.to_points(10_000, 1_000).len(), 2);
    }

    #[test]
    fn points_are_spaced_by_the_sample_interval() {
        let mut buffer = SeriesBuffer::zeroed(3);
        buffer.push(4.0);
        buffer.push(5.0);

        let points = buffer.to_points(10_000, 1_000);
        assert_eq!(
            points,
            vec![
                PlotPoint { timestamp_ms: 7_000, value: 0.0 },
                PlotPoint { timestamp_ms: 8_000, value: 4.0 },
                PlotPoint { timestamp_ms: 9_000, value: 5.0 },
            ]
        );
        for pair in points.windows(2) {
            assert_eq!(pair[1].timestamp_ms - pair[0].timestamp_ms, 1_000);
        }
    }

    #[test]
    fn to_points_does_not_mutate() {
        let mut buffer = SeriesBuffer::zeroed(5);
        buffer.push(1.5);
        let before = buffer.clone();

        let first = buffer.to_points(50_000, 250);
        let second = buffer.to_points(50_000, 250);
        assert_eq!(first, second);
        assert_eq!(buffer, before);
    }

    #[test]
    fn unchecked_samples_are_stored_as_is() {
        let mut buffer = SeriesBuffer::zeroed(2);
        buffer.push(-1.0);
        buffer.push(f64::INFINITY);
        assert_eq!(contents(&buffer), vec![-1.0, f64::INFINITY]);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut buffer = SeriesBuffer::zeroed(0);
        assert_eq!(buffer.capacity(), 1);
        buffer.push(2.0);
        assert_eq!(contents(&buffer), vec![2.0]);
    }
}
