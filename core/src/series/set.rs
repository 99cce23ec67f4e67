use crate::prelude::{Category, ChartSeries, PlotPoint};
use crate::series::buffer::SeriesBuffer;

/// One rolling window per category, created zero-filled.
#[derive(Debug, Clone)]
pub struct SeriesSet {
    buffers: [SeriesBuffer; 3],
}

impl SeriesSet {
    pub fn zeroed(capacity: usize) -> Self {
        Self {
            buffers: Category::ALL.map(|_| SeriesBuffer::zeroed(capacity)),
        }
    }

    fn index(category: Category) -> usize {
        match category {
            Category::Positive => 0,
            Category::Negative => 1,
            Category::Neutral => 2,
        }
    }

    pub fn push(&mut self, category: Category, sample: f64) {
        self.buffers[Self::index(category)].push(sample);
    }

    pub fn buffer(&self, category: Category) -> &SeriesBuffer {
        &self.buffers[Self::index(category)]
    }

    pub fn to_points(&self, category: Category, now_ms: i64, sample_interval_ms: i64) -> Vec<PlotPoint> {
        self.buffer(category).to_points(now_ms, sample_interval_ms)
    }

    /// Chart-ready series for every category, in display order.
    pub fn chart_series(&self, now_ms: i64, sample_interval_ms: i64) -> Vec<ChartSeries> {
        Category::ALL
            .iter()
            .map(|&category| ChartSeries {
                category,
                label: category.label(),
                color: category.color(),
                points: self.to_points(category, now_ms, sample_interval_ms),
            })
            .collect()
    }
}
