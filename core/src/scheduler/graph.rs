use crate::client::SentimentSource;
use crate::config::DashboardConfig;
use crate::math::RateHelper;
use crate::prelude::{Category, FetchResult};
use crate::scheduler::sink::{DashboardEvent, DashboardSink};
use crate::series::SeriesSet;
use crate::snapshot::CountSnapshot;
use crate::telemetry::{DashboardMetrics, LogManager};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What a single graph iteration did to the series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Pushed,
    Skipped,
}

/// Polls windowed counts and feeds one rate sample per category into the
/// rolling series. The next poll is armed only after the previous one
/// settled, so at most one counts request is in flight.
pub struct GraphLoop {
    config: Arc<DashboardConfig>,
    source: Arc<dyn SentimentSource>,
    sink: Arc<dyn DashboardSink>,
    series: SeriesSet,
    metrics: Arc<DashboardMetrics>,
    logger: LogManager,
}

impl GraphLoop {
    pub fn new(
        config: Arc<DashboardConfig>,
        source: Arc<dyn SentimentSource>,
        sink: Arc<dyn DashboardSink>,
        metrics: Arc<DashboardMetrics>,
    ) -> Self {
        let series = SeriesSet::zeroed(config.window_len);
        Self {
            config,
            source,
            sink,
            series,
            metrics,
            logger: LogManager::new("graph"),
        }
    }

    pub fn series(&self) -> &SeriesSet {
        &self.series
    }

    async fn fetch(&self) -> FetchResult<CountSnapshot> {
        self.source
            .counts(&Category::ALL, self.config.interpolation_secs)
            .await
    }

    /// Pushes on success only, then publishes the chart either way.
    fn apply(&mut self, fetched: FetchResult<CountSnapshot>, now_ms: i64) -> TickOutcome {
        let outcome = match fetched {
            Ok(counts) => {
                for category in Category::ALL {
                    let rate =
                        RateHelper::per_second(counts.get(category), self.config.interpolation_secs);
                    self.series.push(category, rate);
                }
                self.metrics.graph.record_success();
                TickOutcome::Pushed
            }
            Err(err) => {
                self.metrics.graph.record_failure();
                self.logger.skipped("counts sample", &err);
                TickOutcome::Skipped
            }
        };

        let chart = self
            .series
            .chart_series(now_ms, self.config.sample_interval_ms as i64);
        self.sink.publish(DashboardEvent::Chart(chart));
        outcome
    }

    /// One fetch-push-publish iteration stamped at `now_ms`.
    pub async fn tick(&mut self, now_ms: i64) -> TickOutcome {
        let fetched = self.fetch().await;
        self.apply(fetched, now_ms)
    }

    pub async fn run(mut self, cancel: CancellationToken) {
        self.logger.record(&format!(
            "started: {} samples, {}s interpolation, every {}ms",
            self.config.window_len, self.config.interpolation_secs, self.config.graph_interval_ms
        ));

        while !cancel.is_cancelled() {
            let fetched = self.fetch().await;
            if cancel.is_cancelled() {
                self.logger.trace("discarding counts received after shutdown");
                break;
            }
            self.apply(fetched, current_millis());

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.config.graph_interval()) => {}
            }
        }

        self.logger.record("stopped");
    }
}

pub(crate) fn current_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{counts, RecordingSink, ScriptedSource};
    use std::time::Duration;
    use tokio::sync::Notify;

    fn config(window_len: usize) -> Arc<DashboardConfig> {
        Arc::new(DashboardConfig {
            window_len,
            ..Default::default()
        })
    }

    fn samples(series: &SeriesSet, category: Category) -> Vec<f64> {
        series.buffer(category).samples().collect()
    }

    #[tokio::test]
    async fn failed_tick_leaves_series_unchanged() {
        let source = Arc::new(ScriptedSource::with_counts(vec![
            None,
            Some(counts(20, 10, 0)),
        ]));
        let sink = Arc::new(RecordingSink::default());
        let metrics = Arc::new(DashboardMetrics::default());
        let mut graph = GraphLoop::new(config(3), source, sink.clone(), metrics.clone());

        assert_eq!(graph.tick(10_000).await, TickOutcome::Skipped);
        assert_eq!(samples(graph.series(), Category::Positive), vec![0.0; 3]);
        assert_eq!(sink.charts(), 1);

        assert_eq!(graph.tick(11_000).await, TickOutcome::Pushed);
        assert_eq!(samples(graph.series(), Category::Positive), vec![0.0, 0.0, 2.0]);
        assert_eq!(samples(graph.series(), Category::Negative), vec![0.0, 0.0, 1.0]);
        assert_eq!(samples(graph.series(), Category::Neutral), vec![0.0; 3]);

        let stats = metrics.graph.snapshot();
        assert_eq!((stats.succeeded, stats.failed), (1, 1));
    }

    #[tokio::test]
    async fn chart_is_stamped_back_from_now() {
        let source = Arc::new(ScriptedSource::with_counts(vec![Some(counts(5, 0, 0))]));
        let sink = Arc::new(RecordingSink::default());
        let mut graph =
            GraphLoop::new(config(2), source, sink.clone(), Arc::default());

        graph.tick(60_000).await;
        let events = sink.events();
        let DashboardEvent::Chart(series) = &events[0] else {
            panic!("expected a chart event");
        };
        let positive = &series[0];
        assert_eq!(positive.category, Category::Positive);
        assert_eq!(positive.points[0].timestamp_ms, 58_000);
        assert_eq!(positive.points[1].timestamp_ms, 59_000);
        assert_eq!(positive.points[1].value, 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_recovers_after_a_failed_poll() {
        let source = Arc::new(ScriptedSource::with_counts(vec![
            Some(counts(10, 0, 0)),
            None,
            Some(counts(30, 0, 0)),
        ]));
        let sink = Arc::new(RecordingSink::default());
        let metrics = Arc::new(DashboardMetrics::default());
        let graph = GraphLoop::new(config(4), source, sink.clone(), metrics.clone());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(graph.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(sink.charts(), 3);
        let events = sink.events();
        let Some(DashboardEvent::Chart(last)) = events.last() else {
            panic!("expected a chart event");
        };
        let values: Vec<f64> = last[0].points.iter().map(|point| point.value).collect();
        assert_eq!(values, vec![0.0, 0.0, 1.0, 3.0]);
        assert_eq!(metrics.graph.snapshot().failed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn response_after_cancel_is_discarded() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(ScriptedSource {
            gate: Some(gate.clone()),
            ..ScriptedSource::with_counts(vec![Some(counts(10, 10, 10))])
        });
        let sink = Arc::new(RecordingSink::default());
        let metrics = Arc::new(DashboardMetrics::default());
        let graph = GraphLoop::new(config(4), source, sink.clone(), metrics.clone());
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(graph.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        gate.notify_one();
        handle.await.unwrap();

        assert!(sink.events().is_empty());
        assert_eq!(metrics.graph.snapshot().succeeded, 0);
    }

    #[tokio::test]
    async fn cancelled_before_start_never_fetches() {
        let source = Arc::new(ScriptedSource::with_counts(vec![Some(counts(1, 1, 1))]));
        let sink = Arc::new(RecordingSink::default());
        let graph = GraphLoop::new(config(4), source.clone(), sink.clone(), Arc::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        graph.run(cancel).await;
        assert!(sink.events().is_empty());
        assert_eq!(source.counts.lock().unwrap().len(), 1);
    }
}
