//! Two independent refresh loops driving the dashboard display.
//!
//! The graph loop re-arms only after its fetch settled. The table loop ticks
//! at a fixed rate but never starts a refresh while the previous one is
//! still in flight. Both stop when the shared cancellation token fires.

pub mod graph;
pub mod sink;
pub mod table;

#[cfg(test)]
pub(crate) mod testing;

pub use graph::{GraphLoop, TickOutcome};
pub use sink::{DashboardEvent, DashboardSink};
pub use table::TableLoop;

use crate::client::SentimentSource;
use crate::config::DashboardConfig;
use crate::telemetry::DashboardMetrics;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct Dashboard {
    graph: GraphLoop,
    table: TableLoop,
    metrics: Arc<DashboardMetrics>,
}

impl Dashboard {
    pub fn new(
        config: DashboardConfig,
        source: Arc<dyn SentimentSource>,
        sink: Arc<dyn DashboardSink>,
    ) -> Self {
        let config = Arc::new(config);
        let metrics = Arc::new(DashboardMetrics::default());
        Self {
            graph: GraphLoop::new(config.clone(), source.clone(), sink.clone(), metrics.clone()),
            table: TableLoop::new(config, source, sink, metrics.clone()),
            metrics,
        }
    }

    pub fn metrics(&self) -> Arc<DashboardMetrics> {
        self.metrics.clone()
    }

    /// Drives both loops until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        tokio::join!(self.graph.run(cancel.clone()), self.table.run(cancel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{counts, RecordingSink, ScriptedSource};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn both_loops_publish_until_cancelled() {
        let source = Arc::new(ScriptedSource {
            aggregates: Some(counts(7, 2, 1)),
            ..ScriptedSource::with_counts(vec![Some(counts(10, 0, 0)); 8])
        });
        let sink = Arc::new(RecordingSink::default());
        let dashboard = Dashboard::new(DashboardConfig::default(), source, sink.clone());
        let metrics = dashboard.metrics();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(dashboard.run(cancel.clone()));

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(sink.charts(), 6);
        assert_eq!(sink.totals().len(), 2);
        assert_eq!(sink.totals()[0].all, 10);
        assert_eq!(metrics.graph.snapshot().succeeded, 6);
        assert_eq!(metrics.table.snapshot().failed, 0);

        let events_at_stop = sink.events().len();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sink.events().len(), events_at_stop);
    }

    #[tokio::test]
    async fn channel_sink_delivers_events_in_order() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let source = Arc::new(ScriptedSource {
            aggregates: Some(counts(1, 0, 0)),
            ..Default::default()
        });
        let sink: Arc<dyn DashboardSink> = Arc::new(tx);
        let table = TableLoop::new(
            Arc::new(DashboardConfig::default()),
            source,
            sink,
            Arc::default(),
        );

        table.refresh(&CancellationToken::new()).await;
        assert!(matches!(rx.recv().await, Some(DashboardEvent::Totals(_))));
        assert!(matches!(rx.recv().await, Some(DashboardEvent::Table(_))));
    }
}
