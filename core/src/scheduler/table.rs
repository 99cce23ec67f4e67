use crate::client::SentimentSource;
use crate::config::DashboardConfig;
use crate::prelude::{Category, FetchResult};
use crate::scheduler::sink::{DashboardEvent, DashboardSink};
use crate::snapshot::{AggregateSnapshot, DisplayTotals, SnapshotTable};
use crate::telemetry::{DashboardMetrics, LogManager};
use futures::future::join_all;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Refreshes the totals row and the per-category tables on a fixed rate.
///
/// Each refresh issues all of its requests at once and waits for every one
/// of them before the next tick is taken; ticks missed meanwhile are skipped.
pub struct TableLoop {
    config: Arc<DashboardConfig>,
    source: Arc<dyn SentimentSource>,
    sink: Arc<dyn DashboardSink>,
    metrics: Arc<DashboardMetrics>,
    logger: LogManager,
}

struct Fetched {
    totals: FetchResult<AggregateSnapshot>,
    tables: Vec<FetchResult<SnapshotTable>>,
}

impl TableLoop {
    pub fn new(
        config: Arc<DashboardConfig>,
        source: Arc<dyn SentimentSource>,
        sink: Arc<dyn DashboardSink>,
        metrics: Arc<DashboardMetrics>,
    ) -> Self {
        Self {
            config,
            source,
            sink,
            metrics,
            logger: LogManager::new("tables"),
        }
    }

    async fn fetch(&self) -> Fetched {
        let recent = join_all(Category::ALL.map(|category| self.source.recent(category)));
        let (totals, tables) = tokio::join!(self.source.aggregates(), recent);
        Fetched { totals, tables }
    }

    fn apply(&self, fetched: Fetched) -> usize {
        let mut published = 0;

        match fetched.totals {
            Ok(snapshot) => {
                self.metrics.table.record_success();
                self.sink
                    .publish(DashboardEvent::Totals(DisplayTotals::from(&snapshot)));
                published += 1;
            }
            Err(err) => {
                self.metrics.table.record_failure();
                self.logger.skipped("totals", &err);
            }
        }

        for (category, result) in Category::ALL.into_iter().zip(fetched.tables) {
            match result {
                Ok(table) => {
                    self.metrics.table.record_success();
                    self.sink.publish(DashboardEvent::Table(table));
                    published += 1;
                }
                Err(err) => {
                    self.metrics.table.record_failure();
                    self.logger
                        .skipped(&format!("{category} table"), &err);
                }
            }
        }

        published
    }

    /// Runs one refresh and returns how many display updates it published,
    /// or `None` when `cancel` fired while the requests were in flight.
    pub async fn refresh(&self, cancel: &CancellationToken) -> Option<usize> {
        let fetched = self.fetch().await;
        if cancel.is_cancelled() {
            self.logger.trace("discarding table refresh received after shutdown");
            return None;
        }
        Some(self.apply(fetched))
    }

    pub async fn run(self, cancel: CancellationToken) {
        self.logger.record(&format!(
            "started: refresh every {}ms",
            self.config.table_interval_ms
        ));

        let mut ticker = tokio::time::interval(self.config.table_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if self.refresh(&cancel).await.is_none() {
                break;
            }
        }

        self.logger.record("stopped");
    }
}
