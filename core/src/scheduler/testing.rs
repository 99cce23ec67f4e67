use crate::client::SentimentSource;
use crate::prelude::{Category, FetchError, FetchResult};
use crate::scheduler::sink::{DashboardEvent, DashboardSink};
use crate::snapshot::{AggregateSnapshot, CategoryCounts, CountSnapshot, DisplayTotals, SnapshotTable};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub fn counts(positive: u64, negative: u64, neutral: u64) -> CategoryCounts {
    CategoryCounts {
        positive,
        negative,
        neutral,
    }
}

/// Backend double answering from a script; `None` entries fail with 503.
#[derive(Default)]
pub struct ScriptedSource {
    pub counts: Mutex<VecDeque<Option<CountSnapshot>>>,
    pub aggregates: Option<AggregateSnapshot>,
    pub failing_tables: Vec<Category>,
    pub gate: Option<Arc<Notify>>,
    pub injected: Mutex<Vec<String>>,
    /// Simulated latency of every aggregates request.
    pub aggregates_delay: Option<Duration>,
    pub aggregate_calls: AtomicUsize,
    pub aggregates_in_flight: AtomicUsize,
    pub peak_aggregates_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn with_counts(script: Vec<Option<CountSnapshot>>) -> Self {
        Self {
            counts: Mutex::new(script.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl SentimentSource for ScriptedSource {
    async fn counts(&self, _categories: &[Category], _seconds: u64) -> FetchResult<CountSnapshot> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.counts.lock().unwrap().pop_front().flatten();
        next.ok_or(FetchError::Status(503))
    }

    async fn aggregates(&self) -> FetchResult<AggregateSnapshot> {
        self.aggregate_calls.fetch_add(1, Ordering::SeqCst);
        let in_flight = self.aggregates_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_aggregates_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);
        if let Some(delay) = self.aggregates_delay {
            tokio::time::sleep(delay).await;
        }
        self.aggregates_in_flight.fetch_sub(1, Ordering::SeqCst);
        self.aggregates.ok_or(FetchError::Status(404))
    }

    async fn recent(&self, category: Category) -> FetchResult<SnapshotTable> {
        if self.failing_tables.contains(&category) {
            return Err(FetchError::Status(500));
        }
        Ok(SnapshotTable::new(
            category,
            vec![format!("{category} one"), format!("{category} two")],
        ))
    }

    async fn inject(&self, text: &str) -> FetchResult<()> {
        self.injected.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<DashboardEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<DashboardEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn charts(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, DashboardEvent::Chart(_)))
            .count()
    }

    pub fn totals(&self) -> Vec<DisplayTotals> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DashboardEvent::Totals(totals) => Some(totals),
                _ => None,
            })
            .collect()
    }

    pub fn tables(&self) -> Vec<SnapshotTable> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                DashboardEvent::Table(table) => Some(table),
                _ => None,
            })
            .collect()
    }
}

impl DashboardSink for RecordingSink {
    fn publish(&self, event: DashboardEvent) {
        self.events.lock().unwrap().push(event);
    }
}
