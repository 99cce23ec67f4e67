use crate::analysis::{Analyzer, Classification};
use crate::gui_bridge::model::SentimentStore;
use crate::workflow::config::WorkflowConfig;
use anyhow::{anyhow, Context};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Classifies incoming sentences and records them in the shared store.
#[derive(Clone)]
pub struct Pipeline {
    analyzer: Arc<Analyzer>,
    store: Arc<RwLock<SentimentStore>>,
    ignored: Arc<AtomicU64>,
}

impl Pipeline {
    pub fn new(config: &WorkflowConfig) -> anyhow::Result<Self> {
        let analyzer = Analyzer::new().context("compiling normalization patterns")?;
        Ok(Self {
            analyzer: Arc::new(analyzer),
            store: Arc::new(RwLock::new(SentimentStore::new(
                config.retention_secs,
                config.max_entries,
            ))),
            ignored: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn store(&self) -> Arc<RwLock<SentimentStore>> {
        self.store.clone()
    }

    /// Blank sentences dropped so far.
    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }

    pub fn process(&self, text: &str) -> anyhow::Result<Option<Classification>> {
        self.process_at(text, chrono::Utc::now().timestamp_millis())
    }

    /// Blank input is ignored and yields `Ok(None)`.
    pub fn process_at(&self, text: &str, now_ms: i64) -> anyhow::Result<Option<Classification>> {
        let text = text.trim();
        if text.is_empty() {
            self.ignored.fetch_add(1, Ordering::Relaxed);
            log::debug!("[pipeline] ignoring blank sentence");
            return Ok(None);
        }

        let classification = self.analyzer.classify(text);
        let mut store = self
            .store
            .write()
            .map_err(|_| anyhow!("sentiment store lock poisoned"))?;
        store.record(classification.category, text, now_ms);
        log::debug!(
            "[pipeline] {} (score {}): {}",
            classification.category,
            classification.score,
            classification.normalized
        );
        Ok(Some(classification))
    }
}
