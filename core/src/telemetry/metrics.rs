use std::sync::Mutex;

/// Success and failure counters for one polling loop.
pub struct PollMetrics {
    inner: Mutex<PollStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub succeeded: usize,
    pub failed: usize,
}

impl PollMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PollStats::default()),
        }
    }

    pub fn record_success(&self) {
        if let Ok(mut stats) = self.inner.lock() {
            stats.succeeded += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut stats) = self.inner.lock() {
            stats.failed += 1;
        }
    }

    pub fn snapshot(&self) -> PollStats {
        if let Ok(stats) = self.inner.lock() {
            *stats
        } else {
            PollStats::default()
        }
    }
}

impl Default for PollMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for both dashboard loops.
#[derive(Default)]
pub struct DashboardMetrics {
    pub graph: PollMetrics,
    pub table: PollMetrics,
}
