use log::{debug, info, warn};

/// Prefixes every message with the loop or component it came from.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    pub fn trace(&self, message: &str) {
        debug!("[{}] {}", self.scope, message);
    }

    /// An update that was dropped; the next scheduled poll retries.
    pub fn skipped(&self, what: &str, reason: &dyn std::fmt::Display) {
        warn!("[{}] skipped {}: {}", self.scope, what, reason);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("dashboard")
    }
}
