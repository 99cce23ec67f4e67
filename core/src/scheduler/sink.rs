use crate::prelude::ChartSeries;
use crate::snapshot::{DisplayTotals, SnapshotTable};
use tokio::sync::mpsc::UnboundedSender;

/// Display update produced by one of the refresh loops.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// Current window of every category, ready to plot.
    Chart(Vec<ChartSeries>),
    Totals(DisplayTotals),
    /// Replacement contents for one category's table.
    Table(SnapshotTable),
}

/// Renderer-side collaborator the loops publish into.
pub trait DashboardSink: Send + Sync {
    fn publish(&self, event: DashboardEvent);
}

impl DashboardSink for UnboundedSender<DashboardEvent> {
    fn publish(&self, event: DashboardEvent) {
        if self.send(event).is_err() {
            log::debug!("dashboard receiver dropped; update discarded");
        }
    }
}
