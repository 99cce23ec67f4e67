//! Core of the sentiment dashboard: rolling per-category series, typed
//! backend snapshots, the HTTP source and the two refresh loops.
//!
//! Rendering stays outside this crate; the loops publish
//! [`scheduler::DashboardEvent`]s into a [`scheduler::DashboardSink`].

pub mod client;
pub mod config;
pub mod math;
pub mod prelude;
pub mod scheduler;
pub mod series;
pub mod snapshot;
pub mod telemetry;

pub use client::{HttpSentimentSource, SentimentSource};
pub use config::DashboardConfig;
pub use prelude::{Category, ChartSeries, PlotPoint};
pub use scheduler::{Dashboard, DashboardEvent, DashboardSink};
pub use series::{SeriesBuffer, SeriesSet};
