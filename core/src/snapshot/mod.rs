pub mod counts;
pub mod table;

pub use counts::{abbreviate_count, AggregateSnapshot, CategoryCounts, CountSnapshot, DisplayTotals};
pub use table::SnapshotTable;
