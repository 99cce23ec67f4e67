pub mod stats;

pub use stats::RateHelper;
