pub mod feed;
pub mod template;

pub use feed::{run_feed, GeneratorConfig, SentenceGenerator};
