pub mod lexicon;
pub mod normalize;

pub use lexicon::{Analyzer, Classification};
