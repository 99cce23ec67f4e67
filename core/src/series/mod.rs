pub mod buffer;
pub mod set;

pub use buffer::SeriesBuffer;
pub use set::SeriesSet;
