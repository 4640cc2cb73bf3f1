pub mod metric;
pub mod ratio;
pub mod score;
pub mod snapshot;
pub mod verdict;

pub use metric::*;
pub use ratio::*;
pub use score::*;
pub use snapshot::*;
pub use verdict::*;
