pub mod analysis;
pub mod bar;
pub mod indicators;
pub mod levels;
pub mod report;
pub mod sentiment;
pub mod summary;
pub mod timeframe;
pub mod trend;

pub use analysis::*;
pub use bar::*;
pub use indicators::*;
pub use levels::*;
pub use report::*;
pub use sentiment::*;
pub use summary::*;
pub use timeframe::*;
pub use trend::*;
