pub mod classify;
pub mod compose;
pub mod engine;
pub mod filter;
pub mod run;
pub mod stats;

pub use engine::{ScreeningEngine, StrategyResult};
pub use filter::PointInTimeFilter;
pub use run::{run_screen, ScreenReport};
