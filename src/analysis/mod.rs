pub mod aggregator;
pub mod performance;
pub mod reconstructor;
pub mod runner;

pub use performance::SessionMetrics;
pub use reconstructor::PositionReconstructor;
pub use runner::{AnalysisReport, InstrumentFailure, SessionOutcome};
