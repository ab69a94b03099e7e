pub mod direction;
pub mod execution;
pub mod round_trip;

pub use direction::{Direction, TradeSide};
pub use execution::{AggregatedExecution, Execution};
pub use round_trip::RoundTripTrade;
