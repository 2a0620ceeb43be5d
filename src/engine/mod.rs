//! The signal engine derives trade stances from candle series.

pub mod indicators;
mod signal;

pub use signal::{EngineError, SignalEngine};
