//! A set of helpers for testing

mod candle;
mod display;
mod market_data;

pub use candle::{candle_series, candle_series_with_spread};
pub use display::RecordingDisplayer;
pub use market_data::FixedMarketData;
