//! Market data providers.

pub mod http;
pub mod traits;

pub use http::HttpMarketDataSource;
pub use traits::{MarketDataError, MarketDataSource};
