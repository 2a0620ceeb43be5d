//! Configuration module for Tocsin.

mod app_config;
mod display;
mod helpers;
mod market;
mod notification;
mod signal;

pub use app_config::AppConfig;
pub use display::{DisplayBackend, DisplayConfig};
pub use helpers::deserialize_duration_from_seconds;
pub use market::{MarketConfig, TimeframeProfile};
pub use notification::NotificationConfig;
pub use signal::SignalConfig;
