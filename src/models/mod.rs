//! This module contains the data models for the Tocsin application.

pub mod market;
pub mod notification;
pub mod push_event;

pub use market::{Candle, Signal, SignalReading, TrendDirection, VixReading, VixStatus};
pub use notification::{NotificationData, NotificationOptions, PushPayload};
pub use push_event::{EventLifetime, PushEvent, PushMessage};
