#![warn(missing_docs)]
//! Tocsin is a market monitoring tool that watches a futures watchlist and
//! delivers trading-signal changes as push notifications.

pub mod cmd;
pub mod config;
pub mod context;
pub mod display;
pub mod engine;
pub mod models;
pub mod monitor;
pub mod providers;
pub mod push;
pub mod supervisor;
pub mod test_helpers;
pub mod worker;
