//! orangered-core: domain types shared across the orangered workspace.
//! Records returned by the platform's listing API, stream configuration,
//! and the error taxonomy for stream creation and steady-state polling.

pub mod config;
pub mod error;
pub mod types;
