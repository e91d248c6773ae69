#![doc = include_str!("../README.md")]

pub mod classify;
pub mod config;
pub mod cookies;
pub mod error;
pub mod gate;
pub mod layer;
pub mod refresh;
pub mod types;

// Re-exports for convenient access
pub use classify::{RouteClassification, RouteClassifier};
pub use config::GateConfig;
pub use cookies::{ACCESS_COOKIE, REFRESH_COOKIE};
pub use error::GateError;
pub use gate::{GateOutcome, SessionGate};
pub use layer::{GateState, ResolvedLocale, gate_request};
pub use refresh::{HttpRefresher, RefreshResult, Refresher};
pub use types::{Session, TokenPair};
