//! Lookup client for OSPO-ColabAchievements contributor profiles.
//!
//! The library holds everything except the window: the backend client, the
//! view controller and the pure renderer. The `gui` binary wires them to slint.

pub mod avatar;
pub mod client;
pub mod config;
pub mod lookup;
pub mod models;
pub mod telemetry;
pub mod view;

pub use client::{ContributorClient, FetchError};
pub use config::AppConfig;
pub use models::{Achievement, Contributor};
