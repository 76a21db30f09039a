// ttncheck-api: Async Rust client for The Things Network Gateway Server API

pub mod client;
pub mod error;
pub mod models;

pub use client::{DEFAULT_SERVER, GatewayClient};
pub use error::ApiError;
pub use models::{ConnectionStats, LastStatus};
