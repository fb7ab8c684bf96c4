// tuyasl-api: Async Rust client for the Tuya cloud Home Assistant endpoints

pub mod auth;
pub mod client;
pub mod discovery;
pub mod error;
pub mod models;
pub mod region;
pub mod transport;

pub use client::TuyaClient;
pub use error::Error;
pub use models::{LoginForm, RemoteDevice, TokenGrant};
pub use region::{Region, resolve_region};
pub use transport::{TlsMode, TransportConfig};
