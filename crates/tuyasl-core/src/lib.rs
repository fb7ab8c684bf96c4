// tuyasl-core: Session state and host command dispatch on top of tuyasl-api.

pub mod config;
pub mod convert;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod protocol;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{LoginConfig, SearchConfig, SessionOptions, DEFAULT_TOKEN_PATH};
pub use credentials::CredentialStore;
pub use dispatcher::Dispatcher;
pub use error::CoreError;
pub use model::{Credentials, DeviceRecord, sort_devices};
pub use protocol::{HostCommand, HostEvent};
pub use session::Session;

pub use tuyasl_api::{Region, TlsMode, TransportConfig, resolve_region};
