pub mod message_processor;
pub mod service;
pub mod status;

pub use service::TelemetryService;
pub use status::{derive_status, DEFAULT_OFFLINE_THRESHOLD_SECS};
