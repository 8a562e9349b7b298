pub mod check;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod probe;
pub mod replay;
pub mod report;
pub mod validator;

// Re-export commonly used types
pub use check::CheckRegistry;
pub use config::{Config, ConfigLoader, ValidationConfig};
pub use error::{LoadcheckError, Result};
pub use http::Response;
pub use metrics::MetricsRecorder;
pub use validator::ResponseValidator;
