pub mod response;
pub mod types;

// Re-export commonly used types for convenient access
pub use response::Response;
pub use types::Status;
