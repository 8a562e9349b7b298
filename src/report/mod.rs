pub mod reporter;
pub mod types;

pub use reporter::Reporter;
pub use types::{ResultsExport, Summary};
