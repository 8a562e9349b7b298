mod registry;
/// 检查模块 - 命名检查及其累计结果
mod types;

pub use registry::{CheckRegistry, run_checks};
pub use types::{Check, CheckResult, CheckTally};
