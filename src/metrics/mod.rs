/// 指标模块 - 错误率、成功率、耗时分布、失败请求计数
mod recorder;
mod types;

pub use recorder::MetricsRecorder;
pub use types::{MetricsSnapshot, RateSnapshot, TrendSnapshot};
