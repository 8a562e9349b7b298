use serde::Serialize;

/// 布尔比率序列的快照
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSnapshot {
    /// 记录为 true 的次数
    pub passes: u64,
    /// 记录为 false 的次数
    pub fails: u64,
    pub total: u64,
    /// passes / total，没有样本时为 0
    pub rate: f64,
}

impl RateSnapshot {
    pub fn new(passes: u64, total: u64) -> Self {
        let rate = if total == 0 {
            0.0
        } else {
            passes as f64 / total as f64
        };
        Self {
            passes,
            fails: total - passes,
            total,
            rate,
        }
    }
}

/// 耗时分布快照（毫秒）
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TrendSnapshot {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub med: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl TrendSnapshot {
    /// 由样本计算统计值，样本会被排序
    pub fn from_samples(samples: &mut [f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let count = samples.len();
        let sum: f64 = samples.iter().sum();

        Self {
            count,
            min: samples[0],
            max: samples[count - 1],
            avg: sum / count as f64,
            med: percentile(samples, 0.50),
            p90: percentile(samples, 0.90),
            p95: percentile(samples, 0.95),
            p99: percentile(samples, 0.99),
        }
    }
}

/// 最近秩百分位，输入必须已排序且非空
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let len = sorted.len();
    let index = ((len as f64 * p).ceil() as usize).clamp(1, len) - 1;
    sorted[index]
}

/// 一次测试运行的全部指标
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub errors: RateSnapshot,
    pub success_rate: RateSnapshot,
    pub api_duration: TrendSnapshot,
    pub failed_requests: u64,
}
