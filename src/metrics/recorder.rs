use crate::metrics::types::{MetricsSnapshot, RateSnapshot, TrendSnapshot};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::trace;

#[derive(Debug, Default)]
struct Rate {
    passes: AtomicU64,
    total: AtomicU64,
}

impl Rate {
    fn add(&self, value: bool) {
        if value {
            self.passes.fetch_add(1, Ordering::Relaxed);
        }
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> RateSnapshot {
        let total = self.total.load(Ordering::Relaxed);
        let passes = self.passes.load(Ordering::Relaxed).min(total);
        RateSnapshot::new(passes, total)
    }
}

#[derive(Debug, Default)]
struct Inner {
    errors: Rate,
    success_rate: Rate,
    api_duration: Mutex<Vec<f64>>,
    failed_requests: AtomicU64,
}

/// 一次测试运行的指标聚合器
///
/// 克隆得到的是同一份状态的句柄，可在多个线程 / 任务间共享。
/// 所有记录操作都不会失败，也没有返回值；只追加，不修正已记录的样本。
#[derive(Debug, Clone, Default)]
pub struct MetricsRecorder {
    inner: Arc<Inner>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 错误发生率
    pub fn record_error(&self, is_error: bool) {
        self.inner.errors.add(is_error);
    }

    /// 成功率，与错误率分开记录
    pub fn record_success(&self, is_success: bool) {
        self.inner.success_rate.add(is_success);
    }

    /// 记录一次请求耗时（毫秒）
    pub fn record_api_duration(&self, duration_ms: f64) {
        if !duration_ms.is_finite() || duration_ms < 0.0 {
            trace!(duration_ms, "Ignoring invalid duration sample");
            return;
        }
        // 锁中毒时丢弃该样本，不向调用方传播
        if let Ok(mut samples) = self.inner.api_duration.lock() {
            samples.push(duration_ms);
        }
    }

    pub fn increment_failed_requests(&self) {
        self.inner.failed_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed_requests(&self) -> u64 {
        self.inner.failed_requests.load(Ordering::Relaxed)
    }

    /// 读取当前全部指标，供报告 / 导出使用
    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut samples = match self.inner.api_duration.lock() {
            Ok(samples) => samples.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        MetricsSnapshot {
            errors: self.inner.errors.snapshot(),
            success_rate: self.inner.success_rate.snapshot(),
            api_duration: TrendSnapshot::from_samples(&mut samples),
            failed_requests: self.failed_requests(),
        }
    }
}
