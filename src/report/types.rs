use crate::check::{CheckRegistry, CheckTally};
use crate::metrics::{MetricsRecorder, MetricsSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 测试运行摘要
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub checks: Vec<CheckTally>,
    pub metrics: MetricsSnapshot,
    pub total_checks: u64,
    pub passed_checks: u64,
    pub failed_checks: u64,
}

impl Summary {
    pub fn new(checks: Vec<CheckTally>, metrics: MetricsSnapshot) -> Self {
        let passed_checks = checks.iter().map(|c| c.passes).sum();
        let failed_checks = checks.iter().map(|c| c.fails).sum();

        Self {
            checks,
            metrics,
            total_checks: passed_checks + failed_checks,
            passed_checks,
            failed_checks,
        }
    }

    /// 从共享句柄读取当前状态
    pub fn collect(checks: &CheckRegistry, metrics: &MetricsRecorder) -> Self {
        Self::new(checks.snapshot(), metrics.snapshot())
    }

    /// 检查通过百分比，没有检查时为 0
    pub fn pass_rate(&self) -> f64 {
        if self.total_checks == 0 {
            0.0
        } else {
            self.passed_checks as f64 * 100.0 / self.total_checks as f64
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed_checks == 0
    }
}

/// 导出的结果文件
#[derive(Debug, Clone, Serialize)]
pub struct ResultsExport<'a> {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub pass_rate: f64,
    #[serde(flatten)]
    pub summary: &'a Summary,
}
