use crate::check::types::{Check, CheckResult, CheckTally};
use crate::http::Response;
use std::sync::{Arc, Mutex};

/// 检查结果登记处
///
/// 按名称首次出现的顺序保存累计结果，报告时顺序稳定。
/// 与 `MetricsRecorder` 一样，克隆得到的是共享句柄。
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    tallies: Arc<Mutex<Vec<CheckTally>>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一组检查结果
    pub fn record(&self, results: &[CheckResult]) {
        let Ok(mut tallies) = self.tallies.lock() else {
            return;
        };

        for result in results {
            match tallies.iter_mut().find(|t| t.name == result.name) {
                Some(tally) => tally.record(result.passed),
                None => {
                    let mut tally = CheckTally::new(result.name.clone());
                    tally.record(result.passed);
                    tallies.push(tally);
                }
            }
        }
    }

    pub fn snapshot(&self) -> Vec<CheckTally> {
        match self.tallies.lock() {
            Ok(tallies) => tallies.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// 依次求值所有检查（不短路），登记结果并返回逻辑与
pub fn run_checks(response: &Response, checks: &[Check<'_>], registry: &CheckRegistry) -> bool {
    let results: Vec<CheckResult> = checks.iter().map(|c| c.evaluate(response)).collect();
    registry.record(&results);
    results.iter().all(|r| r.passed)
}
