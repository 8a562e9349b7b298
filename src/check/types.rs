use crate::http::Response;
use serde::Serialize;
use std::fmt;

/// 命名检查：名称 + 针对响应的谓词
pub struct Check<'a> {
    pub name: String,
    predicate: Box<dyn Fn(&Response) -> bool + Send + Sync + 'a>,
}

impl<'a> Check<'a> {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Response) -> bool + Send + Sync + 'a,
    {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn evaluate(&self, response: &Response) -> CheckResult {
        CheckResult {
            name: self.name.clone(),
            passed: (self.predicate)(response),
        }
    }
}

impl fmt::Debug for Check<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// 单个检查的求值结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
}

/// 同名检查在整个运行期间的累计结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckTally {
    pub name: String,
    pub passes: u64,
    pub fails: u64,
}

impl CheckTally {
    pub fn new(name: String) -> Self {
        Self {
            name,
            passes: 0,
            fails: 0,
        }
    }

    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passes += 1;
        } else {
            self.fails += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.passes + self.fails
    }
}
