/// 校验模块 - 判定一次 HTTP 交互是否通过，并驱动指标与失败日志
mod body;

pub use body::{body_preview, has_body, has_error_indicator};

use crate::check::{Check, CheckRegistry, run_checks};
use crate::config::ValidationConfig;
use crate::http::Response;
use crate::metrics::MetricsRecorder;
use tracing::error;

/// 响应校验器
///
/// 持有指标聚合器与检查登记处的句柄；克隆校验器不会复制状态。
/// 校验永远返回布尔值，不会 panic，也不会返回错误。
#[derive(Debug, Clone)]
pub struct ResponseValidator {
    config: ValidationConfig,
    metrics: MetricsRecorder,
    checks: CheckRegistry,
}

impl Default for ResponseValidator {
    fn default() -> Self {
        Self::new(
            ValidationConfig::default(),
            MetricsRecorder::new(),
            CheckRegistry::new(),
        )
    }
}

impl ResponseValidator {
    pub fn new(config: ValidationConfig, metrics: MetricsRecorder, checks: CheckRegistry) -> Self {
        Self {
            config,
            metrics,
            checks,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    pub fn checks(&self) -> &CheckRegistry {
        &self.checks
    }

    /// 正常路径校验：状态码、响应时间、body 非空
    ///
    /// 三项检查全部求值并分别登记，结果为逻辑与。随后记录错误率、成功率、耗时；
    /// 失败时失败请求计数加一，并输出一条 error 级别的结构化日志。
    pub fn validate_response(
        &self,
        response: &Response,
        test_name: &str,
        expected_status: Option<u16>,
    ) -> bool {
        let expected = expected_status.unwrap_or(self.config.ok_status);
        let max_ms = self.config.max_response_time_ms;

        let checks = [
            status_check(test_name, expected),
            Check::new(
                format!("{}: response time < {}ms", test_name, max_ms),
                move |r: &Response| r.duration_ms().is_some_and(|ms| ms < max_ms),
            ),
            Check::new(format!("{}: has body", test_name), |r: &Response| {
                has_body(r.body.as_deref())
            }),
        ];
        let success = run_checks(response, &checks, &self.checks);

        self.metrics.record_error(!success);
        self.metrics.record_success(success);
        if let Some(ms) = response.duration_ms() {
            self.metrics.record_api_duration(ms);
        }

        if !success {
            self.metrics.increment_failed_requests();
            let preview = body_preview(response.body.as_deref(), self.config.body_preview_len);
            error!(
                test_name,
                status = response.status.code(),
                body_preview = ?preview,
                "response validation failed"
            );
        }

        success
    }

    /// 异常路径校验：状态码、body 含错误信息
    ///
    /// 只登记检查结果，不记录指标也不输出日志
    pub fn validate_error_response(
        &self,
        response: &Response,
        test_name: &str,
        expected_status: Option<u16>,
    ) -> bool {
        let expected = expected_status.unwrap_or(self.config.bad_request_status);

        let checks = [
            status_check(test_name, expected),
            Check::new(
                format!("{}: has error message", test_name),
                |r: &Response| has_error_indicator(r.body.as_deref()),
            ),
        ];

        run_checks(response, &checks, &self.checks)
    }
}

fn status_check(test_name: &str, expected: u16) -> Check<'static> {
    Check::new(
        format!("{}: status is {}", test_name, expected),
        move |r: &Response| !r.status.is_none() && r.status.code() == expected,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Status;
    use reqwest::header::HeaderMap;
    use std::time::Duration;

    fn create_test_response(status: u16, body: Option<&str>, duration_ms: u64) -> Response {
        Response {
            status: Status::new(status).unwrap(),
            headers: HeaderMap::new(),
            body: body.map(|b| b.to_string()),
            duration: Some(Duration::from_millis(duration_ms)),
        }
    }

    #[test]
    fn test_passing_response() {
        let validator = ResponseValidator::default();
        let response = create_test_response(200, Some(r#"{"ok":true}"#), 120);

        assert!(validator.validate_response(&response, "get contacts", Some(200)));

        let metrics = validator.metrics().snapshot();
        assert_eq!(metrics.errors.passes, 0);
        assert_eq!(metrics.errors.total, 1);
        assert_eq!(metrics.success_rate.passes, 1);
        assert_eq!(metrics.api_duration.count, 1);
        assert_eq!(metrics.api_duration.max, 120.0);
        assert_eq!(metrics.failed_requests, 0);
    }

    #[test]
    fn test_status_and_body_failure() {
        let validator = ResponseValidator::default();
        let response = create_test_response(404, Some(""), 50);

        assert!(!validator.validate_response(&response, "get contact", None));
        assert_eq!(validator.metrics().failed_requests(), 1);

        let checks = validator.checks().snapshot();
        let failed: Vec<_> = checks
            .iter()
            .filter(|c| c.fails > 0)
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            failed,
            vec!["get contact: status is 200", "get contact: has body"]
        );
    }

    #[test]
    fn test_latency_failure() {
        let validator = ResponseValidator::default();
        let response = create_test_response(200, Some("ok"), 900);

        assert!(!validator.validate_response(&response, "slow", Some(200)));

        let checks = validator.checks().snapshot();
        assert_eq!(checks[1].name, "slow: response time < 500ms");
        assert_eq!(checks[1].fails, 1);
        assert_eq!(checks[0].passes, 1);
        assert_eq!(checks[2].passes, 1);
    }

    #[test]
    fn test_latency_bound_is_strict() {
        let validator = ResponseValidator::default();
        let response = create_test_response(200, Some("ok"), 500);
        assert!(!validator.validate_response(&response, "edge", None));
    }

    #[test]
    fn test_missing_duration_fails_latency() {
        let validator = ResponseValidator::default();
        let mut response = create_test_response(200, Some("ok"), 10);
        response.duration = None;

        assert!(!validator.validate_response(&response, "untimed", None));
        assert_eq!(validator.metrics().snapshot().api_duration.count, 0);
        assert_eq!(validator.metrics().failed_requests(), 1);
    }

    #[test]
    fn test_no_response_never_matches_status() {
        let validator = ResponseValidator::default();
        let response = Response::no_response(Duration::from_millis(5));
        assert!(!validator.validate_response(&response, "down", Some(0)));
    }

    #[test]
    fn test_custom_threshold() {
        let config = ValidationConfig {
            max_response_time_ms: 1000.0,
            ..ValidationConfig::default()
        };
        let validator =
            ResponseValidator::new(config, MetricsRecorder::new(), CheckRegistry::new());
        let response = create_test_response(200, Some("ok"), 900);

        assert!(validator.validate_response(&response, "relaxed", None));
    }

    #[test]
    fn test_same_response_twice() {
        let validator = ResponseValidator::default();
        let response = create_test_response(201, Some("{}"), 30);

        let first = validator.validate_response(&response, "create contact", Some(201));
        let second = validator.validate_response(&response, "create contact", Some(201));
        assert_eq!(first, second);

        let checks = validator.checks().snapshot();
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.passes == 2));
    }

    #[test]
    fn test_error_response_with_message() {
        let validator = ResponseValidator::default();
        let response = create_test_response(400, Some(r#"{"message":"Email in use"}"#), 80);

        assert!(validator.validate_error_response(&response, "duplicate user", Some(400)));
    }

    #[test]
    fn test_error_response_without_indicator() {
        let validator = ResponseValidator::default();
        let response = create_test_response(400, Some("{}"), 80);

        assert!(!validator.validate_error_response(&response, "empty error", None));

        let checks = validator.checks().snapshot();
        assert_eq!(checks[0].name, "empty error: status is 400");
        assert_eq!(checks[0].passes, 1);
        assert_eq!(checks[1].name, "empty error: has error message");
        assert_eq!(checks[1].fails, 1);
    }

    #[test]
    fn test_error_response_not_json() {
        let validator = ResponseValidator::default();
        let response = create_test_response(401, Some("not json"), 80);
        assert!(!validator.validate_error_response(&response, "bad token", Some(401)));
    }

    #[test]
    fn test_error_response_leaves_metrics_untouched() {
        let validator = ResponseValidator::default();
        let response = create_test_response(500, None, 80);

        assert!(!validator.validate_error_response(&response, "server error", None));

        let metrics = validator.metrics().snapshot();
        assert_eq!(metrics.errors.total, 0);
        assert_eq!(metrics.success_rate.total, 0);
        assert_eq!(metrics.api_duration.count, 0);
        assert_eq!(metrics.failed_requests, 0);
    }
}
