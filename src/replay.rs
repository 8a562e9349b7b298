//! Replay recorded responses through the validator.
//!
//! Each line of a replay file is one JSON object describing a completed HTTP
//! interaction, e.g.
//!
//! ```text
//! {"test_name":"login","status":200,"body":"{\"token\":\"t\"}","duration_ms":85.2}
//! {"test_name":"duplicate user","kind":"error","expected_status":400,"status":400,"body":"{\"message\":\"Email in use\"}","duration_ms":40}
//! ```

use crate::http::{Response, Status};
use crate::validator::ResponseValidator;
use crate::{LoadcheckError, Result};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// 用哪一个校验器处理记录
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReplayRecord {
    pub test_name: String,
    #[serde(default)]
    pub kind: RecordKind,
    pub expected_status: Option<u16>,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub duration_ms: Option<f64>,
}

impl ReplayRecord {
    /// 转换为响应模型
    ///
    /// 缺失或越界的状态码视为没有响应，缺失或无效的耗时视为没有耗时，
    /// 二者都会让对应检查失败而不是中断回放
    pub fn to_response(&self) -> Response {
        let status = match self.status.map(Status::new) {
            Some(Ok(status)) => status,
            Some(Err(e)) => {
                warn!(test_name = %self.test_name, "{}", e);
                Status::NONE
            }
            None => Status::NONE,
        };
        let duration = self
            .duration_ms
            .and_then(|ms| Duration::try_from_secs_f64(ms / 1000.0).ok());

        Response {
            status,
            headers: HeaderMap::new(),
            body: self.body.clone(),
            duration,
        }
    }
}

/// 解析 JSON Lines 内容，空行跳过
pub fn parse_records(content: &str) -> Result<Vec<ReplayRecord>> {
    let mut records = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|e| LoadcheckError::Replay {
            line: index + 1,
            message: e.to_string(),
        })?;
        records.push(record);
    }

    Ok(records)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<ReplayRecord>> {
    let content = fs::read_to_string(path.as_ref())?;
    let records = parse_records(&content)?;
    debug!(path = %path.as_ref().display(), count = records.len(), "Loaded replay file");
    Ok(records)
}

/// 依次校验全部记录，返回通过的记录数
pub fn run(records: &[ReplayRecord], validator: &ResponseValidator) -> usize {
    let passed = records
        .iter()
        .filter(|record| {
            let response = record.to_response();
            match record.kind {
                RecordKind::Success => validator.validate_response(
                    &response,
                    &record.test_name,
                    record.expected_status,
                ),
                RecordKind::Error => validator.validate_error_response(
                    &response,
                    &record.test_name,
                    record.expected_status,
                ),
            }
        })
        .count();

    info!(total = records.len(), passed, "Replay finished");
    passed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records() {
        let content = r#"
{"test_name":"login","status":200,"body":"{}","duration_ms":85.5}

{"test_name":"duplicate","kind":"error","expected_status":409,"status":409,"body":"{\"error\":\"exists\"}"}
"#;
        let records = parse_records(content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, RecordKind::Success);
        assert_eq!(records[0].duration_ms, Some(85.5));
        assert_eq!(records[1].kind, RecordKind::Error);
        assert_eq!(records[1].expected_status, Some(409));
    }

    #[test]
    fn test_parse_error_reports_line() {
        let content = "{\"test_name\":\"ok\"}\nnot json\n";
        match parse_records(content) {
            Err(LoadcheckError::Replay { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected Replay error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields_become_failures() {
        let record = ReplayRecord {
            test_name: "partial".to_string(),
            kind: RecordKind::Success,
            expected_status: None,
            status: None,
            body: Some("ok".to_string()),
            duration_ms: None,
        };
        let response = record.to_response();
        assert!(response.status.is_none());
        assert!(response.duration.is_none());

        let validator = ResponseValidator::default();
        assert_eq!(run(&[record], &validator), 0);
        assert_eq!(validator.metrics().failed_requests(), 1);
    }

    #[test]
    fn test_out_of_range_status() {
        let record = ReplayRecord {
            test_name: "weird".to_string(),
            kind: RecordKind::Success,
            expected_status: None,
            status: Some(42),
            body: None,
            duration_ms: Some(-3.0),
        };
        let response = record.to_response();
        assert!(response.status.is_none());
        assert!(response.duration.is_none());
    }

    #[test]
    fn test_run_mixed_records() {
        let content = r#"
{"test_name":"list contacts","status":200,"body":"[]","duration_ms":120}
{"test_name":"get contact","status":404,"body":"","duration_ms":50}
{"test_name":"register","kind":"error","status":400,"body":"{\"message\":\"Email in use\"}","duration_ms":80}
{"test_name":"register","kind":"error","status":400,"body":"{}","duration_ms":80}
"#;
        let records = parse_records(content).unwrap();
        let validator = ResponseValidator::default();

        assert_eq!(run(&records, &validator), 2);

        let metrics = validator.metrics().snapshot();
        assert_eq!(metrics.errors.total, 2);
        assert_eq!(metrics.failed_requests, 1);
    }
}
