use serde_json::{Map, Value};

/// 截取 body 前 `max_chars` 个字符（按字符而非字节）
pub fn body_preview(body: Option<&str>, max_chars: usize) -> String {
    body.unwrap_or_default().chars().take(max_chars).collect()
}

/// body 非空：存在且不是空字符串
pub fn has_body(body: Option<&str>) -> bool {
    body.is_some_and(|b| !b.is_empty())
}

/// body 是否为含真值 `error` 或 `message` 字段的 JSON 对象
///
/// 解析失败、非对象、字段缺失或为假值时均返回 false
pub fn has_error_indicator(body: Option<&str>) -> bool {
    let Some(body) = body else {
        return false;
    };

    match serde_json::from_str::<Map<String, Value>>(body) {
        Ok(fields) => ["error", "message"]
            .iter()
            .any(|key| fields.get(*key).is_some_and(is_truthy)),
        Err(_) => false,
    }
}

/// null、false、0、"" 为假，其余（包括空数组、空对象）为真
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_preview_truncates_chars() {
        let body = "x".repeat(1000);
        assert_eq!(body_preview(Some(&body), 200).chars().count(), 200);

        // 多字节字符不会被截断到一半
        let body = "联系人".repeat(100);
        let preview = body_preview(Some(&body), 200);
        assert_eq!(preview.chars().count(), 200);
        assert!(body.starts_with(&preview));
    }

    #[test]
    fn test_body_preview_short_and_missing() {
        assert_eq!(body_preview(Some("ok"), 200), "ok");
        assert_eq!(body_preview(None, 200), "");
    }

    #[test]
    fn test_has_body() {
        assert!(has_body(Some("ok")));
        assert!(has_body(Some("not json")));
        assert!(!has_body(Some("")));
        assert!(!has_body(None));
    }

    #[test]
    fn test_error_indicator() {
        assert!(has_error_indicator(Some(r#"{"message":"Email in use"}"#)));
        assert!(has_error_indicator(Some(r#"{"error":"Unauthorized"}"#)));
        assert!(has_error_indicator(Some(r#"{"error":{"code":7}}"#)));
        assert!(has_error_indicator(Some(r#"{"message":"","error":true}"#)));
        assert!(has_error_indicator(Some(r#"{"errors":1,"message":[]}"#)));
    }

    #[test]
    fn test_error_indicator_falsy_or_missing() {
        assert!(!has_error_indicator(Some("{}")));
        assert!(!has_error_indicator(Some(r#"{"message":""}"#)));
        assert!(!has_error_indicator(Some(r#"{"error":null,"message":0}"#)));
        assert!(!has_error_indicator(Some(r#"{"error":false}"#)));
        assert!(!has_error_indicator(Some(r#"["message"]"#)));
        assert!(!has_error_indicator(Some("not json")));
        assert!(!has_error_indicator(Some("")));
        assert!(!has_error_indicator(None));
    }
}
