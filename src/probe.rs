use crate::http::Response;
use crate::validator::ResponseValidator;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 探测参数
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    pub test_name: String,
    pub expected_status: Option<u16>,
    pub count: usize,
    /// 按异常路径校验
    pub expect_error: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            test_name: "probe".to_string(),
            expected_status: None,
            count: 1,
            expect_error: false,
        }
    }
}

pub fn build_client(timeout: Duration) -> crate::Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// 发送一次 GET 请求并计时；网络错误转换为无响应结果
pub async fn fetch(client: &reqwest::Client, url: &str) -> Response {
    let start = Instant::now();

    let result = match client.get(url).send().await {
        Ok(response) => Response::from_reqwest(response, start).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(response) => response,
        Err(e) => {
            warn!(url, "Request failed: {}", e);
            Response::no_response(start.elapsed())
        }
    }
}

/// 依次发送 `count` 个请求并逐个校验，返回通过的次数
pub async fn run(
    client: &reqwest::Client,
    url: &str,
    options: &ProbeOptions,
    validator: &ResponseValidator,
) -> usize {
    let mut passed = 0;

    for iteration in 1..=options.count {
        let response = fetch(client, url).await;
        debug!(
            iteration,
            status = response.status.code(),
            duration_ms = response.duration_ms(),
            "Probe response"
        );

        let name = &options.test_name;
        let ok = if options.expect_error {
            validator.validate_error_response(&response, name, options.expected_status)
        } else {
            validator.validate_response(&response, name, options.expected_status)
        };
        if ok {
            passed += 1;
        }
    }

    passed
}
