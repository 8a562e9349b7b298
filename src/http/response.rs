use crate::Result;
use crate::http::types::Status;
use reqwest::header::HeaderMap as Headers;
use std::time::{Duration, Instant};

/// 一次 HTTP 调用的结果，构造后只读
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub headers: Headers,
    /// None 表示 HTTP 层没有返回 body
    pub body: Option<String>,
    /// None 表示 HTTP 层没有提供耗时
    pub duration: Option<Duration>,
}

impl Response {
    pub fn new(
        status: u16,
        headers: Headers,
        body: Option<String>,
        duration: Duration,
    ) -> Result<Self> {
        Ok(Self {
            status: Status::new(status)?,
            headers,
            body,
            duration: Some(duration),
        })
    }

    /// 未拿到响应时的占位结果（status 0，无 body）
    pub fn no_response(duration: Duration) -> Self {
        Self {
            status: Status::NONE,
            headers: Headers::new(),
            body: None,
            duration: Some(duration),
        }
    }

    /// 将已完成的 reqwest 响应转换为本 crate 的响应模型
    ///
    /// `start` 为发送请求前的时间点；耗时包含 body 的接收
    pub async fn from_reqwest(response: reqwest::Response, start: Instant) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await?;
        let elapsed = start.elapsed();

        Response::new(status, headers, Some(body), elapsed)
    }

    /// 耗时（毫秒，浮点）
    pub fn duration_ms(&self) -> Option<f64> {
        self.duration.map(|d| d.as_nanos() as f64 / 1_000_000.0)
    }

    pub fn text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
