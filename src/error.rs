use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadcheckError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("无效的 HTTP 状态码: {0}")]
    InvalidStatus(u16),

    #[error("回放文件第 {line} 行无效: {message}")]
    Replay { line: usize, message: String },

    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML 解析错误: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for LoadcheckError {
    fn from(err: anyhow::Error) -> Self {
        LoadcheckError::Other(err.to_string())
    }
}

/// Result type for loadcheck crate
pub type Result<T> = std::result::Result<T, LoadcheckError>;
