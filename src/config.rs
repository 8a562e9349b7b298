use crate::Result;
use crate::http::Status;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// 校验参数
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// 响应时间阈值（毫秒），严格小于才算通过
    pub max_response_time_ms: f64,
    /// 正常路径的默认期望状态码
    pub ok_status: u16,
    /// 异常路径的默认期望状态码
    pub bad_request_status: u16,
    /// 失败日志中 body 预览的最大字符数
    pub body_preview_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_response_time_ms: 500.0,
            ok_status: Status::OK.code(),
            bad_request_status: Status::BAD_REQUEST.code(),
            body_preview_len: 200,
        }
    }
}

/// loadcheck.toml 的内容
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "loadcheck.toml";

    pub const ENV_MAX_RESPONSE_TIME: &'static str = "MAX_RESPONSE_TIME_MS";
    pub const ENV_OK_STATUS: &'static str = "LOADCHECK_OK_STATUS";
    pub const ENV_BAD_REQUEST_STATUS: &'static str = "LOADCHECK_BAD_REQUEST_STATUS";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        Self::check(&config)?;
        debug!(path = %path.as_ref().display(), "Loaded config file");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/loadcheck/
    ///
    /// 找到但无法解析的文件会被跳过并打印警告
    pub fn find_and_load() -> Option<Config> {
        if let Some(config) = Self::try_load_from_current_dir() {
            return Some(config);
        }

        Self::try_load_from_user_dir()
    }

    fn try_load_from_current_dir() -> Option<Config> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_or_warn(&config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Config> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("loadcheck")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_or_warn(&config_path)
        } else {
            None
        }
    }

    fn load_or_warn(path: &Path) -> Option<Config> {
        match Self::load_from_path(path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), "Ignoring config file: {}", e);
                None
            }
        }
    }

    /// 应用环境变量覆盖，无效值忽略并警告
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides(config, |key| std::env::var(key).ok());
    }

    /// `lookup` 按变量名返回值，便于测试时不依赖进程环境
    pub fn apply_overrides<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let validation = &mut config.validation;

        if let Some(raw) = lookup(Self::ENV_MAX_RESPONSE_TIME) {
            match raw.trim().parse::<f64>() {
                Ok(ms) if ms.is_finite() && ms > 0.0 => validation.max_response_time_ms = ms,
                _ => warn!(value = %raw, "Invalid {}", Self::ENV_MAX_RESPONSE_TIME),
            }
        }

        if let Some(raw) = lookup(Self::ENV_OK_STATUS) {
            match Self::parse_status(&raw) {
                Some(code) => validation.ok_status = code,
                None => warn!(value = %raw, "Invalid {}", Self::ENV_OK_STATUS),
            }
        }

        if let Some(raw) = lookup(Self::ENV_BAD_REQUEST_STATUS) {
            match Self::parse_status(&raw) {
                Some(code) => validation.bad_request_status = code,
                None => warn!(value = %raw, "Invalid {}", Self::ENV_BAD_REQUEST_STATUS),
            }
        }
    }

    fn parse_status(raw: &str) -> Option<u16> {
        let code = raw.trim().parse::<u16>().ok()?;
        Status::new(code).ok().map(|s| s.code())
    }

    fn check(config: &Config) -> Result<()> {
        let validation = &config.validation;
        if !validation.max_response_time_ms.is_finite() || validation.max_response_time_ms <= 0.0 {
            return Err(crate::LoadcheckError::Config(format!(
                "max_response_time_ms must be positive, got {}",
                validation.max_response_time_ms
            )));
        }
        Status::new(validation.ok_status)?;
        Status::new(validation.bad_request_status)?;
        Ok(())
    }
}
