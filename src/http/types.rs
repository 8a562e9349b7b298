use std::fmt;

use crate::{LoadcheckError, Result};
use serde::{Deserialize, Serialize};

/// HTTP 状态码
///
/// 0 表示 HTTP 层没有拿到任何响应（连接失败、超时等），
/// 它不会等于任何期望状态码，因此状态检查必然失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status(u16);

impl Status {
    /// 没有响应
    pub const NONE: Status = Status(0);
    pub const OK: Status = Status(200);
    pub const CREATED: Status = Status(201);
    pub const BAD_REQUEST: Status = Status(400);

    /// 接受 0 以及 100..=999（与 reqwest 的 `StatusCode` 范围一致）
    pub fn new(code: u16) -> Result<Self> {
        if code == 0 || (100..=999).contains(&code) {
            Ok(Self(code))
        } else {
            Err(LoadcheckError::InvalidStatus(code))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
