use std::fmt;

use serde::{Deserialize, Serialize};

use crate::transport::TransportError;

pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection.";
pub const GENERIC_MESSAGE: &str = "An error occurred. Please try again.";

// =========================================================
// 错误类型枚举
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminErrorKind {
    /// 客户端校验失败，未发出请求
    Validation,
    /// 网络不可达、请求构建失败等传输层错误
    Network,
    /// 超过请求时限
    Timeout,
    /// 服务端返回非成功状态码
    Server,
    /// 响应体解析失败
    Parse,
    /// 客户端持久化存储写入失败
    Storage,
}

impl AdminErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminErrorKind::Validation => "INVALID_INPUT",
            AdminErrorKind::Network => "NETWORK_ERROR",
            AdminErrorKind::Timeout => "TIMEOUT",
            AdminErrorKind::Server => "SERVER_ERROR",
            AdminErrorKind::Parse => "RESPONSE_PARSE_ERROR",
            AdminErrorKind::Storage => "STORAGE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 管理后台的统一错误
///
/// - kind: 错误语义
/// - message: 内部描述，用于日志
/// - status: 服务端状态码（仅 `Server`）
/// - server_message: 服务端 `error` 字段原文，展示给用户
#[derive(Debug, Clone, PartialEq)]
pub struct AdminError {
    pub kind: AdminErrorKind,
    pub message: String,
    pub status: Option<u16>,
    server_message: Option<String>,
}

impl AdminError {
    pub fn new(kind: AdminErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            server_message: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Validation, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Network, message)
    }

    pub fn timeout() -> Self {
        Self::new(AdminErrorKind::Timeout, "request exceeded its time limit")
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Parse, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(AdminErrorKind::Storage, message)
    }

    /// 服务端错误；`server_message` 为空串时视为未提供
    pub fn server(status: u16, server_message: Option<String>) -> Self {
        let server_message = server_message.filter(|m| !m.trim().is_empty());
        Self {
            kind: AdminErrorKind::Server,
            message: match &server_message {
                Some(msg) => format!("status {}: {}", status, msg),
                None => format!("status {}", status),
            },
            status: Some(status),
            server_message,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    /// 选择展示给用户的文案
    ///
    /// 优先服务端原文，其次超时/网络的固定文案，最后是调用方给出的兜底文案。
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(msg) = self.server_message() {
            return msg.to_string();
        }
        match self.kind {
            AdminErrorKind::Validation => self.message.clone(),
            AdminErrorKind::Timeout => TIMEOUT_MESSAGE.to_string(),
            AdminErrorKind::Network => NETWORK_MESSAGE.to_string(),
            AdminErrorKind::Server | AdminErrorKind::Parse | AdminErrorKind::Storage => {
                fallback.to_string()
            }
        }
    }
}

impl fmt::Display for AdminError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)
    }
}

impl std::error::Error for AdminError {}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

// =========================================================
// 类型转换实现
// =========================================================

impl From<TransportError> for AdminError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Timeout => AdminError::timeout(),
            other => AdminError::network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(e: serde_json::Error) -> Self {
        AdminError::parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_fallback() {
        let err = AdminError::server(409, Some("Duplicate".to_string()));
        assert_eq!(err.user_message(GENERIC_MESSAGE), "Duplicate");
        assert_eq!(err.status, Some(409));
    }

    #[test]
    fn blank_server_message_falls_back() {
        let err = AdminError::server(500, Some("  ".to_string()));
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(GENERIC_MESSAGE), GENERIC_MESSAGE);
    }

    #[test]
    fn transport_errors_map_to_fixed_texts() {
        let timeout: AdminError = TransportError::Timeout.into();
        assert_eq!(timeout.kind, AdminErrorKind::Timeout);
        assert_eq!(timeout.user_message(GENERIC_MESSAGE), TIMEOUT_MESSAGE);

        let offline: AdminError = TransportError::Network("offline".into()).into();
        assert_eq!(offline.kind, AdminErrorKind::Network);
        assert_eq!(offline.user_message(GENERIC_MESSAGE), NETWORK_MESSAGE);
    }

    #[test]
    fn display_includes_code() {
        let err = AdminError::validation("Song name is required");
        assert_eq!(err.to_string(), "[INVALID_INPUT] Song name is required");
    }
}
