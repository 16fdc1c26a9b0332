//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// 入力チェック（ネットワーク呼び出し前）
    #[error("{0}")]
    Validation(String),

    /// HTTPステータスエラー
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 応答なし
    #[error("Network error: {0}")]
    Network(String),

    /// `{code, message}` エンベロープで code != 200
    #[error("Backend error {code}: {message}")]
    Backend { code: i64, message: String },

    #[error(transparent)]
    Workflow(#[from] crate::workflow::WorkflowError),

    #[error(transparent)]
    Upload(#[from] crate::upload::UploadError),
}

impl Error {
    /// ユーザー向けの固定メッセージ（HTTP系のみ）
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            Error::Http { status, .. } => Some(crate::api::status_message(Some(*status))),
            Error::Network(_) => Some(crate::api::status_message(None)),
            _ => None,
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_validation_is_bare_message() {
        let error = Error::Validation("请选择要删除的印章".to_string());
        assert_eq!(error.to_string(), "请选择要删除的印章");
    }

    #[test]
    fn test_error_display_http() {
        let error = Error::Http { status: 404, message: "Not Found".to_string() };
        assert_eq!(error.to_string(), "HTTP 404: Not Found");
    }

    #[test]
    fn test_status_message_for_http_and_network() {
        let error = Error::Http { status: 401, message: String::new() };
        assert_eq!(error.status_message(), Some("未授权，请登录"));

        let error = Error::Network("connection refused".to_string());
        assert_eq!(error.status_message(), Some("网络错误，请检查您的连接"));

        let error = Error::Config("x".to_string());
        assert_eq!(error.status_message(), None);
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_from_workflow_is_transparent() {
        let error: Error = crate::workflow::WorkflowError::AlreadySubmitting.into();
        assert_eq!(error.to_string(), "正在盖章，请稍候");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Backend { code: 500, message: "失败".to_string() };
        let debug = format!("{:?}", error);
        assert!(debug.contains("Backend"));
        assert!(debug.contains("失败"));
    }
}
