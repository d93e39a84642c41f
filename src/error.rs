use std::fmt;

// =========================================================
// 客户端错误分类
// =========================================================

/// API 调用错误
///
/// 每个变体对应一类终止性失败，客户端不做任何自动重试：
/// - `Network`: 传输层失败，没有拿到响应
/// - `AuthExpired`: 401，全局处理（清会话 + 跳转登录），调用方只收到拒绝
/// - `NotFound`: 404，由调用方决定善后（详情页回退到列表）
/// - `Validation`: 其余 4xx，消息原样展示给用户
/// - `Server`: 5xx 或信封 `success=false`
/// - `Decode`: 响应体不是合法的信封 JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    Network(String),
    AuthExpired,
    NotFound(String),
    Validation {
        error_code: Option<String>,
        message: String,
    },
    Server {
        error_code: Option<String>,
        message: String,
    },
    Decode(String),
}

impl ApiError {
    /// 展示给用户的消息文本
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(msg) => msg,
            ApiError::AuthExpired => "Session expired. Please login again.",
            ApiError::NotFound(msg) => msg,
            ApiError::Validation { message, .. } => message,
            ApiError::Server { message, .. } => message,
            ApiError::Decode(msg) => msg,
        }
    }

    /// 机器可读错误码（来自信封 `errorCode`，传输层错误没有）
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Validation { error_code, .. } | ApiError::Server { error_code, .. } => {
                error_code.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "[NETWORK] {}", msg),
            ApiError::AuthExpired => write!(f, "[AUTH_EXPIRED] session no longer valid"),
            ApiError::NotFound(msg) => write!(f, "[NOT_FOUND] {}", msg),
            ApiError::Validation {
                error_code,
                message,
            } => write!(
                f,
                "[{}] {}",
                error_code.as_deref().unwrap_or("VALIDATION"),
                message
            ),
            ApiError::Server {
                error_code,
                message,
            } => write!(
                f,
                "[{}] {}",
                error_code.as_deref().unwrap_or("SERVER"),
                message
            ),
            ApiError::Decode(msg) => write!(f, "[DECODE] {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
