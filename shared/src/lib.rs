// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 已认证请求携带的请求头
pub const HEADER_AUTHORIZATION: &str = "Authorization";
/// Bearer 凭据前缀
pub const BEARER_PREFIX: &str = "Bearer ";
/// 会话记录在持久存储中的固定键名
pub const SESSION_STORAGE_KEY: &str = "aftermidnight_session";

pub mod auth;
pub mod content;
pub mod envelope;
pub mod page;

pub use auth::{AuthResponse, AuthSession, LoginRequest, RegisterRequest, User};
pub use content::{
    CreatePoemRequest, CreateSongRequest, CreateThoughtRequest, Poem, PublicationStatus, Song,
    Thought,
};
pub use envelope::ApiEnvelope;
pub use page::Page;

// =========================================================
// 服务端错误码 (Server Error Codes)
// =========================================================

/// 服务端响应信封 `errorCode` 字段的已知取值。
///
/// 客户端只透传展示，不依赖具体取值做分支，所以保留为字符串常量
/// 而不是枚举。
pub mod error_code {
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
    pub const TOO_MANY_REQUESTS: &str = "TOO_MANY_REQUESTS";
}
