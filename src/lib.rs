//! After Midnight 客户端核心
//!
//! 平台无关的 REST 客户端层：
//! - `http`: HTTP 传输抽象（trait + 测试桩）
//! - `client`: 信封解包、Bearer 注入与 401 全局处理
//! - `session`: 持久化认证会话
//! - `resource`: 资源服务层（内容资源 + 认证接口）
//! - `pager` / `feed`: 列表分页与无限滚动状态机
//!
//! 浏览器适配（fetch / localStorage）由 frontend crate 注入。

pub mod client;
pub mod error;
pub mod feed;
pub mod http;
pub mod pager;
pub mod resource;
pub mod session;

pub use client::{ApiClient, SessionEvents};
pub use error::{ApiError, ApiResult};
pub use feed::Feed;
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use pager::{FetchTicket, PagedList};
pub use resource::{AuthApi, ContentResource, ContentService};
pub use session::{SessionContext, SessionHandle, SessionStore};

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub(crate) use {log_info, log_warn};
