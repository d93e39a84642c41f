//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 提供简洁的本地存储接口，并在其上实现
//! 客户端核心所需的会话持久层。

use after_midnight_client::SessionStore;
use after_midnight_shared::{AuthSession, SESSION_STORAGE_KEY};

/// 本地存储操作封装
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值；键不存在或出错时返回 None
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回操作是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除键值对，返回操作是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

/// 基于 LocalStorage 的会话持久层
///
/// 会话记录以 JSON 形式存在固定键名下，页面刷新后由
/// `SessionContext::new` 原样恢复。
pub struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<AuthSession> {
        let raw = LocalStorage::get(SESSION_STORAGE_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    fn save(&self, session: &AuthSession) -> bool {
        match serde_json::to_string(session) {
            Ok(raw) => LocalStorage::set(SESSION_STORAGE_KEY, &raw),
            Err(_) => false,
        }
    }

    fn clear(&self) -> bool {
        LocalStorage::delete(SESSION_STORAGE_KEY)
    }
}
