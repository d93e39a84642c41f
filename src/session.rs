//! 认证会话
//!
//! 进程内唯一的会话上下文，背后是一条固定键名的持久记录。HTTP 层与
//! 路由守卫都通过同一个 `SessionContext` 读取状态，不允许各自缓存副本。

use std::cell::RefCell;
use std::rc::Rc;

use after_midnight_shared::{AuthSession, User};

// =========================================================
// 持久层抽象
// =========================================================

/// 会话持久存储
///
/// 浏览器端由 localStorage 实现；读写都是同步的。
pub trait SessionStore {
    fn load(&self) -> Option<AuthSession>;
    fn save(&self, session: &AuthSession) -> bool;
    fn clear(&self) -> bool;
}

// =========================================================
// 会话上下文
// =========================================================

/// 会话上下文：内存态 + 持久层
///
/// login / logout 同时更新内存和存储，二者永远一致。
pub struct SessionContext {
    store: Box<dyn SessionStore>,
    current: RefCell<Option<AuthSession>>,
}

/// 跨组件共享的会话句柄
pub type SessionHandle = Rc<SessionContext>;

impl SessionContext {
    /// 从持久存储恢复上次的会话（进程重启后状态保留）
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let current = RefCell::new(store.load());
        Self { store, current }
    }

    /// 登录：原子地写入 user / token / is_authenticated 并持久化
    pub fn login(&self, user: User, token: String) {
        let session = AuthSession {
            user,
            token,
            is_authenticated: true,
        };
        self.store.save(&session);
        *self.current.borrow_mut() = Some(session);
    }

    /// 注销：清空三个字段并持久化清空后的状态
    pub fn logout(&self) {
        self.store.clear();
        *self.current.borrow_mut() = None;
    }

    /// 认证过期处理：清除会话，返回是否真的清掉了东西。
    ///
    /// 多个并发请求同时收到 401 时，只有第一个调用会返回 true，
    /// 后续调用是幂等的空操作，全局副作用（提示 + 跳转）据此只触发一次。
    pub fn expire(&self) -> bool {
        let had_session = self.current.borrow_mut().take().is_some();
        if had_session {
            self.store.clear();
        }
        had_session
    }

    pub fn token(&self) -> Option<String> {
        self.current
            .borrow()
            .as_ref()
            .filter(|s| !s.token.is_empty())
            .map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.current.borrow().as_ref().map(|s| s.user.clone())
    }

    /// is_authenticated 为 true 当且仅当 user 与 token 都非空
    pub fn is_authenticated(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|s| s.is_authenticated && !s.token.is_empty())
    }
}

// =========================================================
// 测试工具: 内存存储
// =========================================================

#[cfg(test)]
pub mod test_store {
    use super::*;

    /// 共享后备的内存存储，clone 共享同一份数据，用来模拟刷新后重新加载
    #[derive(Clone, Default)]
    pub struct MemorySessionStore {
        record: Rc<RefCell<Option<String>>>,
    }

    impl MemorySessionStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn raw(&self) -> Option<String> {
            self.record.borrow().clone()
        }
    }

    impl SessionStore for MemorySessionStore {
        fn load(&self) -> Option<AuthSession> {
            self.record
                .borrow()
                .as_ref()
                .and_then(|raw| serde_json::from_str(raw).ok())
        }

        fn save(&self, session: &AuthSession) -> bool {
            match serde_json::to_string(session) {
                Ok(raw) => {
                    *self.record.borrow_mut() = Some(raw);
                    true
                }
                Err(_) => false,
            }
        }

        fn clear(&self) -> bool {
            *self.record.borrow_mut() = None;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_store::MemorySessionStore;
    use super::*;

    fn test_user() -> User {
        User {
            id: 1,
            username: "nox".to_string(),
            email: "nox@example.com".to_string(),
            roles: vec!["USER".to_string()],
        }
    }

    #[test]
    fn login_persists_and_authenticates() {
        let store = MemorySessionStore::new();
        let ctx = SessionContext::new(Box::new(store.clone()));

        assert!(!ctx.is_authenticated());
        ctx.login(test_user(), "tok-123".to_string());

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.token().as_deref(), Some("tok-123"));
        assert!(store.raw().is_some());
    }

    #[test]
    fn session_survives_reload() {
        let store = MemorySessionStore::new();
        {
            let ctx = SessionContext::new(Box::new(store.clone()));
            ctx.login(test_user(), "tok-123".to_string());
        }

        // 同一存储上新建上下文，相当于页面刷新
        let reloaded = SessionContext::new(Box::new(store));
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user().unwrap().username, "nox");
    }

    #[test]
    fn logout_clears_memory_and_store() {
        let store = MemorySessionStore::new();
        let ctx = SessionContext::new(Box::new(store.clone()));
        ctx.login(test_user(), "tok-123".to_string());

        ctx.logout();

        assert!(!ctx.is_authenticated());
        assert!(ctx.token().is_none());
        assert!(store.raw().is_none());
    }

    #[test]
    fn expire_reports_true_only_once() {
        let store = MemorySessionStore::new();
        let ctx = SessionContext::new(Box::new(store.clone()));
        ctx.login(test_user(), "tok-123".to_string());

        assert!(ctx.expire());
        assert!(!ctx.expire());
        assert!(!ctx.is_authenticated());
        assert!(store.raw().is_none());
    }

    #[test]
    fn empty_token_is_not_authenticated() {
        let store = MemorySessionStore::new();
        let ctx = SessionContext::new(Box::new(store));
        ctx.login(test_user(), String::new());
        assert!(!ctx.is_authenticated());
        assert!(ctx.token().is_none());
    }
}
