//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。路由服务通过注入的认证信号
//! 检查状态；这里的信号始终是 `SessionContext` 的投影，不另存副本。

use leptos::prelude::*;

use after_midnight_client::{ApiError, SessionEvents, SessionHandle};
use after_midnight_shared::{LoginRequest, RegisterRequest, User};

use crate::components::toast::Notify;
use crate::services::ServicesHandle;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 当前用户（仅在认证成功后存在）
    pub user: Option<User>,
    /// 是否已认证
    pub is_authenticated: bool,
    /// 是否正在初始化
    pub is_loading: bool,
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated)
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：从持久化会话恢复上次的登录
pub fn init_auth(ctx: &AuthContext, session: &SessionHandle) {
    let user = session.user();
    let is_authenticated = session.is_authenticated();
    ctx.set_state.update(|state| {
        state.user = user;
        state.is_authenticated = is_authenticated;
        state.is_loading = false;
    });
}

/// 登录：凭据换 token，写入会话并同步信号。
///
/// 跳转由路由服务监听认证信号自动完成，这里不导航。
pub async fn login(
    services: ServicesHandle,
    ctx: &AuthContext,
    req: &LoginRequest,
) -> Result<User, ApiError> {
    let (auth, session) = services.with_value(|s| (s.auth(), s.session().clone()));
    let res = auth.login(req).await?;
    session.login(res.user.clone(), res.token);
    let user = res.user.clone();
    ctx.set_state.update(|state| {
        state.user = Some(res.user);
        state.is_authenticated = true;
    });
    Ok(user)
}

/// 注册成功即登录（服务端注册响应同样携带 token）
pub async fn register(
    services: ServicesHandle,
    ctx: &AuthContext,
    req: &RegisterRequest,
) -> Result<User, ApiError> {
    let (auth, session) = services.with_value(|s| (s.auth(), s.session().clone()));
    let res = auth.register(req).await?;
    session.login(res.user.clone(), res.token);
    let user = res.user.clone();
    ctx.set_state.update(|state| {
        state.user = Some(res.user);
        state.is_authenticated = true;
    });
    Ok(user)
}

/// 注销并清除状态；导航同样交给路由服务
pub fn logout(services: ServicesHandle, ctx: &AuthContext) {
    services.with_value(|s| s.session().logout());
    ctx.set_state.update(|state| {
        state.user = None;
        state.is_authenticated = false;
    });
}

// =========================================================
// 会话过期事件
// =========================================================

/// `SessionEvents` 的浏览器实现
///
/// `ApiClient` 保证整个过期流程只触发一次：这里弹一次提示并翻转
/// 认证信号，路由服务随即把用户送回登录页。
pub struct ExpiryNotifier {
    notify: Notify,
    set_state: WriteSignal<AuthState>,
}

impl ExpiryNotifier {
    pub fn new(notify: Notify, set_state: WriteSignal<AuthState>) -> Self {
        Self { notify, set_state }
    }
}

impl SessionEvents for ExpiryNotifier {
    fn session_expired(&self) {
        self.notify.error("Session expired. Please login again.");
        self.set_state.update(|state| {
            state.user = None;
            state.is_authenticated = false;
        });
    }
}
