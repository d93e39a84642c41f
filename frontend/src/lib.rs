//! After Midnight 前端应用
//!
//! Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型，纯逻辑）
//! - `web::router`: 路由服务（守卫 + History 封装）
//! - `auth`: 认证状态管理
//! - `services`: API 客户端与资源服务的装配
//! - `components`: UI 组件层

mod auth;
mod services;

mod components {
    pub mod dashboard;
    pub mod home;
    mod icons;
    pub mod login;
    mod pagination;
    pub mod poem_create;
    pub mod poem_detail;
    pub mod poems;
    pub mod register;
    pub mod song_create;
    pub mod song_detail;
    pub mod songs;
    pub mod thought_create;
    pub mod thoughts;
    pub mod toast;
}

// 原生 Web API 封装模块
// 对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod http;
    pub mod observer;
    pub mod route;
    pub mod router;
    pub mod storage;

    pub use http::BrowserHttpClient;
    pub use observer::VisibilityWatcher;
    pub use storage::BrowserSessionStore;
}

use std::rc::Rc;

use leptos::prelude::*;

use after_midnight_client::{ApiClient, SessionContext, SessionHandle};

use crate::auth::{AuthContext, ExpiryNotifier, init_auth};
use crate::components::dashboard::DashboardPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::poem_create::CreatePoemPage;
use crate::components::poem_detail::PoemDetailPage;
use crate::components::poems::PoemsPage;
use crate::components::register::RegisterPage;
use crate::components::song_create::CreateSongPage;
use crate::components::song_detail::SongDetailPage;
use crate::components::songs::SongsPage;
use crate::components::thought_create::CreateThoughtPage;
use crate::components::thoughts::ThoughtsPage;
use crate::components::toast::{ToastHost, provide_notify};
use crate::services::provide_services;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};
use crate::web::{BrowserHttpClient, BrowserSessionStore};

/// 后端基地址，构建时通过环境变量覆盖
const API_BASE: &str = match option_env!("AFTER_MIDNIGHT_API_URL") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

/// 路由匹配函数：根据 AppRoute 枚举返回对应的视图组件
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Poems => view! { <PoemsPage /> }.into_any(),
        AppRoute::PoemDetail(id) => view! { <PoemDetailPage id=id /> }.into_any(),
        AppRoute::CreatePoem => view! { <CreatePoemPage /> }.into_any(),
        AppRoute::Songs => view! { <SongsPage /> }.into_any(),
        AppRoute::SongDetail(id) => view! { <SongDetailPage id=id /> }.into_any(),
        AppRoute::CreateSong => view! { <CreateSongPage /> }.into_any(),
        AppRoute::Thoughts => view! { <ThoughtsPage /> }.into_any(),
        AppRoute::CreateThought => view! { <CreateThoughtPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"This page slipped into the night."</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 全局通知
    let notify = provide_notify();

    // 2. 认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 3. 会话 + API 客户端装配。401 事件由 ExpiryNotifier 转成一次性
    //    提示并翻转认证信号，路由服务监听信号完成跳转。
    let session: SessionHandle = Rc::new(SessionContext::new(Box::new(BrowserSessionStore)));
    let events = Rc::new(ExpiryNotifier::new(notify, auth_ctx.set_state));
    let client = Rc::new(ApiClient::new(
        API_BASE,
        BrowserHttpClient,
        session.clone(),
        events,
    ));
    provide_services(session.clone(), client);

    // 4. 从持久存储恢复会话状态
    init_auth(&auth_ctx, &session);

    // 5. 注入认证信号，路由守卫据此评估
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let auth_state = auth_ctx.state;

    view! {
        <Router is_authenticated=is_authenticated>
            <ToastHost />
            // 初始化完成前渲染中性占位，受保护内容绝不闪现
            <Show
                when=move || !auth_state.get().is_loading
                fallback=|| view! {
                    <div class="flex items-center justify-center min-h-screen bg-base-200">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                }
            >
                <RouterOutlet matcher=route_matcher />
            </Show>
        </Router>
    }
}
