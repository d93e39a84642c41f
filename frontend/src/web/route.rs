//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由、路径解析以及访问守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 公开首页 (默认路由)
    #[default]
    Home,
    Login,
    Register,
    /// 登录后的落地页
    Dashboard,
    Poems,
    PoemDetail(i64),
    CreatePoem,
    Songs,
    SongDetail(i64),
    CreateSong,
    Thoughts,
    CreateThought,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/dashboard" => Self::Dashboard,
            "/poems" => Self::Poems,
            "/poems/create" => Self::CreatePoem,
            "/songs" => Self::Songs,
            "/songs/create" => Self::CreateSong,
            "/thoughts" => Self::Thoughts,
            "/thoughts/create" => Self::CreateThought,
            other => {
                if let Some(id) = other.strip_prefix("/poems/").and_then(|s| s.parse().ok()) {
                    return Self::PoemDetail(id);
                }
                if let Some(id) = other.strip_prefix("/songs/").and_then(|s| s.parse().ok()) {
                    return Self::SongDetail(id);
                }
                Self::NotFound
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Poems => "/poems".to_string(),
            Self::PoemDetail(id) => format!("/poems/{}", id),
            Self::CreatePoem => "/poems/create".to_string(),
            Self::Songs => "/songs".to_string(),
            Self::SongDetail(id) => format!("/songs/{}", id),
            Self::CreateSong => "/songs/create".to_string(),
            Self::Thoughts => "/thoughts".to_string(),
            Self::CreateThought => "/thoughts/create".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Self::Home | Self::Login | Self::Register | Self::NotFound
        )
    }

    /// 已认证用户是否应该离开此路由（公开入口页：首页/登录/注册）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Home | Self::Login | Self::Register)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 已认证访问公开入口时的重定向目标
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_static_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/thoughts"), AppRoute::Thoughts);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn parses_detail_paths_with_ids() {
        assert_eq!(AppRoute::from_path("/poems/42"), AppRoute::PoemDetail(42));
        assert_eq!(AppRoute::from_path("/songs/7"), AppRoute::SongDetail(7));
        // create 优先于 id 解析
        assert_eq!(AppRoute::from_path("/poems/create"), AppRoute::CreatePoem);
        // 非数字 id 不是合法路由
        assert_eq!(AppRoute::from_path("/poems/abc"), AppRoute::NotFound);
    }

    #[test]
    fn path_round_trip() {
        for route in [
            AppRoute::Home,
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Poems,
            AppRoute::PoemDetail(3),
            AppRoute::CreateSong,
            AppRoute::Thoughts,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    /// 守卫矩阵：未认证访问受保护路由一律回登录页
    #[test]
    fn protected_routes_require_auth() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Poems,
            AppRoute::PoemDetail(1),
            AppRoute::CreatePoem,
            AppRoute::Songs,
            AppRoute::SongDetail(1),
            AppRoute::CreateSong,
            AppRoute::Thoughts,
            AppRoute::CreateThought,
        ] {
            assert!(route.requires_auth(), "{:?} should be protected", route);
            assert!(!route.should_redirect_when_authenticated());
        }
        assert_eq!(AppRoute::auth_failure_redirect(), AppRoute::Login);
    }

    /// 守卫矩阵：已认证访问公开入口一律转落地页
    #[test]
    fn public_entries_redirect_when_authenticated() {
        for route in [AppRoute::Home, AppRoute::Login, AppRoute::Register] {
            assert!(!route.requires_auth());
            assert!(route.should_redirect_when_authenticated());
        }
        // 404 页两边都不拦
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(!AppRoute::NotFound.should_redirect_when_authenticated());
        assert_eq!(AppRoute::auth_success_redirect(), AppRoute::Dashboard);
    }
}
