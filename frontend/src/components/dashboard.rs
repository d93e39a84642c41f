use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{logout, use_auth};
use crate::components::icons::{Cloud, Feather, LogOut, Moon, Music, Plus};
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 登录后的落地页：问候、三类内容的总量、快捷入口
#[component]
pub fn DashboardPage() -> impl IntoView {
    let services = use_services();
    let auth_ctx = use_auth();
    let notify = use_notify();
    let router = use_router();

    let auth_state = auth_ctx.state;
    let (stats, set_stats) = signal(Option::<(u64, u64, u64)>::None);
    let (loading, set_loading) = signal(true);

    // 并发取三类内容的总数：每类拉一条就能拿到 totalElements
    Effect::new(move |_| {
        let (poems, thoughts, songs) =
            services.with_value(|s| (s.poems(), s.thoughts(), s.songs()));
        spawn_local(async move {
            let (p, t, s) = futures::join!(
                poems.get_all(0, 1, None),
                thoughts.get_all(0, 1, None),
                songs.get_all(0, 1, None)
            );
            match (p, t, s) {
                (Ok(p), Ok(t), Ok(s)) => {
                    set_stats.set(Some((p.total_elements, t.total_elements, s.total_elements)));
                }
                _ => notify.error("Failed to load dashboard stats"),
            }
            set_loading.set(false);
        });
    });

    let on_logout = move |_| {
        logout(services, &auth_ctx);
        // 导航由路由服务的认证状态监听自动处理
    };

    let username = move || {
        auth_state
            .get()
            .user
            .map(|u| u.username)
            .unwrap_or_default()
    };
    let count = move |pick: fn((u64, u64, u64)) -> u64| {
        if loading.get() {
            "-".to_string()
        } else {
            stats.get().map(pick).unwrap_or(0).to_string()
        }
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <Moon attr:class="text-primary h-6 w-6" />
                        <span class="btn btn-ghost text-xl">"After Midnight"</span>
                    </div>
                    <div class="flex-none">
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign Out"
                        </button>
                    </div>
                </div>

                <div class="space-y-1">
                    <h1 class="text-4xl font-serif">
                        "Hello, " <span class="opacity-80">{username}</span>
                    </h1>
                    <p class="text-base-content/60 text-lg">"What will you create tonight?"</p>
                </div>

                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat cursor-pointer" on:click=move |_| router.navigate(AppRoute::Poems)>
                        <div class="stat-figure text-primary">
                            <Feather attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Poems"</div>
                        <div class="stat-value text-primary">{move || count(|s| s.0)}</div>
                        <div class="stat-desc">"View collection"</div>
                    </div>

                    <div class="stat cursor-pointer" on:click=move |_| router.navigate(AppRoute::Thoughts)>
                        <div class="stat-figure text-secondary">
                            <Cloud attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Thoughts"</div>
                        <div class="stat-value text-secondary">{move || count(|s| s.1)}</div>
                        <div class="stat-desc">"Open the feed"</div>
                    </div>

                    <div class="stat cursor-pointer" on:click=move |_| router.navigate(AppRoute::Songs)>
                        <div class="stat-figure text-accent">
                            <Music attr:class="h-8 w-8" />
                        </div>
                        <div class="stat-title">"Songs"</div>
                        <div class="stat-value text-accent">{move || count(|s| s.2)}</div>
                        <div class="stat-desc">"View collection"</div>
                    </div>
                </div>

                <div class="space-y-4">
                    <h2 class="text-2xl font-serif opacity-80">"Quick Actions"</h2>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <button
                            class="btn btn-secondary btn-outline justify-start h-16 text-lg"
                            on:click=move |_| router.navigate(AppRoute::CreatePoem)
                        >
                            <Plus attr:class="h-5 w-5 mr-2" /> "New Poem"
                        </button>
                        <button
                            class="btn btn-secondary btn-outline justify-start h-16 text-lg"
                            on:click=move |_| router.navigate(AppRoute::CreateThought)
                        >
                            <Plus attr:class="h-5 w-5 mr-2" /> "New Thought"
                        </button>
                        <button
                            class="btn btn-secondary btn-outline justify-start h-16 text-lg"
                            on:click=move |_| router.navigate(AppRoute::CreateSong)
                        >
                            <Plus attr:class="h-5 w-5 mr-2" /> "New Song"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
