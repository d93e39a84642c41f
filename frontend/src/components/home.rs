use leptos::prelude::*;

use crate::components::icons::Moon;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 公开首页；已登录用户会被路由守卫直接送去控制台
#[component]
pub fn HomePage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-6">
                    <div class="flex justify-center text-primary">
                        <Moon attr:class="h-12 w-12" />
                    </div>
                    <h1 class="text-5xl font-bold font-serif">"After Midnight"</h1>
                    <p class="text-base-content/70">
                        "A quiet place for the poems, thoughts and songs that only arrive after midnight."
                    </p>
                    <div class="flex justify-center gap-3">
                        <button
                            class="btn btn-primary"
                            on:click=move |_| router.navigate(AppRoute::Login)
                        >
                            "Sign In"
                        </button>
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| router.navigate(AppRoute::Register)
                        >
                            "Register"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
