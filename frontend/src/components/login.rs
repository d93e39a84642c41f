use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_client::ApiError;
use after_midnight_shared::LoginRequest;

use crate::auth::{login, use_auth};
use crate::components::icons::Moon;
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn LoginPage() -> impl IntoView {
    let services = use_services();
    let auth_ctx = use_auth();
    let notify = use_notify();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            let req = LoginRequest {
                email: email.get_untracked(),
                password: password.get_untracked(),
            };
            match login(services, &auth_ctx, &req).await {
                Ok(user) => {
                    // 跳转由路由服务监听认证状态自动处理
                    notify.success(&format!("Welcome back, {}", user.username));
                }
                Err(ApiError::AuthExpired) => {
                    // 登录接口的 401 意味着凭据不对，而不是会话过期
                    set_error_msg.set(Some("Invalid email or password".to_string()));
                }
                Err(e) => set_error_msg.set(Some(e.message().to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <Moon attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold font-serif">"Welcome Back"</h1>
                        <p class="text-base-content/70">"Sign in to continue your journey"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg.get().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Sign In".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>

                <p class="text-sm text-base-content/60">
                    "Don't have an account? "
                    <a class="link link-primary" on:click=move |_| router.navigate(AppRoute::Register)>
                        "Register for free"
                    </a>
                </p>
            </div>
        </div>
    }
}
