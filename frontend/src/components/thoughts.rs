use std::rc::Rc;

use leptos::html::Div;
use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_client::Feed;
use after_midnight_shared::{PublicationStatus, Thought};

use crate::components::icons::{Eye, Heart, Plus};
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::VisibilityWatcher;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const PAGE_SIZE: u32 = 10;

/// 随想信息流：无限滚动累积加载
///
/// 底部哨兵进入视口即拉下一页；在途请求期间的重复触发和到底后的触发
/// 都被状态机忽略。默认给所有者展示全部状态，"仅已发布"是显式开关。
#[component]
pub fn ThoughtsPage() -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let feed = RwSignal::new(Feed::<Thought>::new());
    let sentinel = NodeRef::<Div>::new();

    let load_next = move || {
        // 重入保护与到底判断都在状态机里：返回 None 就不发请求
        let Some(Some(page_num)) = feed.try_update(|f| f.try_begin()) else {
            return;
        };
        let status = feed.with_untracked(|f| f.status_filter());
        let svc = services.with_value(|s| s.thoughts());
        spawn_local(async move {
            match svc.get_all(page_num, PAGE_SIZE, status).await {
                Ok(page) => feed.update(|f| f.apply(page)),
                Err(e) => {
                    notify.error(e.message());
                    feed.update(|f| f.fail());
                }
            }
        });
    };

    // 初始加载第 0 页
    Effect::new(move |_| {
        load_next();
    });

    // 哨兵可见性驱动加载；哨兵被重新渲染后重新建立观察。
    // watcher 归 Effect 闭包所有，组件卸载时随 Effect 一起 drop，
    // Drop 里断开观察，不会盯着已脱离文档的节点。
    let watcher = Rc::new(VisibilityWatcher::new({
        let load_next = load_next.clone();
        move || load_next()
    }));
    Effect::new(move |_| {
        match sentinel.get() {
            Some(el) => watcher.watch(&el),
            None => watcher.disconnect(),
        }
    });

    let on_filter_toggle = {
        let load_next = load_next.clone();
        move |ev| {
            let published_only = event_target_checked(&ev);
            let status = published_only.then_some(PublicationStatus::Published);
            feed.update(|f| f.reset(status));
            load_next();
        }
    };

    let is_loading = move || feed.with(|f| f.is_loading());
    let has_more = move || feed.with(|f| f.has_more());
    let is_empty = move || feed.with(|f| f.is_empty());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-8 pb-20">
                <div class="flex justify-between items-center">
                    <div>
                        <h1 class="text-4xl font-serif">"Thoughts"</h1>
                        <p class="text-base-content/60 mt-1">"Fleeting moments, captured."</p>
                    </div>
                    <button
                        class="btn btn-primary btn-sm"
                        on:click=move |_| router.navigate(AppRoute::CreateThought)
                    >
                        <Plus attr:class="h-4 w-4 mr-1" /> "Share Thought"
                    </button>
                </div>

                <label class="label cursor-pointer justify-start gap-3 w-fit">
                    <input type="checkbox" class="toggle toggle-sm" on:change=on_filter_toggle />
                    <span class="label-text opacity-70">"Published only"</span>
                </label>

                <div class="space-y-6">
                    <For
                        each=move || feed.with(|f| f.items().to_vec())
                        key=|thought| thought.id
                        children=move |thought| {
                            let status = thought.status;
                            let date = thought.created_at.format("%b %e, %H:%M").to_string();
                            view! {
                                <div class="card bg-base-100 shadow-md">
                                    <div class="card-body">
                                        <div class="text-xs opacity-40 font-mono text-right">{date}</div>
                                        <p class="text-xl font-serif text-center py-6 italic leading-relaxed">
                                            "\u{201c}" {thought.content.clone()} "\u{201d}"
                                        </p>
                                        <div class="flex justify-between items-center border-t border-base-200 pt-4 text-sm opacity-60">
                                            <span class=move || if status == PublicationStatus::Published {
                                                "badge badge-success badge-outline badge-sm"
                                            } else {
                                                "badge badge-warning badge-outline badge-sm"
                                            }>
                                                {status.to_string()}
                                            </span>
                                            <div class="flex items-center gap-4">
                                                <span class="flex items-center gap-1">
                                                    <Eye attr:class="h-3 w-3" /> {thought.view_count}
                                                </span>
                                                <span class="flex items-center gap-1">
                                                    <Heart attr:class="h-3 w-3" /> {thought.like_count}
                                                </span>
                                            </div>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <Show when=is_loading>
                    <div class="flex justify-center py-8">
                        <span class="loading loading-spinner loading-md"></span>
                    </div>
                </Show>

                // 滚动哨兵：只在还有更多且不在加载中时存在
                <Show when=move || !is_loading() && has_more()>
                    <div node_ref=sentinel class="h-10"></div>
                </Show>

                <Show when=move || !is_loading() && !has_more() && !is_empty()>
                    <p class="text-center opacity-40 text-sm">
                        "You have reached the end of your thoughts."
                    </p>
                </Show>
            </div>
        </div>
    }
}
