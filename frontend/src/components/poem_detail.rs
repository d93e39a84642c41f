use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_shared::{Poem, PublicationStatus};

use crate::components::icons::{ArrowLeft, Trash};
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn PoemDetailPage(id: i64) -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let poem = RwSignal::new(Option::<Poem>::None);
    let loading = RwSignal::new(true);

    Effect::new(move |_| {
        let svc = services.with_value(|s| s.poems());
        spawn_local(async move {
            match svc.get_by_id(id).await {
                Ok(p) => poem.set(Some(p)),
                Err(e) => {
                    // 详情拿不到就带着提示回列表
                    if e.is_not_found() {
                        notify.error("Poem not found");
                    } else {
                        notify.error(e.message());
                    }
                    router.navigate(AppRoute::Poems);
                }
            }
            loading.set(false);
        });

        // 浏览计数：独立调度的任务，成败都不影响页面
        let views = services.with_value(|s| s.poems());
        spawn_local(async move {
            views.increment_view(id).await;
        });
    });

    let on_toggle_status = move |_| {
        let Some(current) = poem.get_untracked() else {
            return;
        };
        let next = match current.status {
            PublicationStatus::Draft => PublicationStatus::Published,
            PublicationStatus::Published => PublicationStatus::Draft,
        };
        let svc = services.with_value(|s| s.poems());
        spawn_local(async move {
            match svc.update_status(id, next).await {
                Ok(updated) => {
                    poem.set(Some(updated));
                    notify.success("Status updated");
                }
                Err(e) => notify.error(e.message()),
            }
        });
    };

    let on_delete = move |_| {
        let confirmed = web_sys::window()
            .map(|w| w.confirm_with_message("Delete this poem?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let svc = services.with_value(|s| s.poems());
        spawn_local(async move {
            match svc.delete(id).await {
                Ok(()) => {
                    notify.success("Poem deleted");
                    router.navigate(AppRoute::Poems);
                }
                Err(e) => notify.error(e.message()),
            }
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-10">
                <div class="flex justify-between items-center">
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| router.navigate(AppRoute::Poems)
                    >
                        <ArrowLeft attr:class="h-4 w-4 mr-1" /> "Back"
                    </button>
                    <Show when=move || poem.get().is_some()>
                        <div class="flex gap-2">
                            <button class="btn btn-outline btn-sm" on:click=on_toggle_status.clone()>
                                {move || match poem.get().map(|p| p.status) {
                                    Some(PublicationStatus::Draft) => "Publish",
                                    _ => "Unpublish",
                                }}
                            </button>
                            <button class="btn btn-outline btn-error btn-sm" on:click=on_delete.clone()>
                                <Trash attr:class="h-4 w-4 mr-1" /> "Delete"
                            </button>
                        </div>
                    </Show>
                </div>

                <Show when=move || loading.get()>
                    <div class="flex justify-center py-20">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                </Show>

                <Show when=move || poem.get().is_some()>
                    <div class="text-center space-y-4">
                        <h1 class="text-4xl md:text-5xl font-serif">
                            {move || poem.get().map(|p| p.title).unwrap_or_default()}
                        </h1>
                        <div class="flex justify-center items-center gap-4 text-sm opacity-50 font-mono">
                            <span>
                                {move || poem.get()
                                    .map(|p| p.created_at.format("%B %e, %Y").to_string())
                                    .unwrap_or_default()}
                            </span>
                            <span>"\u{2022}"</span>
                            <span>
                                {move || poem.get()
                                    .map(|p| format!("{} views", p.view_count))
                                    .unwrap_or_default()}
                            </span>
                        </div>
                    </div>

                    <article class="font-serif text-lg leading-loose text-center whitespace-pre-wrap opacity-90">
                        {move || poem.get().map(|p| p.content).unwrap_or_default()}
                    </article>
                </Show>
            </div>
        </div>
    }
}
