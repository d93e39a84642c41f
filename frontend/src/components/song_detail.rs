use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_shared::{PublicationStatus, Song};

use crate::components::icons::{ArrowLeft, Disc, Trash};
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn SongDetailPage(id: i64) -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let song = RwSignal::new(Option::<Song>::None);
    let loading = RwSignal::new(true);

    Effect::new(move |_| {
        let svc = services.with_value(|s| s.songs());
        spawn_local(async move {
            match svc.get_by_id(id).await {
                Ok(s) => song.set(Some(s)),
                Err(e) => {
                    if e.is_not_found() {
                        notify.error("Song not found");
                    } else {
                        notify.error(e.message());
                    }
                    router.navigate(AppRoute::Songs);
                }
            }
            loading.set(false);
        });

        let views = services.with_value(|s| s.songs());
        spawn_local(async move {
            views.increment_view(id).await;
        });
    });

    let on_toggle_status = move |_| {
        let Some(current) = song.get_untracked() else {
            return;
        };
        let next = match current.status {
            PublicationStatus::Draft => PublicationStatus::Published,
            PublicationStatus::Published => PublicationStatus::Draft,
        };
        let svc = services.with_value(|s| s.songs());
        spawn_local(async move {
            match svc.update_status(id, next).await {
                Ok(updated) => {
                    song.set(Some(updated));
                    notify.success("Status updated");
                }
                Err(e) => notify.error(e.message()),
            }
        });
    };

    let on_delete = move |_| {
        let confirmed = web_sys::window()
            .map(|w| w.confirm_with_message("Delete this song?").unwrap_or(false))
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let svc = services.with_value(|s| s.songs());
        spawn_local(async move {
            match svc.delete(id).await {
                Ok(()) => {
                    notify.success("Song deleted");
                    router.navigate(AppRoute::Songs);
                }
                Err(e) => notify.error(e.message()),
            }
        });
    };

    let has_audio = move || song.get().map(|s| s.audio_url.is_some()).unwrap_or(false);

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-3xl mx-auto space-y-10">
                <div class="flex justify-between items-center">
                    <button
                        class="btn btn-ghost btn-sm"
                        on:click=move |_| router.navigate(AppRoute::Songs)
                    >
                        <ArrowLeft attr:class="h-4 w-4 mr-1" /> "Back to Music"
                    </button>
                    <Show when=move || song.get().is_some()>
                        <div class="flex gap-2">
                            <button class="btn btn-outline btn-sm" on:click=on_toggle_status.clone()>
                                {move || match song.get().map(|s| s.status) {
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

                <Show when=move || song.get().is_some()>
                    <div class="card bg-base-100 shadow-xl">
                        <div class="card-body items-center text-center space-y-4">
                            <Disc attr:class="h-16 w-16 opacity-20" />
                            <h1 class="text-3xl md:text-4xl font-serif font-bold">
                                {move || song.get().map(|s| s.title).unwrap_or_default()}
                            </h1>
                            <div class="text-xs opacity-50 font-mono">
                                {move || song.get()
                                    .map(|s| format!(
                                        "Uploaded {} \u{2022} {} views",
                                        s.created_at.format("%b %e, %Y"),
                                        s.view_count
                                    ))
                                    .unwrap_or_default()}
                            </div>
                            <Show
                                when=has_audio
                                fallback=|| view! {
                                    <p class="opacity-40 text-sm italic">"No audio source"</p>
                                }
                            >
                                <audio
                                    controls
                                    class="w-full max-w-md"
                                    src=move || song.get().and_then(|s| s.audio_url).unwrap_or_default()
                                ></audio>
                            </Show>
                        </div>
                    </div>

                    <article class="font-serif leading-loose whitespace-pre-wrap text-center opacity-90">
                        {move || song.get().map(|s| s.lyrics).unwrap_or_default()}
                    </article>
                </Show>
            </div>
        </div>
    }
}
