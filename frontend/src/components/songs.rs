use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_client::PagedList;
use after_midnight_shared::{PublicationStatus, Song};

use crate::components::icons::{Eye, Heart, Music, Plus};
use crate::components::pagination::Pagination;
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const PAGE_SIZE: u32 = 9;

/// 歌曲列表：与诗列表同构，卡片额外标出有无音频
#[component]
pub fn SongsPage() -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let list = RwSignal::new(PagedList::<Song>::new());
    let page = RwSignal::new(0u32);
    let filter = RwSignal::new(Option::<PublicationStatus>::None);

    Effect::new(move |_| {
        let requested = page.get();
        let status = filter.get();
        let Some(ticket) = list.try_update(|l| l.begin()) else {
            return;
        };
        let svc = services.with_value(|s| s.songs());
        spawn_local(async move {
            match svc.get_all(requested, PAGE_SIZE, status).await {
                Ok(result) => {
                    list.update(|l| {
                        l.apply(ticket, result);
                    });
                }
                Err(e) => {
                    notify.error(e.message());
                    list.update(|l| {
                        l.fail(ticket);
                    });
                }
            }
        });
    });

    let on_page_change = move |requested: u32| {
        let clamped = list.with_untracked(|l| l.clamp(requested));
        page.set(clamped);
    };

    let is_loading = move || list.with(|l| l.is_loading());
    let is_empty = move || list.with(|l| l.is_empty());

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-5xl mx-auto space-y-8">
                <div class="flex flex-col md:flex-row justify-between items-center gap-4">
                    <div>
                        <h1 class="text-4xl font-serif">"Songs"</h1>
                        <p class="text-base-content/60 mt-1">"Melodies waiting for daylight"</p>
                    </div>
                    <div class="flex items-center gap-3">
                        <select
                            class="select select-bordered select-sm"
                            on:change=move |ev| {
                                let status = match event_target_value(&ev).as_str() {
                                    "PUBLISHED" => Some(PublicationStatus::Published),
                                    "DRAFT" => Some(PublicationStatus::Draft),
                                    _ => None,
                                };
                                filter.set(status);
                                page.set(0);
                            }
                        >
                            <option value="">"All Songs"</option>
                            <option value="PUBLISHED">"Published"</option>
                            <option value="DRAFT">"Drafts"</option>
                        </select>
                        <button
                            class="btn btn-primary btn-sm"
                            on:click=move |_| router.navigate(AppRoute::CreateSong)
                        >
                            <Plus attr:class="h-4 w-4 mr-1" /> "Create"
                        </button>
                    </div>
                </div>

                <Show when=move || is_loading() && is_empty()>
                    <div class="flex justify-center py-20">
                        <span class="loading loading-spinner loading-lg"></span>
                    </div>
                </Show>

                <Show when=move || !is_loading() && is_empty()>
                    <div class="text-center py-20 bg-base-100 rounded-box">
                        <p class="text-base-content/50 mb-4">"No songs yet."</p>
                        <button
                            class="btn btn-secondary"
                            on:click=move |_| router.navigate(AppRoute::CreateSong)
                        >
                            "Write your first song"
                        </button>
                    </div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <For
                        each=move || list.with(|l| l.items().to_vec())
                        key=|song| song.id
                        children=move |song| {
                            let id = song.id;
                            let status = song.status;
                            let has_audio = song.audio_url.is_some();
                            let date = song.created_at.format("%b %e, %Y").to_string();
                            let preview: String = song.lyrics.chars().take(120).collect();
                            view! {
                                <div
                                    class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow cursor-pointer"
                                    on:click=move |_| router.navigate(AppRoute::SongDetail(id))
                                >
                                    <div class="card-body">
                                        <div class="flex justify-between items-start">
                                            <span class=move || if status == PublicationStatus::Published {
                                                "badge badge-success badge-outline"
                                            } else {
                                                "badge badge-warning badge-outline"
                                            }>
                                                {status.to_string()}
                                            </span>
                                            <span class="text-xs opacity-50 font-mono">{date}</span>
                                        </div>
                                        <h3 class="card-title">
                                            <Music attr:class="h-4 w-4 opacity-50" />
                                            {song.title.clone()}
                                        </h3>
                                        <p class="text-sm opacity-70 font-serif leading-relaxed">{preview}</p>
                                        <div class="flex items-center justify-between mt-4">
                                            <div class="flex items-center gap-4 text-xs opacity-50">
                                                <span class="flex items-center gap-1">
                                                    <Eye attr:class="h-3 w-3" /> {song.view_count}
                                                </span>
                                                <span class="flex items-center gap-1">
                                                    <Heart attr:class="h-3 w-3" /> {song.like_count}
                                                </span>
                                            </div>
                                            <Show when=move || has_audio>
                                                <span class="badge badge-ghost badge-sm">"audio"</span>
                                            </Show>
                                        </div>
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>

                <Pagination
                    current_page=Signal::derive(move || list.with(|l| l.page()))
                    total_pages=Signal::derive(move || list.with(|l| l.total_pages()))
                    on_change=on_page_change
                />
            </div>
        </div>
    }
}
