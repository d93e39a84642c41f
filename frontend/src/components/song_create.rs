use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_shared::{CreateSongRequest, PublicationStatus};

use crate::components::icons::ArrowLeft;
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CreateSongPage() -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let title = RwSignal::new(String::new());
    let lyrics = RwSignal::new(String::new());
    let audio_url = RwSignal::new(String::new());
    let status = RwSignal::new(PublicationStatus::Draft);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() || lyrics.get().trim().is_empty() {
            notify.error("Title and lyrics are required");
            return;
        }

        submitting.set(true);
        let svc = services.with_value(|s| s.songs());
        spawn_local(async move {
            // 音频链接留空时整个字段省略
            let audio = audio_url.get_untracked();
            let audio = if audio.trim().is_empty() {
                None
            } else {
                Some(audio)
            };

            let req = CreateSongRequest {
                title: title.get_untracked(),
                lyrics: lyrics.get_untracked(),
                audio_url: audio,
                status: Some(status.get_untracked()),
            };
            match svc.create(&req).await {
                Ok(_) => {
                    notify.success("Song saved");
                    router.navigate(AppRoute::Songs);
                }
                Err(e) => notify.error(e.message()),
            }
            submitting.set(false);
        });
    };

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-2xl mx-auto space-y-8">
                <button
                    class="btn btn-ghost btn-sm"
                    on:click=move |_| router.navigate(AppRoute::Songs)
                >
                    <ArrowLeft attr:class="h-4 w-4 mr-1" /> "Back to Music"
                </button>

                <div class="space-y-1">
                    <h1 class="text-3xl font-serif">"New Song"</h1>
                    <p class="text-base-content/60">"Words first, melody later"</p>
                </div>

                <form class="space-y-6" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="title">
                            <span class="label-text">"Title"</span>
                        </label>
                        <input
                            id="title"
                            type="text"
                            class="input input-bordered"
                            on:input=move |ev| title.set(event_target_value(&ev))
                            prop:value=title
                        />
                    </div>

                    <div class="form-control">
                        <label class="label" for="lyrics">
                            <span class="label-text">"Lyrics"</span>
                        </label>
                        <textarea
                            id="lyrics"
                            class="textarea textarea-bordered h-64 font-serif leading-relaxed"
                            placeholder="Verse by verse..."
                            on:input=move |ev| lyrics.set(event_target_value(&ev))
                            prop:value=lyrics
                        ></textarea>
                    </div>

                    <div class="form-control">
                        <label class="label" for="audio">
                            <span class="label-text">"Audio URL (optional)"</span>
                        </label>
                        <input
                            id="audio"
                            type="url"
                            placeholder="https://..."
                            class="input input-bordered"
                            on:input=move |ev| audio_url.set(event_target_value(&ev))
                            prop:value=audio_url
                        />
                    </div>

                    <div class="flex items-center justify-between pt-4">
                        <div class="join">
                            <button
                                type="button"
                                class=move || if status.get() == PublicationStatus::Draft {
                                    "btn btn-sm join-item btn-active"
                                } else {
                                    "btn btn-sm join-item"
                                }
                                on:click=move |_| status.set(PublicationStatus::Draft)
                            >
                                "DRAFT"
                            </button>
                            <button
                                type="button"
                                class=move || if status.get() == PublicationStatus::Published {
                                    "btn btn-sm join-item btn-active"
                                } else {
                                    "btn btn-sm join-item"
                                }
                                on:click=move |_| status.set(PublicationStatus::Published)
                            >
                                "PUBLISHED"
                            </button>
                        </div>

                        <button class="btn btn-primary px-8" disabled=move || submitting.get()>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save Song".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
