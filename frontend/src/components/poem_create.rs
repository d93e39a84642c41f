use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_shared::{CreatePoemRequest, PublicationStatus};

use crate::components::icons::ArrowLeft;
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CreatePoemPage() -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let title = RwSignal::new(String::new());
    let content = RwSignal::new(String::new());
    let status = RwSignal::new(PublicationStatus::Draft);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get().trim().is_empty() || content.get().trim().is_empty() {
            notify.error("Title and content are required");
            return;
        }

        submitting.set(true);
        let svc = services.with_value(|s| s.poems());
        spawn_local(async move {
            let req = CreatePoemRequest {
                title: title.get_untracked(),
                content: content.get_untracked(),
                status: Some(status.get_untracked()),
            };
            match svc.create(&req).await {
                Ok(_) => {
                    notify.success("Poem saved successfully");
                    router.navigate(AppRoute::Poems);
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
                    on:click=move |_| router.navigate(AppRoute::Poems)
                >
                    <ArrowLeft attr:class="h-4 w-4 mr-1" /> "Back to Poems"
                </button>

                <div class="space-y-1">
                    <h1 class="text-3xl font-serif">"Compose Poem"</h1>
                    <p class="text-base-content/60">"Let your words flow"</p>
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
                        <label class="label" for="content">
                            <span class="label-text">"Content"</span>
                        </label>
                        <textarea
                            id="content"
                            class="textarea textarea-bordered h-64 font-serif text-lg leading-relaxed"
                            placeholder="Write something beautiful..."
                            on:input=move |ev| content.set(event_target_value(&ev))
                            prop:value=content
                        ></textarea>
                    </div>

                    <div class="flex items-center justify-between pt-4">
                        <div class="flex items-center gap-4">
                            <span class="text-sm font-medium opacity-80">"Status:"</span>
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
                        </div>

                        <button class="btn btn-primary px-8" disabled=move || submitting.get()>
                            {move || if submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                            } else {
                                "Save Poem".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
