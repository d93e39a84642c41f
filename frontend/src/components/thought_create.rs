use leptos::prelude::*;
use leptos::task::spawn_local;

use after_midnight_shared::{CreateThoughtRequest, PublicationStatus};

use crate::components::icons::ArrowLeft;
use crate::components::toast::use_notify;
use crate::services::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn CreateThoughtPage() -> impl IntoView {
    let services = use_services();
    let notify = use_notify();
    let router = use_router();

    let content = RwSignal::new(String::new());
    let status = RwSignal::new(PublicationStatus::Draft);
    let submitting = RwSignal::new(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if content.get().trim().is_empty() {
            notify.error("A thought needs some words");
            return;
        }

        submitting.set(true);
        let svc = services.with_value(|s| s.thoughts());
        spawn_local(async move {
            let req = CreateThoughtRequest {
                content: content.get_untracked(),
                status: Some(status.get_untracked()),
            };
            match svc.create(&req).await {
                Ok(_) => {
                    notify.success("Thought shared");
                    router.navigate(AppRoute::Thoughts);
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
                    on:click=move |_| router.navigate(AppRoute::Thoughts)
                >
                    <ArrowLeft attr:class="h-4 w-4 mr-1" /> "Back to Thoughts"
                </button>

                <div class="space-y-1">
                    <h1 class="text-3xl font-serif">"Share a Thought"</h1>
                    <p class="text-base-content/60">"Catch it before it fades"</p>
                </div>

                <form class="space-y-6" on:submit=on_submit>
                    <div class="form-control">
                        <textarea
                            class="textarea textarea-bordered h-40 font-serif text-lg italic"
                            placeholder="What crosses your mind tonight?"
                            on:input=move |ev| content.set(event_target_value(&ev))
                            prop:value=content
                        ></textarea>
                    </div>

                    <div class="flex items-center justify-between">
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
                                view! { <span class="loading loading-spinner"></span> "Sharing..." }.into_any()
                            } else {
                                "Share".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
