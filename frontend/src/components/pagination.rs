//! 分页控件
//!
//! 只在多于一页时显示；首尾页禁用对应按钮，因此永远不会请求越界页码。

use leptos::prelude::*;

use crate::components::icons::{ChevronLeft, ChevronRight};

#[component]
pub fn Pagination(
    #[prop(into)] current_page: Signal<u32>,
    #[prop(into)] total_pages: Signal<u32>,
    #[prop(into)] on_change: Callback<u32>,
) -> impl IntoView {
    let at_start = move || current_page.get() == 0;
    let at_end = move || current_page.get() + 1 >= total_pages.get();
    let label = move || format!("{} / {}", current_page.get() + 1, total_pages.get());

    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="flex items-center justify-center gap-4 mt-8">
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=at_start
                    on:click=move |_| on_change.run(current_page.get().saturating_sub(1))
                >
                    <ChevronLeft attr:class="h-4 w-4" />
                </button>
                <span class="font-mono text-sm opacity-60">{label}</span>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=at_end
                    on:click=move |_| on_change.run(current_page.get() + 1)
                >
                    <ChevronRight attr:class="h-4 w-4" />
                </button>
            </div>
        </Show>
    }
}
