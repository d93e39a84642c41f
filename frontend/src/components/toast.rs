//! 全局通知
//!
//! 一次只显示一条通知，3 秒后自动消失。

use leptos::prelude::*;

/// 通知句柄，通过 Context 共享
#[derive(Clone, Copy)]
pub struct Notify {
    message: RwSignal<Option<(String, bool)>>, // 消息内容, 是否出错
}

impl Notify {
    pub fn success(&self, msg: &str) {
        self.message.set(Some((msg.to_string(), false)));
    }

    pub fn error(&self, msg: &str) {
        self.message.set(Some((msg.to_string(), true)));
    }
}

pub fn provide_notify() -> Notify {
    let notify = Notify {
        message: RwSignal::new(None),
    };
    provide_context(notify);
    notify
}

pub fn use_notify() -> Notify {
    use_context::<Notify>().expect("Notify should be provided")
}

/// 通知展示组件，放在 App 根部
#[component]
pub fn ToastHost() -> impl IntoView {
    let notify = use_notify();
    let message = notify.message;

    // 3秒后清除通知
    Effect::new(move |_| {
        if message.get().is_some() {
            set_timeout(
                move || message.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    view! {
        <Show when=move || message.get().is_some()>
            <div class="toast toast-top toast-end z-50">
                <div class=move || {
                    let (_, is_err) = message.get().unwrap();
                    if is_err {
                        "alert alert-error shadow-lg"
                    } else {
                        "alert alert-success shadow-lg"
                    }
                }>
                    <span>{move || message.get().map(|(m, _)| m).unwrap_or_default()}</span>
                </div>
            </div>
        </Show>
    }
}
