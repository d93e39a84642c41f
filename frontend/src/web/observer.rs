//! 视口可见性监听模块
//!
//! 封装 IntersectionObserver：哨兵元素进入视口时触发回调，驱动
//! 信息流加载下一页。观察目标可随渲染更换，drop 时自动断开。

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry};

/// 元素可见性观察者
///
/// 同一时刻只观察一个元素；`watch` 会先断开旧目标再绑定新目标，
/// 哨兵被重新渲染后必须重新调用 `watch`，否则观察的是已脱离文档的节点。
pub struct VisibilityWatcher {
    observer: IntersectionObserver,
    #[allow(dead_code)]
    closure: Closure<dyn Fn(js_sys::Array)>,
}

impl VisibilityWatcher {
    /// 创建观察者；元素可见时调用 `on_visible`
    ///
    /// # Panics
    /// 浏览器不支持 IntersectionObserver 时
    pub fn new<F>(on_visible: F) -> Self
    where
        F: Fn() + 'static,
    {
        let closure = Closure::<dyn Fn(js_sys::Array)>::new(move |entries: js_sys::Array| {
            let visible = entries
                .get(0)
                .dyn_into::<IntersectionObserverEntry>()
                .map(|entry| entry.is_intersecting())
                .unwrap_or(false);
            if visible {
                on_visible();
            }
        });

        let observer = IntersectionObserver::new(closure.as_ref().unchecked_ref())
            .expect("IntersectionObserver unavailable");

        Self { observer, closure }
    }

    /// 切换观察目标（断开旧的，绑定新的）
    pub fn watch(&self, element: &web_sys::Element) {
        self.observer.disconnect();
        self.observer.observe(element);
    }

    /// 停止观察
    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for VisibilityWatcher {
    fn drop(&mut self) {
        self.disconnect();
    }
}
