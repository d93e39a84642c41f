//! 服务装配模块
//!
//! 把共享的 `ApiClient` 包装成各资源的类型化服务。服务集合内部是
//! `Rc` 共享，不是 Send 的，所以放进线程本地的 `StoredValue` 里，
//! 组件通过 Copy 的句柄访问。会话句柄与 HTTP 层共享同一个
//! `SessionContext`。

use std::rc::Rc;

use leptos::prelude::*;

use after_midnight_client::{ApiClient, AuthApi, ContentService, SessionHandle};
use after_midnight_shared::{Poem, Song, Thought};

use crate::web::BrowserHttpClient;

pub type Client = ApiClient<BrowserHttpClient>;

pub struct Services {
    session: SessionHandle,
    client: Rc<Client>,
}

/// 跨组件传递的服务句柄
pub type ServicesHandle = StoredValue<Services, LocalStorage>;

impl Services {
    pub fn new(session: SessionHandle, client: Rc<Client>) -> Self {
        Self { session, client }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub fn poems(&self) -> ContentService<Poem, BrowserHttpClient> {
        ContentService::new(self.client.clone())
    }

    pub fn thoughts(&self) -> ContentService<Thought, BrowserHttpClient> {
        ContentService::new(self.client.clone())
    }

    pub fn songs(&self) -> ContentService<Song, BrowserHttpClient> {
        ContentService::new(self.client.clone())
    }

    pub fn auth(&self) -> AuthApi<BrowserHttpClient> {
        AuthApi::new(self.client.clone())
    }
}

/// 装配服务集合并放入 Context
pub fn provide_services(session: SessionHandle, client: Rc<Client>) -> ServicesHandle {
    let handle = StoredValue::new_local(Services::new(session, client));
    provide_context(handle);
    handle
}

/// 从 Context 获取服务句柄
pub fn use_services() -> ServicesHandle {
    use_context::<ServicesHandle>().expect("Services should be provided")
}
