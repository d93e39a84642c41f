//! 资源服务层
//!
//! 三类内容的接口形状完全一致（列表/详情/创建/改状态/删除/计浏览），
//! 用一个带路径常量的 trait 把它们收敛成同一个泛型服务。

use std::marker::PhantomData;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use after_midnight_shared::{
    AuthResponse, CreatePoemRequest, CreateSongRequest, CreateThoughtRequest, LoginRequest, Page,
    Poem, PublicationStatus, RegisterRequest, Song, Thought,
};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::log_info;

/// 定义一种内容资源的端点元数据
pub trait ContentResource: DeserializeOwned + 'static {
    /// 资源根路径（版本化基路径之下）
    const PATH: &'static str;
    /// 创建该资源的请求体类型
    type Create: Serialize;
}

impl ContentResource for Poem {
    const PATH: &'static str = "/poems";
    type Create = CreatePoemRequest;
}

impl ContentResource for Thought {
    const PATH: &'static str = "/thoughts";
    type Create = CreateThoughtRequest;
}

impl ContentResource for Song {
    const PATH: &'static str = "/songs";
    type Create = CreateSongRequest;
}

// =========================================================
// 内容服务
// =========================================================

/// 某一种内容资源的类型化服务，一个方法对应一个端点
pub struct ContentService<T: ContentResource, C: HttpClient> {
    client: Rc<ApiClient<C>>,
    _marker: PhantomData<T>,
}

impl<T: ContentResource, C: HttpClient> ContentService<T, C> {
    pub fn new(client: Rc<ApiClient<C>>) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// 取一页列表。`status` 为 None 时不带 status 参数，
    /// 服务端把缺省理解为“全部状态”。
    pub async fn get_all(
        &self,
        page: u32,
        size: u32,
        status: Option<PublicationStatus>,
    ) -> ApiResult<Page<T>> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(status) = status {
            query.push(("status", status.as_str().to_string()));
        }
        self.client.get_query(T::PATH, &query).await
    }

    /// id 不存在时以 NotFound 失败
    pub async fn get_by_id(&self, id: i64) -> ApiResult<T> {
        self.client.get(&format!("{}/{}", T::PATH, id)).await
    }

    pub async fn create(&self, payload: &T::Create) -> ApiResult<T> {
        self.client.post(T::PATH, payload).await
    }

    pub async fn update_status(&self, id: i64, status: PublicationStatus) -> ApiResult<T> {
        self.client
            .patch_query(
                &format!("{}/{}/status", T::PATH, id),
                &[("status", status.as_str().to_string())],
            )
            .await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&format!("{}/{}", T::PATH, id)).await
    }

    /// 浏览计数：发后即忘。失败只记日志，绝不上抛，调用方不能因为
    /// 计数失败阻塞页面跳转。
    pub async fn increment_view(&self, id: i64) {
        if let Err(e) = self
            .client
            .post_empty(&format!("{}/{}/view", T::PATH, id))
            .await
        {
            log_info!("[{}] view increment for {} dropped: {}", T::PATH, id, e);
        }
    }
}

// =========================================================
// 认证服务
// =========================================================

pub struct AuthApi<C: HttpClient> {
    client: Rc<ApiClient<C>>,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(client: Rc<ApiClient<C>>) -> Self {
        Self { client }
    }

    pub async fn login(&self, req: &LoginRequest) -> ApiResult<AuthResponse> {
        self.client.post("/auth/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.client.post("/auth/register", req).await
    }
}

// =========================================================
// 单元测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::NoSessionEvents;
    use crate::http::MockHttpClient;
    use crate::session::SessionContext;
    use crate::session::test_store::MemorySessionStore;
    use serde_json::json;

    const BASE: &str = "http://localhost:8080/api/v1";

    fn client_with(http: MockHttpClient) -> Rc<ApiClient<MockHttpClient>> {
        let session = Rc::new(SessionContext::new(Box::new(MemorySessionStore::new())));
        Rc::new(ApiClient::new(BASE, http, session, Rc::new(NoSessionEvents)))
    }

    fn envelope_ok(data: serde_json::Value) -> serde_json::Value {
        json!({
            "success": true,
            "message": "ok",
            "data": data,
            "timestamp": "2024-01-16T10:00:00"
        })
    }

    fn thought_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "content": format!("thought {}", id),
            "createdAt": "2024-01-16T10:00:00",
            "status": "PUBLISHED",
            "viewCount": 0,
            "likeCount": 0,
            "userId": 1
        })
    }

    fn page_json(ids: std::ops::Range<i64>, page: u32, size: u32, total: u64) -> serde_json::Value {
        let content: Vec<_> = ids.map(thought_json).collect();
        let total_pages = total.div_ceil(size as u64) as u32;
        json!({
            "content": content,
            "pageNumber": page,
            "pageSize": size,
            "totalElements": total,
            "totalPages": total_pages,
            "last": page + 1 >= total_pages
        })
    }

    #[tokio::test]
    async fn get_all_omits_status_when_unset() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/thoughts?page=0&size=10", BASE),
            200,
            envelope_ok(page_json(0..3, 0, 10, 3)),
        );

        let service = ContentService::<Thought, _>::new(client_with(http));
        let page = service.get_all(0, 10, None).await.unwrap();

        assert_eq!(page.len(), 3);
        assert!(page.last);
    }

    #[tokio::test]
    async fn get_all_appends_status_filter() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/thoughts?page=0&size=10&status=PUBLISHED", BASE),
            200,
            envelope_ok(page_json(0..1, 0, 10, 1)),
        );

        let service = ContentService::<Thought, _>::new(client_with(http));
        let page = service
            .get_all(0, 10, Some(PublicationStatus::Published))
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }

    /// 23 条数据、每页 9 条的分页边界
    #[tokio::test]
    async fn pagination_boundaries_for_23_items() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/thoughts?page=0&size=9", BASE),
            200,
            envelope_ok(page_json(0..9, 0, 9, 23)),
        );
        http.mock_response(
            &format!("{}/thoughts?page=2&size=9", BASE),
            200,
            envelope_ok(page_json(18..23, 2, 9, 23)),
        );

        let service = ContentService::<Thought, _>::new(client_with(http));

        let first = service.get_all(0, 9, None).await.unwrap();
        assert_eq!(first.total_pages, 3);
        assert!(!first.last);

        let third = service.get_all(2, 9, None).await.unwrap();
        assert_eq!(third.len(), 5);
        assert!(third.last);
    }

    /// 同一页在数据不变时取两次，内容一致
    #[tokio::test]
    async fn same_page_is_deterministic() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/thoughts?page=1&size=5", BASE),
            200,
            envelope_ok(page_json(5..10, 1, 5, 12)),
        );

        let service = ContentService::<Thought, _>::new(client_with(http));
        let a = service.get_all(1, 5, None).await.unwrap();
        let b = service.get_all(1, 5, None).await.unwrap();
        assert_eq!(a.content, b.content);
    }

    #[tokio::test]
    async fn create_without_status_sends_no_status_key() {
        let http = MockHttpClient::new();
        let poem = json!({
            "id": 1,
            "title": "t",
            "content": "c",
            "createdAt": "2024-01-16T10:00:00",
            "status": "DRAFT",
            "viewCount": 0,
            "likeCount": 0,
            "userId": 1
        });
        http.mock_response(&format!("{}/poems", BASE), 200, envelope_ok(poem));

        let service = ContentService::<Poem, _>::new(client_with(http));
        let created = service
            .create(&CreatePoemRequest {
                title: "t".to_string(),
                content: "c".to_string(),
                status: None,
            })
            .await
            .unwrap();

        // 省略 status 时服务端默认存为 DRAFT
        assert_eq!(created.status, PublicationStatus::Draft);

        let requests = service.client.transport().requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].3.as_ref().unwrap()).unwrap();
        assert!(body.get("status").is_none());
        assert_eq!(body.get("title").unwrap(), &json!("t"));
    }

    #[tokio::test]
    async fn update_status_uses_patch_with_query() {
        let http = MockHttpClient::new();
        let song = json!({
            "id": 3,
            "title": "s",
            "lyrics": "l",
            "createdAt": "2024-01-16T10:00:00",
            "status": "PUBLISHED",
            "viewCount": 0,
            "likeCount": 0,
            "userId": 1
        });
        http.mock_response(
            &format!("{}/songs/3/status?status=PUBLISHED", BASE),
            200,
            envelope_ok(song),
        );

        let service = ContentService::<Song, _>::new(client_with(http));
        let updated = service
            .update_status(3, PublicationStatus::Published)
            .await
            .unwrap();
        assert_eq!(updated.status, PublicationStatus::Published);

        let requests = service.client.transport().requests.borrow();
        assert_eq!(requests[0].1, "Patch");
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let http = MockHttpClient::new();
        // 未 mock 的 URL 默认返回 404
        let service = ContentService::<Poem, _>::new(client_with(http));
        let err = service.get_by_id(404).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn increment_view_swallows_failures_but_still_fires() {
        let http = MockHttpClient::new();
        http.mock_transport_failure(&format!("{}/poems/9/view", BASE));

        let service = ContentService::<Poem, _>::new(client_with(http));
        // 失败被吞掉，不 panic、不返回错误
        service.increment_view(9).await;

        // 但请求确实发出去了
        assert_eq!(service.client.transport().request_count(), 1);
        let requests = service.client.transport().requests.borrow();
        assert_eq!(requests[0].0, format!("{}/poems/9/view", BASE));
    }

    #[tokio::test]
    async fn login_posts_credentials_and_unwraps_auth_response() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/auth/login", BASE),
            200,
            envelope_ok(json!({
                "token": "jwt-abc",
                "user": {"id": 1, "username": "nox", "email": "nox@example.com", "roles": ["USER"]}
            })),
        );

        let auth = AuthApi::new(client_with(http));
        let res = auth
            .login(&LoginRequest {
                email: "nox@example.com".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(res.token, "jwt-abc");
        assert_eq!(res.user.username, "nox");

        let requests = auth.client.transport().requests.borrow();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].3.as_ref().unwrap()).unwrap();
        assert_eq!(body.get("email").unwrap(), &json!("nox@example.com"));
    }
}
