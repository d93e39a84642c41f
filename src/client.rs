//! HTTP 客户端封装
//!
//! 所有出站请求在这里统一注入 Bearer 凭据，所有入站响应在这里统一
//! 解开标准信封。401 的处理是全局的：清会话、触发一次性事件（提示 +
//! 跳转登录由前端注入的 `SessionEvents` 完成），与具体哪个调用触发无关。

use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use after_midnight_shared::{ApiEnvelope, BEARER_PREFIX, HEADER_AUTHORIZATION};

use crate::error::{ApiError, ApiResult};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::log_warn;
use crate::session::SessionHandle;

/// 会话级事件回调
///
/// 由宿主环境注入：浏览器端的实现弹出一次性提示并让路由守卫跳转登录。
/// `ApiClient` 保证无论多少个并发请求同时撞上 401，该回调只触发一次。
pub trait SessionEvents {
    fn session_expired(&self);
}

/// 忽略所有事件的空实现
pub struct NoSessionEvents;

impl SessionEvents for NoSessionEvents {
    fn session_expired(&self) {}
}

pub struct ApiClient<C: HttpClient> {
    base_url: String,
    http: C,
    session: SessionHandle,
    events: Rc<dyn SessionEvents>,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(
        base_url: &str,
        http: C,
        session: SessionHandle,
        events: Rc<dyn SessionEvents>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
            events,
        }
    }

    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &C {
        &self.http
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn url_with_query(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = self.url(path);
        for (i, (key, value)) in query.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    // =========================================================
    // 请求发送与信封解包
    // =========================================================

    /// 发送请求并处理全局状态码语义。
    ///
    /// 每次调用都重新读取会话（不缓存 token），凭据存在时附加
    /// `Authorization: Bearer <token>`。
    async fn dispatch(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let mut req = HttpRequest::new(&url, method);
        if let Some(token) = self.session.token() {
            req = req.with_header(
                HEADER_AUTHORIZATION,
                &format!("{}{}", BEARER_PREFIX, token),
            );
        }
        if let Some(body) = body {
            req = req
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        let res = self.http.send(req).await?;

        if res.status == 401 {
            // expire() 幂等：并发的 401 里只有第一个会触发全局副作用
            if self.session.expire() {
                log_warn!("[Api] authentication expired, session cleared");
                self.events.session_expired();
            }
            return Err(ApiError::AuthExpired);
        }

        Ok(res)
    }

    /// 非 2xx 响应映射为错误，优先取信封里的 message/errorCode，
    /// 信封解析不出来时退回传输层描述。
    fn status_error(res: &HttpResponse) -> ApiError {
        let parsed: Option<ApiEnvelope<serde_json::Value>> = serde_json::from_str(&res.body).ok();
        let (mut message, error_code) = match parsed {
            Some(env) => (env.message, env.error_code),
            None => (String::new(), None),
        };
        if message.is_empty() {
            message = format!("Request failed with status {}", res.status);
        }

        match res.status {
            404 => ApiError::NotFound(message),
            400..=499 => ApiError::Validation {
                error_code,
                message,
            },
            _ => ApiError::Server {
                error_code,
                message,
            },
        }
    }

    fn unwrap<T: DeserializeOwned>(res: HttpResponse) -> ApiResult<T> {
        if !(200..300).contains(&res.status) {
            return Err(Self::status_error(&res));
        }

        let envelope: ApiEnvelope<T> = res.json()?;
        if envelope.success {
            envelope
                .data
                .ok_or_else(|| ApiError::Decode("envelope is missing data".to_string()))
        } else {
            Err(ApiError::Server {
                error_code: envelope.error_code,
                message: envelope.message,
            })
        }
    }

    /// DELETE / 浏览计数等接口的 data 恒为 null，只看 success
    fn unwrap_empty(res: HttpResponse) -> ApiResult<()> {
        if !(200..300).contains(&res.status) {
            return Err(Self::status_error(&res));
        }

        let envelope: ApiEnvelope<serde_json::Value> = res.json()?;
        if envelope.success {
            Ok(())
        } else {
            Err(ApiError::Server {
                error_code: envelope.error_code,
                message: envelope.message,
            })
        }
    }

    // =========================================================
    // 类型化入口
    // =========================================================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = self.dispatch(HttpMethod::Get, self.url(path), None).await?;
        Self::unwrap(res)
    }

    pub async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let res = self
            .dispatch(HttpMethod::Get, self.url_with_query(path, query), None)
            .await?;
        Self::unwrap(res)
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        let res = self
            .dispatch(HttpMethod::Post, self.url(path), Some(body))
            .await?;
        Self::unwrap(res)
    }

    pub async fn patch_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let res = self
            .dispatch(HttpMethod::Patch, self.url_with_query(path, query), None)
            .await?;
        Self::unwrap(res)
    }

    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let res = self
            .dispatch(HttpMethod::Delete, self.url(path), None)
            .await?;
        Self::unwrap_empty(res)
    }

    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        let res = self
            .dispatch(HttpMethod::Post, self.url(path), None)
            .await?;
        Self::unwrap_empty(res)
    }
}

// =========================================================
// 单元测试
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::MockHttpClient;
    use crate::session::SessionContext;
    use crate::session::test_store::MemorySessionStore;
    use after_midnight_shared::User;
    use serde_json::json;
    use std::cell::Cell;

    const BASE: &str = "http://localhost:8080/api/v1";

    struct CountingEvents {
        expired: Cell<usize>,
    }

    impl CountingEvents {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                expired: Cell::new(0),
            })
        }
    }

    impl SessionEvents for CountingEvents {
        fn session_expired(&self) {
            self.expired.set(self.expired.get() + 1);
        }
    }

    fn test_user() -> User {
        User {
            id: 1,
            username: "nox".to_string(),
            email: "nox@example.com".to_string(),
            roles: vec![],
        }
    }

    fn authed_session() -> SessionHandle {
        let session = Rc::new(SessionContext::new(Box::new(MemorySessionStore::new())));
        session.login(test_user(), "tok-123".to_string());
        session
    }

    fn anon_session() -> SessionHandle {
        Rc::new(SessionContext::new(Box::new(MemorySessionStore::new())))
    }

    fn envelope_ok(data: serde_json::Value) -> serde_json::Value {
        json!({
            "success": true,
            "message": "ok",
            "data": data,
            "timestamp": "2024-01-16T10:00:00"
        })
    }

    #[tokio::test]
    async fn attaches_bearer_token_when_authenticated() {
        let http = MockHttpClient::new();
        http.mock_response(&format!("{}/ping", BASE), 200, envelope_ok(json!(1)));

        let client = ApiClient::new(BASE, http, authed_session(), Rc::new(NoSessionEvents));
        let _: i32 = client.get("/ping").await.unwrap();

        let requests = client.http.requests.borrow();
        assert_eq!(
            requests[0].2.get("Authorization").map(String::as_str),
            Some("Bearer tok-123")
        );
    }

    #[tokio::test]
    async fn omits_auth_header_without_session() {
        let http = MockHttpClient::new();
        http.mock_response(&format!("{}/ping", BASE), 200, envelope_ok(json!(1)));

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let _: i32 = client.get("/ping").await.unwrap();

        let requests = client.http.requests.borrow();
        assert!(!requests[0].2.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn unwraps_envelope_data() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/value", BASE),
            200,
            envelope_ok(json!({"n": 7})),
        );

        #[derive(serde::Deserialize)]
        struct Payload {
            n: i32,
        }

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let payload: Payload = client.get("/value").await.unwrap();
        assert_eq!(payload.n, 7);
    }

    #[tokio::test]
    async fn envelope_failure_becomes_server_error() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/value", BASE),
            200,
            json!({
                "success": false,
                "message": "Something broke",
                "data": null,
                "timestamp": "2024-01-16T10:00:00",
                "errorCode": "INTERNAL_SERVER_ERROR"
            }),
        );

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let err = client.get::<i32>("/value").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                error_code: Some("INTERNAL_SERVER_ERROR".to_string()),
                message: "Something broke".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn validation_message_is_surfaced_verbatim() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/poems", BASE),
            400,
            json!({
                "success": false,
                "message": "Title is required",
                "data": null,
                "timestamp": "2024-01-16T10:00:00",
                "errorCode": "VALIDATION_ERROR"
            }),
        );

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let err = client
            .post::<i32, _>("/poems", &json!({"title": ""}))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Title is required");
        assert_eq!(err.error_code(), Some("VALIDATION_ERROR"));
    }

    #[tokio::test]
    async fn missing_resource_maps_to_not_found() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/poems/99", BASE),
            404,
            json!({
                "success": false,
                "message": "Poem not found",
                "data": null,
                "timestamp": "2024-01-16T10:00:00",
                "errorCode": "RESOURCE_NOT_FOUND"
            }),
        );

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let err = client.get::<i32>("/poems/99").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message(), "Poem not found");
    }

    #[tokio::test]
    async fn transport_failure_propagates_as_network_error() {
        let http = MockHttpClient::new();
        http.mock_transport_failure(&format!("{}/ping", BASE));

        let client = ApiClient::new(BASE, http, anon_session(), Rc::new(NoSessionEvents));
        let err = client.get::<i32>("/ping").await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn concurrent_401s_recover_session_exactly_once() {
        let http = MockHttpClient::new();
        let expired = json!({
            "success": false,
            "message": "Token expired",
            "data": null,
            "timestamp": "2024-01-16T10:00:00",
            "errorCode": "UNAUTHORIZED"
        });
        http.mock_response(&format!("{}/poems", BASE), 401, expired.clone());
        http.mock_response(&format!("{}/songs", BASE), 401, expired);

        let session = authed_session();
        let events = CountingEvents::new();
        let client = ApiClient::new(BASE, http, session.clone(), events.clone());

        let (a, b) = futures::join!(client.get::<i32>("/poems"), client.get::<i32>("/songs"));

        assert_eq!(a.unwrap_err(), ApiError::AuthExpired);
        assert_eq!(b.unwrap_err(), ApiError::AuthExpired);
        assert!(!session.is_authenticated());
        // 两个请求都收到 401，但全局副作用只触发一次
        assert_eq!(events.expired.get(), 1);
    }

    #[tokio::test]
    async fn delete_accepts_null_data() {
        let http = MockHttpClient::new();
        http.mock_response(
            &format!("{}/poems/7", BASE),
            200,
            json!({
                "success": true,
                "message": "Poem deleted successfully",
                "data": null,
                "timestamp": "2024-01-16T10:00:00"
            }),
        );

        let client = ApiClient::new(BASE, http, authed_session(), Rc::new(NoSessionEvents));
        client.delete("/poems/7").await.unwrap();
    }
}
