//! HTTP 传输适配 (浏览器 fetch)
//!
//! 为客户端核心的 `HttpClient` trait 提供 `web_sys::fetch` 实现。
//! 这里只做传输：任何拿到状态码的响应都原样交回上层，
//! 只有传输层失败才映射为 `ApiError::Network`。

use async_trait::async_trait;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

use after_midnight_client::{ApiError, ApiResult, HttpClient, HttpRequest, HttpResponse};

pub struct BrowserHttpClient;

fn network_err(stage: &str, e: JsValue) -> ApiError {
    ApiError::Network(format!("{}: {:?}", stage, e))
}

#[async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let headers = Headers::new().map_err(|e| network_err("create headers", e))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| network_err("set header", e))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let request = Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| network_err("build request", e))?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Network("window object unavailable".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| network_err("fetch", e))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| network_err("response cast", e))?;

        let status = response.status();
        let text_promise = response.text().map_err(|e| network_err("read body", e))?;
        let text = JsFuture::from(text_promise)
            .await
            .map_err(|e| network_err("read body", e))?;

        Ok(HttpResponse {
            status,
            body: text.as_string().unwrap_or_default(),
        })
    }
}
