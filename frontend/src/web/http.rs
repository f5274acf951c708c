//! HTTP 传输实现
//!
//! 使用 `web_sys::fetch` 实现共享层的 `HttpTransport`：
//! - JSON 请求体按字符串发送
//! - multipart 请求体转换为 `FormData`，由浏览器生成 boundary
//! - 设有时限的请求与定时器竞争，超时后中止 fetch

use std::pin::pin;

use futures::future::{Either, select};
use gloo_timers::future::TimeoutFuture;
use sonique_admin_shared::transport::{
    HttpRequest, HttpResponse, HttpTransport, MultipartForm, Part, RequestBody, TransportError,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, FormData, Headers, Request, RequestInit, Response};

use super::file::BrowserFile;

fn build_error(context: &str, e: JsValue) -> TransportError {
    TransportError::RequestBuildFailed(format!("{}: {:?}", context, e))
}

/// multipart 表单转换为 `FormData`，保持字段顺序
fn form_data(form: &MultipartForm<BrowserFile>) -> Result<FormData, TransportError> {
    let data = FormData::new().map_err(|e| build_error("创建 FormData 失败", e))?;
    for part in form.parts() {
        let appended = match part {
            Part::Text { name, value } => data.append_with_str(name, value),
            Part::File { name, file } => {
                data.append_with_blob_and_filename(name, file.inner(), &file.inner().name())
            }
        };
        appended.map_err(|e| build_error("写入表单字段失败", e))?;
    }
    Ok(data)
}

fn build_request(
    req: &HttpRequest<BrowserFile>,
    abort: Option<&AbortController>,
) -> Result<Request, TransportError> {
    let headers = Headers::new().map_err(|e| build_error("创建 Headers 失败", e))?;
    for (key, value) in &req.headers {
        headers
            .set(key, value)
            .map_err(|e| build_error("设置 Header 失败", e))?;
    }

    let opts = RequestInit::new();
    opts.set_method(req.method.as_str());
    opts.set_headers(&headers.into());

    match &req.body {
        RequestBody::Empty => {}
        RequestBody::Json(body) => opts.set_body(&JsValue::from_str(body)),
        RequestBody::Multipart(form) => opts.set_body(&form_data(form)?.into()),
    }

    if let Some(controller) = abort {
        opts.set_signal(Some(&controller.signal()));
    }

    Request::new_with_str_and_init(&req.url, &opts).map_err(|e| build_error("创建 Request 失败", e))
}

/// 发出请求并读取完整响应体
async fn exchange(request: Request) -> Result<HttpResponse, TransportError> {
    let window = web_sys::window()
        .ok_or_else(|| TransportError::Network("无法获取 window 对象".to_string()))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TransportError::Network(format!("{:?}", e)))?;

    let response: Response = resp_value
        .dyn_into()
        .map_err(|e| TransportError::Network(format!("Response 类型转换失败: {:?}", e)))?;

    let status = response.status();
    let promise = response
        .text()
        .map_err(|e| TransportError::Network(format!("读取响应体失败: {:?}", e)))?;
    let text = JsFuture::from(promise)
        .await
        .map_err(|e| TransportError::Network(format!("读取响应体失败: {:?}", e)))?;

    Ok(HttpResponse {
        status,
        body: text.as_string().unwrap_or_default(),
    })
}

/// 浏览器 fetch 传输
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait::async_trait(?Send)]
impl HttpTransport for FetchTransport {
    type File = BrowserFile;

    async fn send(&self, req: HttpRequest<BrowserFile>) -> Result<HttpResponse, TransportError> {
        let Some(limit) = req.timeout else {
            return exchange(build_request(&req, None)?).await;
        };

        let controller =
            AbortController::new().map_err(|e| build_error("创建 AbortController 失败", e))?;
        let request = build_request(&req, Some(&controller))?;

        let millis = u32::try_from(limit.as_millis()).unwrap_or(u32::MAX);
        let response = pin!(exchange(request));
        let timer = pin!(TimeoutFuture::new(millis));

        match select(response, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => {
                controller.abort();
                Err(TransportError::Timeout)
            }
        }
    }
}
