//! HTTP 请求封装模块
//!
//! 基于 `web_sys::fetch` 实现核心库的 [`HttpClient`]：
//! JSON 请求体直接作为字符串发送，头像上传构造 `FormData`。

use entregador::error::{ApiError, Result};
use entregador::request::{FormFile, HttpClient, HttpRequest, HttpResponse, RequestBody};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Headers, Request, RequestInit, Response};

/// 浏览器 fetch 客户端
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn js_detail(context: &str, err: JsValue) -> String {
    format!("{}: {:?}", context, err)
}

fn multipart(file: &FormFile) -> std::result::Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let props = BlobPropertyBag::new();
    props.set_type(&file.content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &props)?;

    let form = FormData::new()?;
    form.append_with_blob_and_filename(&file.field, &blob, &file.file_name)?;
    Ok(form)
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse> {
        let headers =
            Headers::new().map_err(|e| ApiError::network(js_detail("创建 Headers 失败", e)))?;
        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ApiError::network(js_detail("设置 Header 失败", e)))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        match &req.body {
            Some(RequestBody::Json(body)) => opts.set_body(&JsValue::from_str(body)),
            Some(RequestBody::Multipart(file)) => {
                let form =
                    multipart(file).map_err(|e| ApiError::network(js_detail("构建表单失败", e)))?;
                opts.set_body(&form.into());
            }
            None => {}
        }

        let request = Request::new_with_str_and_init(&req.full_url(), &opts)
            .map_err(|e| ApiError::network(js_detail("请求构建失败", e)))?;

        let window = web_sys::window().ok_or_else(|| ApiError::network("无法获取 window 对象"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::network(js_detail("网络错误", e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::parse(js_detail("Response 类型转换失败", e)))?;

        let promise = response
            .text()
            .map_err(|e| ApiError::parse(js_detail("读取响应体失败", e)))?;
        let body = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::network(js_detail("读取响应体失败", e)))?
            .as_string()
            .unwrap_or_default();

        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}
