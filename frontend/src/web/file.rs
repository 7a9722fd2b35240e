//! 文件读取封装：把 `<input type="file">` 选中的文件读成字节

use entregador::ApiError;
use entregador::request::FormFile;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlInputElement;

/// 读取输入框中的第一个文件；未选择文件时返回 `None`
pub async fn read_selected(
    input: &HtmlInputElement,
    field: &str,
) -> Result<Option<FormFile>, ApiError> {
    let Some(file) = input.files().and_then(|files| files.get(0)) else {
        return Ok(None);
    };

    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ApiError::validation("Não foi possível ler o arquivo.").with_detail(format!("{:?}", e)))?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    Ok(Some(FormFile {
        field: field.to_string(),
        file_name: file.name(),
        content_type: file.type_(),
        bytes,
    }))
}
