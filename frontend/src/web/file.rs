//! 文件选择封装
//!
//! 把 `<input type="file">` 选中的 `web_sys::File` 包装成共享层的 `SelectedFile`。

use sonique_admin_shared::SelectedFile;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlInputElement, Url};

#[derive(Debug, Clone)]
pub struct BrowserFile(web_sys::File);

impl BrowserFile {
    /// 从 change 事件中取出第一个被选中的文件
    pub fn from_event(ev: &Event) -> Option<Self> {
        let input: HtmlInputElement = ev.target()?.dyn_into().ok()?;
        input.files()?.get(0).map(Self)
    }

    pub fn inner(&self) -> &web_sys::File {
        &self.0
    }
}

impl SelectedFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn size(&self) -> u64 {
        self.0.size() as u64
    }

    fn mime_type(&self) -> Option<String> {
        Some(self.0.type_()).filter(|t| !t.is_empty())
    }

    fn preview_url(&self) -> Option<String> {
        Url::create_object_url_with_blob(&self.0).ok()
    }

    fn release_preview(&self, url: &str) {
        let _ = Url::revoke_object_url(url);
    }
}

/// 清空文件输入框，使同一文件可以再次触发 change
pub fn clear_input(ev: &Event) {
    if let Some(input) = ev
        .target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value("");
    }
}
