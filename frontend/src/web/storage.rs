//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现共享层的 `SessionStore`。

use sonique_admin_shared::SessionStore;

/// 浏览器 LocalStorage
///
/// 不持有任何状态，每次读写都重新获取 `window.localStorage`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SessionStore for BrowserStorage {
    /// 键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    fn delete(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}
