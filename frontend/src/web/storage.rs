//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 实现核心库的 [`TokenStore`]。

use entregador::session::TokenStore;

/// 本地存储操作封装
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 键不存在或发生错误时返回 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

impl TokenStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        Self::get(key)
    }

    fn save(&self, key: &str, token: &str) -> bool {
        Self::set(key, token)
    }

    fn clear(&self, key: &str) -> bool {
        Self::delete(key)
    }
}
