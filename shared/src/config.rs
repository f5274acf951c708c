use std::time::Duration;

// =========================================================
// 配置 (Configuration)
// =========================================================

/// 默认值，构建时未提供 `SONIQUE_API_URL` 则使用
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/sonique";
/// 图片大小上限 10 MiB
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
/// 专辑创建请求的时限
pub const ALBUM_CREATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct AdminConfig {
    pub api_base_url: String,
    pub album_create_timeout: Duration,
    pub max_image_bytes: u64,
}

impl AdminConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let api_base_url = api_base_url.into().trim_end_matches('/').to_string();
        Self {
            api_base_url,
            album_create_timeout: ALBUM_CREATE_TIMEOUT,
            max_image_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// 读取构建时环境变量 `SONIQUE_API_URL`，读不到就用默认值
    pub fn from_env() -> Self {
        Self::from_override(option_env!("SONIQUE_API_URL"))
    }

    fn from_override(url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = AdminConfig::new("https://sonique-server.onrender.com/sonique/");
        assert_eq!(config.api_base_url, "https://sonique-server.onrender.com/sonique");
    }

    #[test]
    fn blank_override_uses_default() {
        assert_eq!(AdminConfig::from_override(Some("  ")), AdminConfig::default());
        assert_eq!(
            AdminConfig::from_override(Some("http://api.local")).api_base_url,
            "http://api.local"
        );
        assert_eq!(AdminConfig::default().max_image_bytes, 10 * 1024 * 1024);
    }
}
