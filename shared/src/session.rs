//! 会话模块
//!
//! 凭据令牌是唯一跨视图共享的可变状态。这里把它包装成显式的
//! `Session` 上下文对象，守卫与导航外壳只通过它读写令牌，
//! 不直接访问底层存储。

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::AdminApi;
use crate::error::{AdminError, AdminErrorKind, AdminResult};
use crate::transport::HttpTransport;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// 客户端持久化存储
///
/// 浏览器端对应 LocalStorage。
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
}

/// 内存存储，克隆共享同一份数据
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

/// 会话上下文
///
/// 只判断令牌是否存在，不校验真伪或过期。
#[derive(Clone)]
pub struct Session<S> {
    store: S,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 非空令牌
    pub fn token(&self) -> Option<String> {
        self.store
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// 登录时保存的用户资料
    pub fn user(&self) -> Option<serde_json::Value> {
        let raw = self.store.get(USER_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn sign_in(&self, token: &str, user: &serde_json::Value) -> bool {
        let saved_token = self.store.set(TOKEN_KEY, token);
        let saved_user = self.store.set(USER_KEY, &user.to_string());
        saved_token && saved_user
    }

    pub fn sign_out(&self) {
        self.store.delete(TOKEN_KEY);
        self.store.delete(USER_KEY);
        log_info!("Session cleared");
    }
}

pub const LOGIN_FIELDS_REQUIRED: &str = "Please fill in both fields.";
pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const LOGIN_FALLBACK: &str = "Something went wrong. Please try again later.";

/// 登录失败时的提示：校验文案或服务端原文，其余一律兜底
pub fn login_error_message(err: &AdminError) -> String {
    match (err.kind, err.server_message()) {
        (_, Some(msg)) => msg.to_string(),
        (AdminErrorKind::Validation, None) => err.message.clone(),
        _ => LOGIN_FALLBACK.to_string(),
    }
}

/// 登录并保存会话
///
/// 邮箱与密码均不能为空；成功后令牌与用户资料写入存储。
pub async fn login<T, S>(
    api: &AdminApi<T>,
    session: &Session<S>,
    email: &str,
    password: &str,
) -> AdminResult<()>
where
    T: HttpTransport,
    S: SessionStore,
{
    if email.is_empty() || password.is_empty() {
        return Err(AdminError::validation(LOGIN_FIELDS_REQUIRED));
    }

    let res = api.login(email, password).await?;
    if res.token.is_empty() {
        return Err(AdminError::parse("login response carried an empty token"));
    }
    if !session.sign_in(&res.token, &res.user) {
        // 写入一半的会话同样清掉，守卫只认完整登录
        session.sign_out();
        log_error!("Failed to persist session for {}", email);
        return Err(AdminError::storage("session token could not be saved"));
    }
    log_info!("Logged in as {}", email);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdminConfig;
    use crate::error::AdminErrorKind;
    use crate::protocol::HttpMethod;
    use crate::transport::MockTransport;
    use serde_json::json;

    const LOGIN_URL: &str = "http://api.test/user/login";

    fn api() -> AdminApi<MockTransport> {
        AdminApi::new(AdminConfig::new("http://api.test"), MockTransport::new())
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        assert!(!session.is_authenticated());

        store.set(TOKEN_KEY, "");
        assert!(!session.is_authenticated());

        store.set(TOKEN_KEY, "abc");
        assert!(session.is_authenticated());

        // 令牌不透明，只要非空即可
        store.set(TOKEN_KEY, " ");
        assert_eq!(session.token().as_deref(), Some(" "));
    }

    #[test]
    fn sign_out_clears_token_and_user() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());
        session.sign_in("abc", &json!({ "name": "root" }));
        assert_eq!(session.user(), Some(json!({ "name": "root" })));

        session.sign_out();
        assert_eq!(store.get(TOKEN_KEY), None);
        assert_eq!(store.get(USER_KEY), None);
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn login_stores_token_and_user() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({ "token": "t-1", "user": { "role": "admin" } }),
        );
        let session = Session::new(MemoryStore::new());

        login(&api, &session, "admin@sonique.io", "pw").await.unwrap();
        assert_eq!(session.token().as_deref(), Some("t-1"));
        assert_eq!(session.user(), Some(json!({ "role": "admin" })));
    }

    /// 写入总是失败的存储，例如配额已满或隐私模式
    #[derive(Clone, Default)]
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl SessionStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> bool {
            false
        }

        fn delete(&self, key: &str) -> bool {
            self.inner.delete(key)
        }
    }

    #[tokio::test]
    async fn login_fails_when_token_cannot_be_stored() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({ "token": "t-1", "user": { "role": "admin" } }),
        );
        let session = Session::new(ReadOnlyStore::default());

        let err = login(&api, &session, "admin@sonique.io", "pw").await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Storage);
        assert_eq!(login_error_message(&err), LOGIN_FALLBACK);
        assert!(!session.is_authenticated());
    }

    /// 只有令牌写入成功、用户资料写入失败时，不留下半个会话
    #[derive(Clone, Default)]
    struct TokenOnlyStore {
        inner: MemoryStore,
    }

    impl SessionStore for TokenOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> bool {
            key == TOKEN_KEY && self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> bool {
            self.inner.delete(key)
        }
    }

    #[tokio::test]
    async fn partial_session_write_is_rolled_back() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            200,
            json!({ "token": "t-1", "user": { "role": "admin" } }),
        );
        let store = TokenOnlyStore::default();
        let session = Session::new(store.clone());

        assert!(login(&api, &session, "admin@sonique.io", "pw").await.is_err());
        assert_eq!(store.get(TOKEN_KEY), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn login_requires_both_fields_without_network() {
        let api = api();
        let session = Session::new(MemoryStore::new());

        let err = login(&api, &session, "admin@sonique.io", "").await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Validation);
        assert_eq!(err.user_message(LOGIN_FALLBACK), LOGIN_FIELDS_REQUIRED);
        assert_eq!(api.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn rejected_login_leaves_session_empty() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Post,
            LOGIN_URL,
            401,
            json!({ "error": "Invalid credentials" }),
        );
        let session = Session::new(MemoryStore::new());

        let err = login(&api, &session, "admin@sonique.io", "bad").await.unwrap_err();
        assert_eq!(err.user_message(LOGIN_FALLBACK), "Invalid credentials");
        assert!(!session.is_authenticated());
    }
}
