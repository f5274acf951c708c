use crate::config::AdminConfig;
use crate::error::{AdminError, AdminResult};
use crate::models::Resource;
use crate::protocol::{
    ApiRequest, DeleteRequest, HttpMethod, ListRequest, LoginRequest, LoginResponse,
    ServerErrorBody,
};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, MultipartForm};

/// 远端目录 API 客户端
///
/// 只做请求拼装与响应分类，不持有任何缓存。
#[derive(Clone, Debug)]
pub struct AdminApi<T> {
    config: AdminConfig,
    transport: T,
}

impl<T: HttpTransport> AdminApi<T> {
    pub fn new(config: AdminConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.config.api_base_url, path)
        } else {
            format!("{}/{}", self.config.api_base_url, path)
        }
    }

    fn request_for<R: ApiRequest>(&self, req: &R) -> HttpRequest<T::File> {
        HttpRequest::new(&self.url(&req.path()), R::METHOD)
    }

    /// 发送请求，把非 2xx 响应转换为带服务端文案的错误
    async fn execute(&self, req: HttpRequest<T::File>) -> AdminResult<HttpResponse> {
        let method = req.method;
        let url = req.url.clone();
        let res = self.transport.send(req).await.map_err(|e| {
            log_error!("{} {} failed: {}", method.as_str(), url, e);
            AdminError::from(e)
        })?;

        if !res.ok() {
            let body = res.json::<ServerErrorBody>().unwrap_or_default();
            let err = AdminError::server(res.status, body.error);
            log_error!("{} {} rejected: {}", method.as_str(), url, err);
            return Err(err);
        }

        Ok(res)
    }

    /// 管理员登录
    pub async fn login(&self, email: &str, password: &str) -> AdminResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let req = self.request_for(&body).with_json(&body)?;
        let res = self.execute(req).await?;
        Ok(res.json::<LoginResponse>()?)
    }

    /// 获取某类资源的完整列表
    pub async fn list<R: Resource>(&self) -> AdminResult<Vec<R>> {
        let req = ListRequest::<R>::new();
        let res = self.execute(self.request_for(&req)).await?;
        let listing = res.json::<R::Listing>()?;
        let items: Vec<R> = listing.into();
        log_info!("Fetched {} {} record(s)", items.len(), R::KIND);
        Ok(items)
    }

    /// 以 multipart 表单创建资源
    ///
    /// 专辑创建带有固定时限，其余请求不设超时。
    pub async fn create<R: Resource>(&self, form: MultipartForm<T::File>) -> AdminResult<()> {
        let kind = R::KIND;
        let timeout = match kind {
            crate::models::ResourceKind::Album => Some(self.config.album_create_timeout),
            _ => None,
        };
        let req = HttpRequest::new(&self.url(kind.create_path()), HttpMethod::Post)
            .with_multipart(form)
            .with_timeout(timeout);

        let res = self.execute(req).await?;
        if !kind.create_succeeded(res.status) {
            log_warn!("Create {} answered with unexpected status {}", kind, res.status);
            return Err(AdminError::server(res.status, None));
        }

        log_info!("Created {}", kind);
        Ok(())
    }

    /// 按 id 删除资源
    pub async fn delete<R: Resource>(&self, id: &str) -> AdminResult<()> {
        let req = DeleteRequest::<R>::new(id);
        self.execute(self.request_for(&req)).await?;
        log_info!("Deleted {} {}", R::KIND, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdminErrorKind;
    use crate::models::{Album, Author, Song};
    use crate::protocol::HttpMethod;
    use crate::transport::{MemoryFile, MockTransport, RequestBody, TransportError};
    use serde_json::json;
    use std::time::Duration;

    const BASE: &str = "http://api.test/sonique";

    fn api() -> AdminApi<MockTransport> {
        AdminApi::new(AdminConfig::new(BASE), MockTransport::new())
    }

    #[tokio::test]
    async fn login_posts_json_credentials() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Post,
            &format!("{}/user/login", BASE),
            200,
            json!({ "token": "tok", "user": { "email": "admin@sonique.io" } }),
        );

        let res = api.login("admin@sonique.io", "secret").await.unwrap();
        assert_eq!(res.token, "tok");
        assert_eq!(res.user["email"], "admin@sonique.io");

        let requests = api.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        match &requests[0].body {
            RequestBody::Json(body) => {
                let sent: serde_json::Value = serde_json::from_str(body).unwrap();
                assert_eq!(sent, json!({ "email": "admin@sonique.io", "password": "secret" }));
            }
            other => panic!("unexpected body: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_unwraps_each_envelope() {
        let api = api();
        let t = api.transport();
        t.mock_response(
            HttpMethod::Get,
            &format!("{}/song/get-song", BASE),
            200,
            json!({ "songs": [{ "_id": "s1", "sName": "One" }] }),
        );
        t.mock_response(
            HttpMethod::Get,
            &format!("{}/album/get-album", BASE),
            200,
            json!({ "songs": [{ "_id": "a1", "albumName": "Alb1" }] }),
        );
        t.mock_response(
            HttpMethod::Get,
            &format!("{}/author/get-authors", BASE),
            200,
            json!({ "authors": [{ "_id": "u1", "auName": "A1" }] }),
        );

        assert_eq!(api.list::<Song>().await.unwrap()[0].name, "One");
        assert_eq!(api.list::<Album>().await.unwrap()[0].name, "Alb1");
        assert_eq!(api.list::<Author>().await.unwrap()[0].name, "A1");
    }

    #[tokio::test]
    async fn server_error_carries_message() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Delete,
            &format!("{}/song/delete-song/s1", BASE),
            404,
            json!({ "error": "Song not found" }),
        );

        let err = api.delete::<Song>("s1").await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Server);
        assert_eq!(err.server_message(), Some("Song not found"));
    }

    #[tokio::test]
    async fn album_create_requires_201_and_has_timeout() {
        let api = api();
        let url = format!("{}/album/create-album", BASE);
        api.transport()
            .mock_response(HttpMethod::Post, &url, 200, json!({}));

        let form = MultipartForm::new()
            .text("albumName", "Alb1")
            .file("albumImage", MemoryFile::image(1024));
        let err = api.create::<Album>(form).await.unwrap_err();
        assert_eq!(err.status, Some(200));

        let requests = api.transport().requests.borrow();
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(10)));
    }

    #[tokio::test]
    async fn song_create_has_no_timeout() {
        let api = api();
        let url = format!("{}/song/create-song", BASE);
        api.transport()
            .mock_response(HttpMethod::Post, &url, 200, json!({ "message": "ok" }));

        api.create::<Song>(MultipartForm::new().text("sName", "x"))
            .await
            .unwrap();
        assert_eq!(api.transport().requests.borrow()[0].timeout, None);
    }

    #[tokio::test]
    async fn transport_timeout_becomes_timeout_error() {
        let api = api();
        let url = format!("{}/album/create-album", BASE);
        api.transport()
            .mock_failure(HttpMethod::Post, &url, TransportError::Timeout);

        let err = api.create::<Album>(MultipartForm::new()).await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Timeout);
    }

    #[tokio::test]
    async fn malformed_listing_is_parse_error() {
        let api = api();
        api.transport().mock_response(
            HttpMethod::Get,
            &format!("{}/author/get-authors", BASE),
            200,
            json!({ "authors": "nope" }),
        );

        let err = api.list::<Author>().await.unwrap_err();
        assert_eq!(err.kind, AdminErrorKind::Parse);
    }
}
