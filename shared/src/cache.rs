//! 资源列表缓存
//!
//! 每个列表视图挂载时创建一个 `CachedCollection`，生命周期与视图相同。
//! 状态机：`Uninitialized -> Loading -> Populated`，删除成功后在
//! `Populated` 内原地移除对应记录。没有 TTL，也没有后台刷新。
//!
//! 同时提供两种调用方式：
//! - `begin` / `complete`: 分两段执行，供持有信号的 UI 在异步任务前后调用
//! - `request`: 一次性的异步封装

use std::collections::HashSet;
use std::future::Future;

use crate::api::AdminApi;
use crate::error::{AdminError, AdminErrorKind, AdminResult};
use crate::models::{Resource, ResourceKind};
use crate::notify::{Notification, Notify};
use crate::transport::HttpTransport;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, PartialEq)]
pub enum CacheState<R> {
    Uninitialized,
    Loading,
    Populated(Vec<R>),
}

/// `begin` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheRead<R> {
    /// 已有数据，直接使用
    Ready(Vec<R>),
    /// 调用方需要发起一次网络读取，随后调用 `complete`
    Fetch,
    /// 已有读取在进行中
    Pending,
}

#[derive(Debug, Clone)]
pub struct CachedCollection<R> {
    state: CacheState<R>,
}

impl<R: Resource> CachedCollection<R> {
    pub fn new() -> Self {
        Self {
            state: CacheState::Uninitialized,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        R::KIND
    }

    pub fn state(&self) -> &CacheState<R> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CacheState::Loading)
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.state, CacheState::Populated(_))
    }

    /// 当前缓存的记录，未填充时为空
    pub fn items(&self) -> &[R] {
        match &self.state {
            CacheState::Populated(items) => items,
            _ => &[],
        }
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items().iter().find(|r| r.id() == id)
    }

    pub fn begin(&mut self) -> CacheRead<R> {
        match &self.state {
            CacheState::Populated(items) => CacheRead::Ready(items.clone()),
            CacheState::Loading => CacheRead::Pending,
            CacheState::Uninitialized => {
                self.state = CacheState::Loading;
                CacheRead::Fetch
            }
        }
    }

    /// 写入读取结果
    ///
    /// 失败时同样进入 `Populated`（空列表），避免反复重试；错误返回给调用方展示。
    /// 缓存已被 `reset` 时丢弃迟到的响应。
    pub fn complete(&mut self, result: AdminResult<Vec<R>>) -> Option<AdminError> {
        if matches!(self.state, CacheState::Uninitialized) {
            log_warn!("Dropping stale {} listing", R::KIND);
            return None;
        }
        match result {
            Ok(items) => {
                self.state = CacheState::Populated(dedup_by_id(items));
                None
            }
            Err(e) => {
                log_error!("Loading {} list failed: {}", R::KIND, e);
                self.state = CacheState::Populated(Vec::new());
                Some(e)
            }
        }
    }

    /// 获取列表；已填充时不会发起网络请求
    pub async fn request<F, Fut>(&mut self, fetch: F) -> AdminResult<&[R]>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AdminResult<Vec<R>>>,
    {
        if let CacheRead::Fetch = self.begin() {
            if let Some(err) = self.complete(fetch().await) {
                return Err(err);
            }
        }
        Ok(self.items())
    }

    /// 移除一条记录，返回是否命中
    ///
    /// 只应在远端确认删除成功后调用。
    pub fn invalidate_one(&mut self, id: &str) -> bool {
        match &mut self.state {
            CacheState::Populated(items) => {
                let before = items.len();
                items.retain(|r| r.id() != id);
                items.len() != before
            }
            _ => false,
        }
    }

    /// 回到初始状态，例如登出时
    pub fn reset(&mut self) {
        self.state = CacheState::Uninitialized;
    }

    /// 远端删除后的收尾：成功时移除记录，并生成对应提示
    pub fn apply_delete(&mut self, id: &str, name: &str, result: &AdminResult<()>) -> Notification {
        match result {
            Ok(()) => {
                self.invalidate_one(id);
                Notification::success(format!("{} deleted successfully!", name))
            }
            // 请求没有到达服务端
            Err(e) if matches!(e.kind, AdminErrorKind::Network | AdminErrorKind::Timeout) => {
                Notification::error(format!("An error occurred while deleting the {}.", R::KIND))
            }
            Err(_) => Notification::error(format!("Failed to delete {}.", R::KIND)),
        }
    }

    /// 删除远端记录并同步缓存
    pub async fn delete<T: HttpTransport>(
        &mut self,
        api: &AdminApi<T>,
        id: &str,
        notify: &impl Notify,
    ) -> AdminResult<()> {
        let name = self
            .find(id)
            .map(|r| r.display_name().to_string())
            .unwrap_or_else(|| id.to_string());
        let result = api.delete::<R>(id).await;
        notify.notify(self.apply_delete(id, &name, &result));
        result
    }
}

impl<R: Resource> Default for CachedCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// 保留每个 id 的首次出现，维持原有顺序
fn dedup_by_id<R: Resource>(items: Vec<R>) -> Vec<R> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|r| seen.insert(r.id().to_string()))
        .collect()
}

/// 编辑尚未接入远端接口，只给出占位提示
pub fn edit_placeholder(name: &str) -> Notification {
    Notification::info(format!("Edit {}", name))
}
