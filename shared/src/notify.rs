#[cfg(test)]
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// 短暂展示、不阻塞操作的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// 提示接收端
pub trait Notify {
    fn notify(&self, notification: Notification);
}

// =========================================================
// 测试工具: 记录提示的队列
// =========================================================

#[cfg(test)]
#[derive(Debug, Default)]
pub struct Notifications {
    items: RefCell<Vec<Notification>>,
}

#[cfg(test)]
impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn last(&self) -> Option<Notification> {
        self.items.borrow().last().cloned()
    }
}

#[cfg(test)]
impl Notify for Notifications {
    fn notify(&self, notification: Notification) {
        self.items.borrow_mut().push(notification);
    }
}
