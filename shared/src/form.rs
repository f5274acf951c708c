//! 表单提交控制器
//!
//! 每种资源一个表单结构体，负责：
//! - 字段与已选文件的持有
//! - 同步校验并组装 multipart 请求体
//! - 成功后重置
//!
//! `FormController` 在其上叠加显式的提交状态机，保证同一表单
//! 同时最多只有一个创建请求在途。

use std::fmt;

use crate::api::AdminApi;
use crate::error::{AdminError, AdminResult, GENERIC_MESSAGE};
use crate::models::{Resource, ResourceKind};
use crate::notify::{Notification, Notify};
use crate::session::{self, LOGIN_FIELDS_REQUIRED, LOGIN_SUCCESS, Session, SessionStore};
use crate::transport::{HttpTransport, MultipartForm, SelectedFile};

mod entities;

pub use entities::{
    AlbumForm, AuthorForm, LANGUAGES, NONE_OPTION, SongForm, SongFormOptions,
    load_song_form_options,
};

// =========================================================
// 提交状态
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed { message: String },
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// 提交按钮是否可用
    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }
}

// =========================================================
// 校验错误
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    SongFileRequired,
    ImageFileRequired,
    NameRequired(ResourceKind),
    DescriptionRequired,
    AuthorRequired,
    LanguageRequired,
    AlbumRequired,
    ImageTooLarge,
    UnsupportedFileType { expected: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::SongFileRequired => write!(f, "Song file is required."),
            ValidationError::ImageFileRequired => write!(f, "Image file is required."),
            ValidationError::NameRequired(ResourceKind::Song) => write!(f, "Song name is required"),
            ValidationError::NameRequired(ResourceKind::Album) => {
                write!(f, "Album name is required")
            }
            ValidationError::NameRequired(ResourceKind::Author) => {
                write!(f, "Author name is required")
            }
            ValidationError::DescriptionRequired => write!(f, "Song description is required"),
            ValidationError::AuthorRequired => write!(f, "Please select an author."),
            ValidationError::LanguageRequired => write!(f, "Please select a language."),
            ValidationError::AlbumRequired => write!(f, "Please select an album."),
            ValidationError::ImageTooLarge => write!(f, "Image size should not exceed 10MB."),
            ValidationError::UnsupportedFileType { expected } => {
                write!(f, "Please choose a {} file.", expected)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AdminError {
    fn from(e: ValidationError) -> Self {
        AdminError::validation(e.to_string())
    }
}

/// MIME 未知时放行，交给服务端判断
fn check_mime<F: SelectedFile>(file: &F, prefix: &str, expected: &'static str) -> Result<(), ValidationError> {
    match file.mime_type() {
        Some(mime) if !mime.starts_with(prefix) => {
            Err(ValidationError::UnsupportedFileType { expected })
        }
        _ => Ok(()),
    }
}

// =========================================================
// 图片槽位（文件 + 预览）
// =========================================================

#[derive(Debug, Clone)]
pub struct ImageSlot<F> {
    file: Option<F>,
    preview: Option<String>,
}

impl<F: SelectedFile> ImageSlot<F> {
    pub fn new() -> Self {
        Self {
            file: None,
            preview: None,
        }
    }

    /// 选择图片；被拒绝时保留之前的选择
    pub fn select(&mut self, file: F, max_bytes: u64) -> Result<(), ValidationError> {
        check_mime(&file, "image/", "image")?;
        if file.size() > max_bytes {
            return Err(ValidationError::ImageTooLarge);
        }
        self.release();
        self.preview = file.preview_url();
        self.file = Some(file);
        Ok(())
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn clear(&mut self) {
        self.release();
        self.file = None;
    }

    fn release(&mut self) {
        if let (Some(file), Some(url)) = (self.file.as_ref(), self.preview.take()) {
            file.release_preview(&url);
        }
    }

    fn validated(&self, max_bytes: u64) -> Result<&F, ValidationError> {
        let file = self.file.as_ref().ok_or(ValidationError::ImageFileRequired)?;
        if file.size() > max_bytes {
            return Err(ValidationError::ImageTooLarge);
        }
        Ok(file)
    }
}

impl<F: SelectedFile> Default for ImageSlot<F> {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// 表单抽象与控制器
// =========================================================

pub trait EntityForm {
    type Resource: Resource;
    type File: SelectedFile;

    const SUCCESS_MESSAGE: &'static str;

    /// 按固定顺序校验，遇到第一个失败即返回
    fn build(&self, max_image_bytes: u64) -> Result<MultipartForm<Self::File>, ValidationError>;

    /// 所有字段与预览回到初始值
    fn reset(&mut self);
}

#[derive(Debug, Clone)]
pub struct FormController<F> {
    form: F,
    state: SubmissionState,
}

impl<F: EntityForm> FormController<F> {
    pub fn new(form: F) -> Self {
        Self {
            form,
            state: SubmissionState::Idle,
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// 提交前半段：校验并进入 `Submitting`
    ///
    /// 返回 `None` 表示不应发出请求（正在提交或校验失败）。
    pub fn prepare(
        &mut self,
        max_image_bytes: u64,
        notify: &impl Notify,
    ) -> Option<MultipartForm<F::File>> {
        if self.state.is_submitting() {
            log_warn!(
                "Ignoring duplicate {} submission",
                <F::Resource as Resource>::KIND
            );
            return None;
        }

        self.state = SubmissionState::Validating;
        match self.form.build(max_image_bytes) {
            Ok(payload) => {
                self.state = SubmissionState::Submitting;
                Some(payload)
            }
            Err(e) => {
                let message = e.to_string();
                notify.notify(Notification::error(message.clone()));
                self.state = SubmissionState::Failed { message };
                None
            }
        }
    }

    /// 提交后半段：成功则重置表单，失败保留用户输入
    pub fn finish(&mut self, result: AdminResult<()>, notify: &impl Notify) {
        match result {
            Ok(()) => {
                self.form.reset();
                self.state = SubmissionState::Succeeded;
                notify.notify(Notification::success(F::SUCCESS_MESSAGE));
            }
            Err(e) => {
                let message = e.user_message(GENERIC_MESSAGE);
                notify.notify(Notification::error(message.clone()));
                self.state = SubmissionState::Failed { message };
            }
        }
    }

    /// 完整提交流程，返回是否创建成功
    pub async fn submit<T>(&mut self, api: &AdminApi<T>, notify: &impl Notify) -> bool
    where
        T: HttpTransport<File = F::File>,
    {
        let Some(payload) = self.prepare(api.config().max_image_bytes, notify) else {
            return false;
        };
        let result = api.create::<F::Resource>(payload).await;
        self.finish(result, notify);
        self.state == SubmissionState::Succeeded
    }
}

// =========================================================
// 登录表单
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    state: SubmissionState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// 返回待提交的 (email, password)
    pub fn prepare(&mut self, notify: &impl Notify) -> Option<(String, String)> {
        if self.state.is_submitting() {
            return None;
        }
        if self.email.is_empty() || self.password.is_empty() {
            notify.notify(Notification::error(LOGIN_FIELDS_REQUIRED));
            self.state = SubmissionState::Failed {
                message: LOGIN_FIELDS_REQUIRED.to_string(),
            };
            return None;
        }
        self.state = SubmissionState::Submitting;
        Some((self.email.clone(), self.password.clone()))
    }

    pub fn finish(&mut self, result: AdminResult<()>, notify: &impl Notify) {
        match result {
            Ok(()) => {
                self.email.clear();
                self.password.clear();
                self.state = SubmissionState::Succeeded;
                notify.notify(Notification::success(LOGIN_SUCCESS));
            }
            Err(e) => {
                let message = session::login_error_message(&e);
                notify.notify(Notification::error(message.clone()));
                self.state = SubmissionState::Failed { message };
            }
        }
    }

    pub async fn submit<T, S>(
        &mut self,
        api: &AdminApi<T>,
        session: &Session<S>,
        notify: &impl Notify,
    ) -> bool
    where
        T: HttpTransport,
        S: SessionStore,
    {
        let Some((email, password)) = self.prepare(notify) else {
            return false;
        };
        let result = session::login(api, session, &email, &password).await;
        self.finish(result, notify);
        self.state == SubmissionState::Succeeded
    }
}
