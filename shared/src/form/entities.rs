//! 歌曲 / 专辑 / 作者三种上传表单

use super::{EntityForm, ImageSlot, ValidationError, check_mime};
use crate::api::AdminApi;
use crate::models::{Album, Author, Resource, ResourceKind, Song};
use crate::transport::{HttpTransport, MultipartForm, SelectedFile};

/// 下拉框的“未选择”哨兵值
pub const NONE_OPTION: &str = "None";
pub const LANGUAGES: [&str; 5] = [NONE_OPTION, "English", "Hindi", "Spanish", "French"];

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// =========================================================
// 歌曲
// =========================================================

#[derive(Debug, Clone)]
pub struct SongForm<F> {
    pub name: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub album: String,
    song_file: Option<F>,
    image: ImageSlot<F>,
}

impl<F: SelectedFile> SongForm<F> {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            author: NONE_OPTION.to_string(),
            language: NONE_OPTION.to_string(),
            album: NONE_OPTION.to_string(),
            song_file: None,
            image: ImageSlot::new(),
        }
    }

    /// 音频文件，MIME 已知时必须是 audio/*
    pub fn select_song_file(&mut self, file: F) -> Result<(), ValidationError> {
        check_mime(&file, "audio/", "audio")?;
        self.song_file = Some(file);
        Ok(())
    }

    pub fn select_image(&mut self, file: F, max_bytes: u64) -> Result<(), ValidationError> {
        self.image.select(file, max_bytes)
    }

    pub fn song_file(&self) -> Option<&F> {
        self.song_file.as_ref()
    }

    pub fn image(&self) -> &ImageSlot<F> {
        &self.image
    }
}

impl<F: SelectedFile> Default for SongForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SelectedFile> EntityForm for SongForm<F> {
    type Resource = Song;
    type File = F;

    const SUCCESS_MESSAGE: &'static str = "Song created successfully!";

    fn build(&self, max_image_bytes: u64) -> Result<MultipartForm<F>, ValidationError> {
        let song_file = self
            .song_file
            .as_ref()
            .ok_or(ValidationError::SongFileRequired)?;
        let image = self.image.validated(max_image_bytes)?;
        if is_blank(&self.name) {
            return Err(ValidationError::NameRequired(ResourceKind::Song));
        }
        if is_blank(&self.description) {
            return Err(ValidationError::DescriptionRequired);
        }
        if self.author == NONE_OPTION || is_blank(&self.author) {
            return Err(ValidationError::AuthorRequired);
        }
        if self.language == NONE_OPTION || is_blank(&self.language) {
            return Err(ValidationError::LanguageRequired);
        }
        if self.album == NONE_OPTION || is_blank(&self.album) {
            return Err(ValidationError::AlbumRequired);
        }

        Ok(MultipartForm::new()
            .text("sName", self.name.clone())
            .text("sDescription", self.description.clone())
            .text("sAuthor", self.author.clone())
            .text("sAlbum", self.album.clone())
            .text("sLanguage", self.language.clone())
            .file("songFile", song_file.clone())
            .file("imageFile", image.clone()))
    }

    fn reset(&mut self) {
        self.image.clear();
        *self = Self::new();
    }
}

// =========================================================
// 专辑
// =========================================================

#[derive(Debug, Clone)]
pub struct AlbumForm<F> {
    pub name: String,
    image: ImageSlot<F>,
}

impl<F: SelectedFile> AlbumForm<F> {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            image: ImageSlot::new(),
        }
    }

    pub fn select_image(&mut self, file: F, max_bytes: u64) -> Result<(), ValidationError> {
        self.image.select(file, max_bytes)
    }

    pub fn image(&self) -> &ImageSlot<F> {
        &self.image
    }
}

impl<F: SelectedFile> Default for AlbumForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SelectedFile> EntityForm for AlbumForm<F> {
    type Resource = Album;
    type File = F;

    const SUCCESS_MESSAGE: &'static str = "Album submitted successfully!";

    fn build(&self, max_image_bytes: u64) -> Result<MultipartForm<F>, ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::NameRequired(ResourceKind::Album));
        }
        let image = self.image.validated(max_image_bytes)?;
        Ok(MultipartForm::new()
            .text("albumName", self.name.clone())
            .file("albumImage", image.clone()))
    }

    fn reset(&mut self) {
        self.name.clear();
        self.image.clear();
    }
}

// =========================================================
// 作者
// =========================================================

#[derive(Debug, Clone)]
pub struct AuthorForm<F> {
    pub name: String,
    image: ImageSlot<F>,
}

impl<F: SelectedFile> AuthorForm<F> {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            image: ImageSlot::new(),
        }
    }

    pub fn select_image(&mut self, file: F, max_bytes: u64) -> Result<(), ValidationError> {
        self.image.select(file, max_bytes)
    }

    pub fn image(&self) -> &ImageSlot<F> {
        &self.image
    }
}

impl<F: SelectedFile> Default for AuthorForm<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: SelectedFile> EntityForm for AuthorForm<F> {
    type Resource = Author;
    type File = F;

    const SUCCESS_MESSAGE: &'static str = "Author submitted successfully!";

    fn build(&self, max_image_bytes: u64) -> Result<MultipartForm<F>, ValidationError> {
        if is_blank(&self.name) {
            return Err(ValidationError::NameRequired(ResourceKind::Author));
        }
        let image = self.image.validated(max_image_bytes)?;
        Ok(MultipartForm::new()
            .text("auName", self.name.clone())
            .file("authorImage", image.clone()))
    }

    fn reset(&mut self) {
        self.name.clear();
        self.image.clear();
    }
}

// =========================================================
// 歌曲表单的下拉选项
// =========================================================

/// 作者与专辑的可选名称（提交时使用名称而非 id）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFormOptions {
    pub authors: Vec<String>,
    pub albums: Vec<String>,
}

/// 并发获取作者与专辑列表，任一失败则两者皆为空
pub async fn load_song_form_options<T: HttpTransport>(api: &AdminApi<T>) -> SongFormOptions {
    let (authors, albums) = futures::join!(api.list::<Author>(), api.list::<Album>());
    match (authors, albums) {
        (Ok(authors), Ok(albums)) => SongFormOptions {
            authors: authors.iter().map(|a| a.display_name().to_string()).collect(),
            albums: albums.iter().map(|a| a.display_name().to_string()).collect(),
        },
        (Err(e), _) | (_, Err(e)) => {
            log_error!("Error fetching authors or albums: {}", e);
            SongFormOptions::default()
        }
    }
}
