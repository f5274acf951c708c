use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::{AlbumList, AuthorList, SongList};

// =========================================================
// 资源类型 (Resource Kinds)
// =========================================================

/// 后台管理的三类资源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Song,
    Album,
    Author,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Song => "song",
            ResourceKind::Album => "album",
            ResourceKind::Author => "author",
        }
    }

    pub fn list_path(&self) -> &'static str {
        match self {
            ResourceKind::Song => "/song/get-song",
            ResourceKind::Album => "/album/get-album",
            ResourceKind::Author => "/author/get-authors",
        }
    }

    pub fn create_path(&self) -> &'static str {
        match self {
            ResourceKind::Song => "/song/create-song",
            ResourceKind::Album => "/album/create-album",
            ResourceKind::Author => "/author/create-author",
        }
    }

    pub fn delete_path(&self, id: &str) -> String {
        format!("/{}/delete-{}/{}", self.as_str(), self.as_str(), id)
    }

    /// 创建请求的成功判定
    ///
    /// 歌曲接受任意 2xx，专辑与作者只认 201。
    pub fn create_succeeded(&self, status: u16) -> bool {
        match self {
            ResourceKind::Song => (200..300).contains(&status),
            ResourceKind::Album | ResourceKind::Author => status == 201,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 可被列表缓存管理的资源
///
/// `Listing` 是列表接口返回的外层信封，各资源的字段名不同。
pub trait Resource: Clone + DeserializeOwned + 'static {
    const KIND: ResourceKind;
    type Listing: DeserializeOwned + Into<Vec<Self>>;

    /// 服务端分配的唯一标识
    fn id(&self) -> &str;

    /// 用于提示文案与确认框的显示名
    fn display_name(&self) -> &str;
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "sName", default)]
    pub name: String,
    #[serde(rename = "sDescription", default)]
    pub description: String,
    #[serde(rename = "sAlbum", default)]
    pub album: String,
    #[serde(rename = "sAuthor", default)]
    pub author: String,
    #[serde(rename = "sLanguage", default)]
    pub language: String,
    #[serde(rename = "song_url", default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(rename = "file_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Resource for Song {
    const KIND: ResourceKind = ResourceKind::Song;
    type Listing = SongList;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "albumName", default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "file_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Resource for Album {
    const KIND: ResourceKind = ResourceKind::Album;
    type Listing = AlbumList;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "auName", default)]
    pub name: String,
    #[serde(rename = "file_url", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Resource for Author {
    const KIND: ResourceKind = ResourceKind::Author;
    type Listing = AuthorList;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_follow_remote_contract() {
        assert_eq!(ResourceKind::Song.delete_path("42"), "/song/delete-song/42");
        assert_eq!(ResourceKind::Album.delete_path("a1"), "/album/delete-album/a1");
        assert_eq!(ResourceKind::Author.delete_path("x"), "/author/delete-author/x");
        assert_eq!(ResourceKind::Author.list_path(), "/author/get-authors");
    }

    #[test]
    fn create_success_depends_on_kind() {
        assert!(ResourceKind::Song.create_succeeded(200));
        assert!(ResourceKind::Song.create_succeeded(201));
        assert!(ResourceKind::Album.create_succeeded(201));
        assert!(!ResourceKind::Album.create_succeeded(200));
        assert!(!ResourceKind::Author.create_succeeded(204));
    }

    #[test]
    fn song_decodes_server_field_names() {
        let song: Song = serde_json::from_value(serde_json::json!({
            "_id": "s1",
            "sName": "Test",
            "sDescription": "D",
            "sAlbum": "Alb1",
            "sAuthor": "A1",
            "sLanguage": "English",
            "file_url": "https://cdn/img.png"
        }))
        .unwrap();

        assert_eq!(song.id(), "s1");
        assert_eq!(song.display_name(), "Test");
        assert_eq!(song.image_url.as_deref(), Some("https://cdn/img.png"));
        assert_eq!(song.media_url, None);
    }
}
