use std::marker::PhantomData;

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::models::{Album, Author, Resource, Song};

/// HTTP Methods used by the catalog API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Multipart create requests are not described here: they carry browser file
/// handles and are assembled by the form layer instead.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
}

// =========================================================
// Request Definitions
// =========================================================

/// Log in as an administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Opaque profile, stored as-is
    #[serde(default)]
    pub user: serde_json::Value,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/user/login".to_string()
    }
}

/// List every record of one resource kind
pub struct ListRequest<R>(PhantomData<R>);

impl<R> ListRequest<R> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<R> Default for ListRequest<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> ApiRequest for ListRequest<R> {
    type Response = R::Listing;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        R::KIND.list_path().to_string()
    }
}

/// Delete one record by id
pub struct DeleteRequest<R> {
    pub id: String,
    _kind: PhantomData<R>,
}

impl<R> DeleteRequest<R> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _kind: PhantomData,
        }
    }
}

impl<R: Resource> ApiRequest for DeleteRequest<R> {
    // Body is not inspected on success.
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        R::KIND.delete_path(&self.id)
    }
}

// =========================================================
// Response Envelopes
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SongList {
    #[serde(default)]
    pub songs: Vec<Song>,
}

/// The album listing is served under `songs`, as the collaborator API returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumList {
    #[serde(rename = "songs", default)]
    pub albums: Vec<Album>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorList {
    #[serde(default)]
    pub authors: Vec<Author>,
}

impl From<SongList> for Vec<Song> {
    fn from(list: SongList) -> Self {
        list.songs
    }
}

impl From<AlbumList> for Vec<Album> {
    fn from(list: AlbumList) -> Self {
        list.albums
    }
}

impl From<AuthorList> for Vec<Author> {
    fn from(list: AuthorList) -> Self {
        list.authors
    }
}

/// Error payload returned with non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_listing_reads_songs_field() {
        let body = r#"{"songs":[{"_id":"a1","albumName":"First"},{"_id":"a2","albumName":"Second"}]}"#;
        let list: AlbumList = serde_json::from_str(body).unwrap();
        let albums: Vec<Album> = list.into();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[1].name, "Second");
    }

    #[test]
    fn missing_listing_field_is_empty() {
        let list: AuthorList = serde_json::from_str("{}").unwrap();
        assert!(list.authors.is_empty());
    }

    #[test]
    fn request_paths() {
        assert_eq!(ListRequest::<Song>::new().path(), "/song/get-song");
        assert_eq!(DeleteRequest::<Album>::new("9").path(), "/album/delete-album/9");
        let login = LoginRequest {
            email: "a@b.c".into(),
            password: "pw".into(),
        };
        assert_eq!(login.path(), "/user/login");
        assert_eq!(LoginRequest::METHOD, HttpMethod::Post);
    }
}
