use serde::Deserialize;

/// One element of the catalog payload as the endpoint sends it.
///
/// Only `title` is mandatory. The other fields fall back to their defaults
/// when the endpoint omits them; fields the catalog does not know about are
/// ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawAlbum {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub genre: String,
}

/// An album ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub title: String,
    pub creator: String,
    pub year: i32,
    pub category: String,
    pub cover_ref: String,
}

impl Album {
    /// 只在取得封面網址之後才建立，確保 `cover_ref` 永遠有值
    pub fn from_raw(raw: RawAlbum, cover_ref: String) -> Self {
        Self {
            title: raw.title,
            creator: raw.artist,
            year: raw.year,
            category: raw.genre,
            cover_ref,
        }
    }
}

/// Where a loader run ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Fetching,
    Publishing,
    Done,
    Failed,
}

impl LoadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Done | LoadState::Failed)
    }
}
