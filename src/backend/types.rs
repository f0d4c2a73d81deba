use serde::{Deserialize, Serialize};

pub type MangaId = i32;
pub type ChapterId = i32;

/// Anything with a backend identifier.
pub trait Identified {
    fn id(&self) -> i32;
}

/// Projects a slice of records to their identifiers, keeping order.
pub fn ids<T: Identified>(items: &[T]) -> Vec<i32> {
    items.iter().map(Identified::id).collect()
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChapterCount {
    pub total_count: u32,
}

/// A manga snapshot as handed to us by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manga {
    pub id: MangaId,
    pub download_count: u32,
    pub unread_count: u32,
    pub chapters: ChapterCount,
}

impl Identified for Manga {
    fn id(&self) -> i32 {
        self.id
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub manga_id: MangaId,
    /// Position within the manga.
    pub index: u32,
    pub read: bool,
    pub bookmarked: bool,
    pub downloaded: bool,
}

impl Identified for Chapter {
    fn id(&self) -> i32 {
        self.id
    }
}

/// The `{id, mangaId}` projection returned by chapter queries.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRef {
    pub id: ChapterId,
    pub manga_id: MangaId,
}

impl Identified for ChapterRef {
    fn id(&self) -> i32 {
        self.id
    }
}

impl From<&Chapter> for ChapterRef {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            manga_id: chapter.manga_id,
        }
    }
}

/// Partial predicate over chapter flags. `None` means "don't care".
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StateFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_downloaded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
}

impl StateFilter {
    pub fn downloaded(value: bool) -> Self {
        Self {
            is_downloaded: Some(value),
            ..Default::default()
        }
    }

    pub fn read(value: bool) -> Self {
        Self {
            is_read: Some(value),
            ..Default::default()
        }
    }

    /// Whether a chapter's flags satisfy every constraint in the filter.
    pub fn matches(&self, chapter: &Chapter) -> bool {
        self.is_read.is_none_or(|v| chapter.read == v)
            && self.is_downloaded.is_none_or(|v| chapter.downloaded == v)
            && self.is_bookmarked.is_none_or(|v| chapter.bookmarked == v)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MangaPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_library: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesPatch {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_to_categories: Vec<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub remove_from_categories: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_categories: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChapterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_bookmarked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_page_read: Option<u32>,
}
