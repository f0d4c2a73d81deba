use async_trait::async_trait;
use thiserror::Error;

use super::types::{
    CategoriesPatch, ChapterId, ChapterPatch, ChapterRef, MangaId, MangaPatch, StateFilter,
};

/// Errors surfaced by backend collaborators.
/// The core never retries these; they are passed through to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never completed (timeout, DNS, connection refused).
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered and refused the request.
    #[error("backend rejected request: {0}")]
    Rejected(String),
    /// The backend answered with something we could not read.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Query layer: chapters of the given mangas whose flags match `filter`.
#[async_trait]
pub trait ChapterQuery: Send + Sync {
    async fn chapters_with_state(
        &self,
        manga_ids: &[MangaId],
        filter: StateFilter,
    ) -> Result<Vec<ChapterRef>, BackendError>;
}

/// Chapter-level mutations. Partial failure semantics are the implementor's.
#[async_trait]
pub trait ChapterMutations: Send + Sync {
    /// Enqueues chapters for download.
    async fn download(&self, ids: &[ChapterId]) -> Result<(), BackendError>;

    /// Deletes the downloaded content of chapters.
    async fn delete(&self, ids: &[ChapterId]) -> Result<(), BackendError>;

    async fn mark_as_read(
        &self,
        chapters: &[ChapterRef],
        was_manually_marked_as_read: bool,
    ) -> Result<(), BackendError>;

    async fn mark_as_unread(&self, ids: &[ChapterId]) -> Result<(), BackendError>;

    async fn update_chapter(&self, id: ChapterId, patch: ChapterPatch) -> Result<(), BackendError>;

    async fn update_chapters(
        &self,
        ids: &[ChapterId],
        patch: ChapterPatch,
    ) -> Result<(), BackendError>;
}

#[async_trait]
pub trait MangaMutations: Send + Sync {
    async fn update_mangas(&self, ids: &[MangaId], patch: MangaPatch) -> Result<(), BackendError>;

    async fn update_mangas_categories(
        &self,
        ids: &[MangaId],
        patch: CategoriesPatch,
    ) -> Result<(), BackendError>;
}

/// A single backend implementing every collaborator seam.
pub trait Backend: ChapterQuery + ChapterMutations + MangaMutations {}

impl<T: ChapterQuery + ChapterMutations + MangaMutations> Backend for T {}
