use std::sync::Arc;

use log::debug;

use crate::backend::{BackendError, ChapterId, ChapterQuery, ChapterRef, MangaId, StateFilter};

/// Resolves which chapters of a manga selection are in a given state.
#[derive(Clone)]
pub struct ChapterSetResolver {
    query: Arc<dyn ChapterQuery>,
}

impl ChapterSetResolver {
    pub fn new(query: Arc<dyn ChapterQuery>) -> Self {
        Self { query }
    }

    /// Chapters of `manga_ids` matching `filter`, in backend order.
    /// Query failures are returned unchanged.
    pub async fn resolve(
        &self,
        manga_ids: &[MangaId],
        filter: StateFilter,
    ) -> Result<Vec<ChapterRef>, BackendError> {
        let chapters = self.query.chapters_with_state(manga_ids, filter).await?;
        debug!(
            "Resolved {} chapter(s) across {} manga for {:?}",
            chapters.len(),
            manga_ids.len(),
            filter
        );
        Ok(chapters)
    }

    pub async fn resolve_ids(
        &self,
        manga_ids: &[MangaId],
        filter: StateFilter,
    ) -> Result<Vec<ChapterId>, BackendError> {
        let chapters = self.resolve(manga_ids, filter).await?;
        Ok(crate::backend::types::ids(&chapters))
    }
}
