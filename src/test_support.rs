//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{
    BackendError, CategoriesPatch, Chapter, ChapterId, ChapterMutations, ChapterPatch, ChapterQuery,
    ChapterRef, MangaId, MangaMutations, MangaPatch, Notifier, Severity, StateFilter,
};
use crate::core::dispatcher::ActionDispatcher;
use crate::core::messages::MessageCatalog;
use crate::core::reporter::OutcomeReporter;

/// Builds a chapter with no bookmark.
pub fn chapter(
    id: ChapterId,
    manga_id: MangaId,
    index: u32,
    read: bool,
    downloaded: bool,
) -> Chapter {
    Chapter {
        id,
        manga_id,
        index,
        read,
        bookmarked: false,
        downloaded,
    }
}

/// A mutation as seen by the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Download(Vec<ChapterId>),
    Delete(Vec<ChapterId>),
    MarkAsRead(Vec<ChapterRef>, bool),
    MarkAsUnread(Vec<ChapterId>),
    UpdateChapter(ChapterId, ChapterPatch),
    UpdateChapters(Vec<ChapterId>, ChapterPatch),
    UpdateMangas(Vec<MangaId>, MangaPatch),
    UpdateMangasCategories(Vec<MangaId>, CategoriesPatch),
}

/// In-memory backend that answers queries from a fixed chapter list and
/// records every mutation instead of applying it.
#[derive(Default)]
pub struct MemoryBackend {
    chapters: Vec<Chapter>,
    queries: Mutex<Vec<(Vec<MangaId>, StateFilter)>>,
    calls: Mutex<Vec<Call>>,
    query_failure: Mutex<Option<BackendError>>,
    mutation_failure: Mutex<Option<BackendError>>,
}

impl MemoryBackend {
    pub fn with_chapters(chapters: Vec<Chapter>) -> Self {
        Self {
            chapters,
            ..Default::default()
        }
    }

    pub fn fail_queries(&self, error: BackendError) {
        *self.query_failure.lock().unwrap() = Some(error);
    }

    pub fn fail_mutations(&self, error: BackendError) {
        *self.mutation_failure.lock().unwrap() = Some(error);
    }

    pub fn queries(&self) -> Vec<(Vec<MangaId>, StateFilter)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), BackendError> {
        if let Some(error) = self.mutation_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl ChapterQuery for MemoryBackend {
    async fn chapters_with_state(
        &self,
        manga_ids: &[MangaId],
        filter: StateFilter,
    ) -> Result<Vec<ChapterRef>, BackendError> {
        self.queries.lock().unwrap().push((manga_ids.to_vec(), filter));
        if let Some(error) = self.query_failure.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self
            .chapters
            .iter()
            .filter(|c| manga_ids.contains(&c.manga_id) && filter.matches(c))
            .map(ChapterRef::from)
            .collect())
    }
}

#[async_trait]
impl ChapterMutations for MemoryBackend {
    async fn download(&self, ids: &[ChapterId]) -> Result<(), BackendError> {
        self.record(Call::Download(ids.to_vec()))
    }

    async fn delete(&self, ids: &[ChapterId]) -> Result<(), BackendError> {
        self.record(Call::Delete(ids.to_vec()))
    }

    async fn mark_as_read(
        &self,
        chapters: &[ChapterRef],
        was_manually_marked_as_read: bool,
    ) -> Result<(), BackendError> {
        self.record(Call::MarkAsRead(chapters.to_vec(), was_manually_marked_as_read))
    }

    async fn mark_as_unread(&self, ids: &[ChapterId]) -> Result<(), BackendError> {
        self.record(Call::MarkAsUnread(ids.to_vec()))
    }

    async fn update_chapter(&self, id: ChapterId, patch: ChapterPatch) -> Result<(), BackendError> {
        self.record(Call::UpdateChapter(id, patch))
    }

    async fn update_chapters(
        &self,
        ids: &[ChapterId],
        patch: ChapterPatch,
    ) -> Result<(), BackendError> {
        self.record(Call::UpdateChapters(ids.to_vec(), patch))
    }
}

#[async_trait]
impl MangaMutations for MemoryBackend {
    async fn update_mangas(&self, ids: &[MangaId], patch: MangaPatch) -> Result<(), BackendError> {
        self.record(Call::UpdateMangas(ids.to_vec(), patch))
    }

    async fn update_mangas_categories(
        &self,
        ids: &[MangaId],
        patch: CategoriesPatch,
    ) -> Result<(), BackendError> {
        self.record(Call::UpdateMangasCategories(ids.to_vec(), patch))
    }
}

/// Notifier that keeps every notification for later inspection.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    /// Drains the notifications seen so far.
    pub fn take(&self) -> Vec<(String, Severity)> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.seen.lock().unwrap().push((message.to_string(), severity));
    }
}

/// A dispatcher over `backend` reporting into a fresh `RecordingNotifier`.
pub fn test_dispatcher(
    backend: Arc<MemoryBackend>,
) -> (ActionDispatcher, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let reporter = OutcomeReporter::new(notifier.clone(), Arc::new(MessageCatalog::default()));
    (ActionDispatcher::with_backend(backend, reporter), notifier)
}
