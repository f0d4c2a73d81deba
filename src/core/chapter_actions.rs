//! # Per-Chapter Actions
//!
//! The operations a single chapter row offers: bookmark and read toggles,
//! single download/delete, and "mark previous as read".
//!
//! "Previous" follows list order. Given the chapter ids as displayed and a
//! target, everything from the target up to but excluding the last entry is
//! marked read:
//!
//! ```text
//! [10, 11, 12, 13, 14], target 12  →  [12, 13]
//! ```

use std::sync::Arc;

use log::{debug, info};

use crate::backend::{Chapter, ChapterId, ChapterMutations, ChapterPatch};
use crate::core::error::DispatchError;

pub type RefreshHook = Arc<dyn Fn() + Send + Sync>;

/// A chapter can be queued when it is neither downloaded nor already queued.
pub fn can_be_downloaded(chapter: &Chapter, queued: bool) -> bool {
    !chapter.downloaded && !queued
}

/// The ids "mark previous as read" applies to.
pub fn previous_chapter_ids(
    chapter_ids: &[ChapterId],
    target: ChapterId,
) -> Result<&[ChapterId], DispatchError> {
    let position = chapter_ids
        .iter()
        .position(|id| *id == target)
        .ok_or(DispatchError::ChapterNotInList(target))?;
    Ok(&chapter_ids[position..chapter_ids.len() - 1])
}

/// Rejects lists that span several mangas or are not monotonic in `index`.
pub fn check_ordering(chapters: &[Chapter]) -> Result<(), DispatchError> {
    let Some(first) = chapters.first() else {
        return Ok(());
    };
    if chapters.iter().any(|c| c.manga_id != first.manga_id) {
        return Err(DispatchError::UnorderedChapters);
    }
    let ascending = chapters.windows(2).all(|w| w[0].index < w[1].index);
    let descending = chapters.windows(2).all(|w| w[0].index > w[1].index);
    if ascending || descending {
        Ok(())
    } else {
        Err(DispatchError::UnorderedChapters)
    }
}

#[derive(Clone)]
pub struct ChapterActions {
    chapters: Arc<dyn ChapterMutations>,
    on_chapters_changed: Option<RefreshHook>,
}

impl ChapterActions {
    pub fn new(
        chapters: Arc<dyn ChapterMutations>,
        on_chapters_changed: Option<RefreshHook>,
    ) -> Self {
        Self {
            chapters,
            on_chapters_changed,
        }
    }

    fn refresh(&self) {
        if let Some(hook) = &self.on_chapters_changed {
            hook();
        }
    }

    pub async fn toggle_bookmark(&self, chapter: &Chapter) -> Result<(), DispatchError> {
        let patch = ChapterPatch {
            is_bookmarked: Some(!chapter.bookmarked),
            ..Default::default()
        };
        self.chapters.update_chapter(chapter.id, patch).await?;
        self.refresh();
        Ok(())
    }

    /// Flips the read flag and resets reading progress.
    pub async fn toggle_read(&self, chapter: &Chapter) -> Result<(), DispatchError> {
        let patch = ChapterPatch {
            is_read: Some(!chapter.read),
            last_page_read: Some(0),
            ..Default::default()
        };
        self.chapters.update_chapter(chapter.id, patch).await?;
        self.refresh();
        Ok(())
    }

    /// Queues one chapter. Download progress is reported by the queue, so no
    /// refresh is triggered here.
    pub async fn download(&self, chapter: &Chapter, queued: bool) -> Result<(), DispatchError> {
        if !can_be_downloaded(chapter, queued) {
            return Err(DispatchError::ChapterStateConflict {
                id: chapter.id,
                operation: "downloaded",
            });
        }
        self.chapters.download(&[chapter.id]).await?;
        Ok(())
    }

    pub async fn delete(&self, chapter: &Chapter) -> Result<(), DispatchError> {
        if !chapter.downloaded {
            return Err(DispatchError::ChapterStateConflict {
                id: chapter.id,
                operation: "deleted",
            });
        }
        self.chapters.delete(&[chapter.id]).await?;
        self.refresh();
        Ok(())
    }

    /// Trusts `chapter_ids` to be in display order. Refreshes afterwards,
    /// like the other per-chapter mutations.
    pub async fn mark_previous_as_read(
        &self,
        chapter_ids: &[ChapterId],
        target: ChapterId,
    ) -> Result<(), DispatchError> {
        let ids = previous_chapter_ids(chapter_ids, target)?;
        if ids.is_empty() {
            debug!("Nothing before chapter {target} to mark as read");
            return Ok(());
        }
        info!("Marking {} chapter(s) as read from chapter {target}", ids.len());
        let patch = ChapterPatch {
            is_read: Some(true),
            ..Default::default()
        };
        self.chapters.update_chapters(ids, patch).await?;
        self.refresh();
        Ok(())
    }

    /// Like [`Self::mark_previous_as_read`], but verifies the ordering first.
    pub async fn mark_previous_as_read_checked(
        &self,
        chapters: &[Chapter],
        target: ChapterId,
    ) -> Result<(), DispatchError> {
        check_ordering(chapters)?;
        let ids: Vec<ChapterId> = chapters.iter().map(|c| c.id).collect();
        self.mark_previous_as_read(&ids, target).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::test_support::{Call, MemoryBackend, chapter};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio_test::{assert_err, assert_ok};

    fn actions() -> (ChapterActions, Arc<MemoryBackend>, Arc<AtomicUsize>) {
        let backend = Arc::new(MemoryBackend::default());
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = refreshes.clone();
        let hook: RefreshHook = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (ChapterActions::new(backend.clone(), Some(hook)), backend, refreshes)
    }

    #[test]
    fn test_previous_excludes_last_element() {
        let ids = [10, 11, 12, 13, 14];
        assert_eq!(previous_chapter_ids(&ids, 12).unwrap(), &[12, 13]);
        assert_eq!(previous_chapter_ids(&ids, 10).unwrap(), &[10, 11, 12, 13]);
        assert!(previous_chapter_ids(&ids, 14).unwrap().is_empty());
    }

    #[test]
    fn test_previous_missing_target() {
        let err = previous_chapter_ids(&[1, 2, 3], 9).unwrap_err();
        assert_eq!(err, DispatchError::ChapterNotInList(9));
    }

    #[test]
    fn test_check_ordering() {
        let asc = [chapter(1, 5, 0, false, false), chapter(2, 5, 1, false, false)];
        let desc = [chapter(2, 5, 1, false, false), chapter(1, 5, 0, false, false)];
        let mixed = [
            chapter(1, 5, 0, false, false),
            chapter(3, 5, 2, false, false),
            chapter(2, 5, 1, false, false),
        ];
        let two_mangas = [chapter(1, 5, 0, false, false), chapter(2, 6, 1, false, false)];

        assert_ok!(check_ordering(&asc));
        assert_ok!(check_ordering(&desc));
        assert_ok!(check_ordering(&[]));
        assert_eq!(check_ordering(&mixed), Err(DispatchError::UnorderedChapters));
        assert_eq!(check_ordering(&two_mangas), Err(DispatchError::UnorderedChapters));
    }

    #[test]
    fn test_can_be_downloaded() {
        assert!(can_be_downloaded(&chapter(1, 1, 0, false, false), false));
        assert!(!can_be_downloaded(&chapter(1, 1, 0, false, false), true));
        assert!(!can_be_downloaded(&chapter(1, 1, 0, false, true), false));
    }

    #[tokio::test]
    async fn test_mark_previous_as_read_updates_slice() {
        let (actions, backend, refreshes) = actions();
        assert_ok!(actions.mark_previous_as_read(&[10, 11, 12, 13, 14], 12).await);
        assert_eq!(
            backend.calls(),
            vec![Call::UpdateChapters(
                vec![12, 13],
                ChapterPatch {
                    is_read: Some(true),
                    ..Default::default()
                }
            )]
        );
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mark_previous_as_read_last_chapter_is_noop() {
        let (actions, backend, refreshes) = actions();
        assert_ok!(actions.mark_previous_as_read(&[10, 11], 11).await);
        assert!(backend.calls().is_empty());
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mark_previous_as_read_checked_rejects_unordered() {
        let (actions, backend, _) = actions();
        let chapters = [
            chapter(10, 1, 4, false, false),
            chapter(11, 1, 2, false, false),
            chapter(12, 1, 3, false, false),
        ];
        let err = assert_err!(actions.mark_previous_as_read_checked(&chapters, 10).await);
        assert_eq!(err, DispatchError::UnorderedChapters);
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_read_resets_progress() {
        let (actions, backend, refreshes) = actions();
        assert_ok!(actions.toggle_read(&chapter(3, 1, 0, true, false)).await);
        assert_eq!(
            backend.calls(),
            vec![Call::UpdateChapter(
                3,
                ChapterPatch {
                    is_read: Some(false),
                    last_page_read: Some(0),
                    is_bookmarked: None,
                }
            )]
        );
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_toggle_bookmark() {
        let (actions, backend, _) = actions();
        let mut bookmarked = chapter(4, 1, 0, false, false);
        bookmarked.bookmarked = true;
        assert_ok!(actions.toggle_bookmark(&bookmarked).await);
        assert_eq!(
            backend.calls(),
            vec![Call::UpdateChapter(
                4,
                ChapterPatch {
                    is_bookmarked: Some(false),
                    ..Default::default()
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_download_and_delete_respect_state() {
        let (actions, backend, refreshes) = actions();
        let on_disk = chapter(1, 1, 0, false, true);
        let remote = chapter(2, 1, 1, false, false);

        assert_err!(actions.download(&on_disk, false).await);
        assert_err!(actions.download(&remote, true).await);
        assert_err!(actions.delete(&remote).await);
        assert!(backend.calls().is_empty());

        assert_ok!(actions.download(&remote, false).await);
        assert_ok!(actions.delete(&on_disk).await);
        assert_eq!(
            backend.calls(),
            vec![Call::Download(vec![2]), Call::Delete(vec![1])]
        );
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_update_skips_refresh() {
        let (actions, backend, refreshes) = actions();
        backend.fail_mutations(BackendError::Transport("offline".into()));
        let err = assert_err!(actions.toggle_bookmark(&chapter(1, 1, 0, false, false)).await);
        assert_eq!(err, DispatchError::Backend(BackendError::Transport("offline".into())));
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }
}
