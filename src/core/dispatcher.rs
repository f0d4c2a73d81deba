//! # Action Dispatch
//!
//! Turns an `ActionRequest` for a manga selection into backend mutations.
//!
//! ```text
//! download        ─► resolve {isDownloaded: false} ─► chapters.download
//! delete          ─► resolve {isDownloaded: true}  ─► chapters.delete
//! mark_as_read    ─► resolve {isRead: false}       ─► chapters.mark_as_read
//! mark_as_unread  ─► resolve {isRead: true}        ─► chapters.mark_as_unread
//! remove_from_library ─────────────────────────────► mangas.update_mangas
//! change_categories ───────────────────────────────► mangas.update_mangas_categories
//! ```
//!
//! Manga-scoped actions always go through the `OutcomeReporter`. Chapter-scoped
//! ones only do when `report_chapter_actions` is enabled; otherwise the chapter
//! collaborator is responsible for telling the user. Chapter-scoped actions
//! run the refresh hook after they succeed.

use std::future::Future;
use std::sync::Arc;

use log::{debug, info};

use crate::backend::{
    Backend, CategoriesPatch, ChapterMutations, ChapterQuery, LogNotifier, MangaId, MangaMutations,
    MangaPatch, Notifier, StateFilter,
};
use crate::core::action::{ActionOptions, ActionRequest, MangaAction};
use crate::core::chapter_actions::{ChapterActions, RefreshHook};
use crate::core::config::ResolvedConfig;
use crate::core::error::DispatchError;
use crate::core::messages::MessageCatalog;
use crate::core::reporter::OutcomeReporter;
use crate::core::resolver::ChapterSetResolver;

/// Stateless between calls; safe to share and call concurrently.
#[derive(Clone)]
pub struct ActionDispatcher {
    resolver: ChapterSetResolver,
    chapters: Arc<dyn ChapterMutations>,
    mangas: Arc<dyn MangaMutations>,
    reporter: OutcomeReporter,
    report_chapter_actions: bool,
    on_chapters_changed: Option<RefreshHook>,
}

fn ensure_selection(action: MangaAction, manga_ids: &[MangaId]) -> Result<(), DispatchError> {
    if manga_ids.is_empty() {
        return Err(DispatchError::EmptySelection(action));
    }
    Ok(())
}

impl ActionDispatcher {
    pub fn new(
        query: Arc<dyn ChapterQuery>,
        chapters: Arc<dyn ChapterMutations>,
        mangas: Arc<dyn MangaMutations>,
        reporter: OutcomeReporter,
    ) -> Self {
        Self {
            resolver: ChapterSetResolver::new(query),
            chapters,
            mangas,
            reporter,
            report_chapter_actions: false,
            on_chapters_changed: None,
        }
    }

    /// Uses one backend for every collaborator seam.
    pub fn with_backend<B: Backend + 'static>(backend: Arc<B>, reporter: OutcomeReporter) -> Self {
        Self::new(backend.clone(), backend.clone(), backend, reporter)
    }

    /// Builds a dispatcher with the reporting policy and message overrides
    /// from `config`.
    pub fn from_config<B: Backend + 'static>(
        backend: Arc<B>,
        notifier: Arc<dyn Notifier>,
        config: &ResolvedConfig,
    ) -> Self {
        let catalog = Arc::new(MessageCatalog::with_overrides(&config.messages));
        Self::with_backend(backend, OutcomeReporter::new(notifier, catalog))
            .report_chapter_actions(config.report_chapter_actions)
    }

    /// Like [`Self::from_config`], for hosts without a toast surface:
    /// outcomes are written to the log instead.
    pub fn from_config_with_log<B: Backend + 'static>(
        backend: Arc<B>,
        config: &ResolvedConfig,
    ) -> Self {
        Self::from_config(backend, Arc::new(LogNotifier), config)
    }

    /// Routes chapter-scoped actions through the reporter as well.
    pub fn report_chapter_actions(mut self, enabled: bool) -> Self {
        self.report_chapter_actions = enabled;
        self
    }

    /// Hook run after a chapter-scoped mutation succeeds.
    pub fn on_chapters_changed(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_chapters_changed = Some(Arc::new(hook));
        self
    }

    /// Per-chapter operations sharing this dispatcher's collaborator and hook.
    pub fn chapter_actions(&self) -> ChapterActions {
        ChapterActions::new(self.chapters.clone(), self.on_chapters_changed.clone())
    }

    /// Parses `action` and validates `options` against it before dispatching.
    pub async fn perform_named(
        &self,
        action: &str,
        manga_ids: &[MangaId],
        options: ActionOptions,
    ) -> Result<(), DispatchError> {
        let action: MangaAction = action.parse()?;
        let request = options.into_request(action)?;
        self.perform_action(request, manga_ids).await
    }

    pub async fn perform_action(
        &self,
        request: ActionRequest,
        manga_ids: &[MangaId],
    ) -> Result<(), DispatchError> {
        info!("Performing {} on {} manga", request.action(), manga_ids.len());
        match request {
            ActionRequest::Download => self.download_chapters(manga_ids).await,
            ActionRequest::Delete => self.delete_chapters(manga_ids).await,
            ActionRequest::MarkAsRead {
                was_manually_marked_as_read,
            } => self.mark_as_read(manga_ids, was_manually_marked_as_read).await,
            ActionRequest::MarkAsUnread => self.mark_as_unread(manga_ids).await,
            ActionRequest::RemoveFromLibrary => self.remove_from_library(manga_ids).await,
            ActionRequest::ChangeCategories(patch) => {
                self.change_categories(manga_ids, patch).await
            }
        }
    }

    pub async fn download_chapters(&self, manga_ids: &[MangaId]) -> Result<(), DispatchError> {
        let action = MangaAction::Download;
        ensure_selection(action, manga_ids)?;
        self.chapter_scoped(action, manga_ids.len(), async {
            let ids = self
                .resolver
                .resolve_ids(manga_ids, StateFilter::downloaded(false))
                .await?;
            if ids.is_empty() {
                debug!("{action}: every chapter is already downloaded");
            } else {
                self.chapters.download(&ids).await?;
            }
            Ok::<_, DispatchError>(())
        })
        .await
    }

    pub async fn delete_chapters(&self, manga_ids: &[MangaId]) -> Result<(), DispatchError> {
        let action = MangaAction::Delete;
        ensure_selection(action, manga_ids)?;
        self.chapter_scoped(action, manga_ids.len(), async {
            let ids = self
                .resolver
                .resolve_ids(manga_ids, StateFilter::downloaded(true))
                .await?;
            if ids.is_empty() {
                debug!("{action}: nothing downloaded");
            } else {
                self.chapters.delete(&ids).await?;
            }
            Ok::<_, DispatchError>(())
        })
        .await
    }

    pub async fn mark_as_read(
        &self,
        manga_ids: &[MangaId],
        was_manually_marked_as_read: bool,
    ) -> Result<(), DispatchError> {
        let action = MangaAction::MarkAsRead;
        ensure_selection(action, manga_ids)?;
        self.chapter_scoped(action, manga_ids.len(), async {
            let chapters = self
                .resolver
                .resolve(manga_ids, StateFilter::read(false))
                .await?;
            if chapters.is_empty() {
                debug!("{action}: every chapter is already read");
            } else {
                self.chapters
                    .mark_as_read(&chapters, was_manually_marked_as_read)
                    .await?;
            }
            Ok::<_, DispatchError>(())
        })
        .await
    }

    pub async fn mark_as_unread(&self, manga_ids: &[MangaId]) -> Result<(), DispatchError> {
        let action = MangaAction::MarkAsUnread;
        ensure_selection(action, manga_ids)?;
        self.chapter_scoped(action, manga_ids.len(), async {
            let ids = self
                .resolver
                .resolve_ids(manga_ids, StateFilter::read(true))
                .await?;
            if ids.is_empty() {
                debug!("{action}: every chapter is already unread");
            } else {
                self.chapters.mark_as_unread(&ids).await?;
            }
            Ok::<_, DispatchError>(())
        })
        .await
    }

    pub async fn remove_from_library(&self, manga_ids: &[MangaId]) -> Result<(), DispatchError> {
        let action = MangaAction::RemoveFromLibrary;
        ensure_selection(action, manga_ids)?;
        let patch = MangaPatch {
            in_library: Some(false),
        };
        self.reporter
            .execute(action, manga_ids.len(), self.mangas.update_mangas(manga_ids, patch))
            .await?;
        Ok(())
    }

    pub async fn change_categories(
        &self,
        manga_ids: &[MangaId],
        patch: CategoriesPatch,
    ) -> Result<(), DispatchError> {
        let action = MangaAction::ChangeCategories;
        ensure_selection(action, manga_ids)?;
        self.reporter
            .execute(
                action,
                manga_ids.len(),
                self.mangas.update_mangas_categories(manga_ids, patch),
            )
            .await?;
        Ok(())
    }

    async fn chapter_scoped<Fut>(
        &self,
        action: MangaAction,
        item_count: usize,
        operation: Fut,
    ) -> Result<(), DispatchError>
    where
        Fut: Future<Output = Result<(), DispatchError>>,
    {
        let result = if self.report_chapter_actions {
            self.reporter.execute(action, item_count, operation).await
        } else {
            operation.await
        };
        if result.is_ok()
            && let Some(hook) = &self.on_chapters_changed
        {
            hook();
        }
        result
    }
}
