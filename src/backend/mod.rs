pub mod collaborator;
pub mod notifiers;
pub mod types;

pub use collaborator::{Backend, BackendError, ChapterMutations, ChapterQuery, MangaMutations};
pub use notifiers::{ChannelNotifier, LogNotifier, Notification, Notifier, Severity};
pub use types::{
    CategoriesPatch, Chapter, ChapterCount, ChapterId, ChapterPatch, ChapterRef, Identified, Manga,
    MangaId, MangaPatch, StateFilter,
};
