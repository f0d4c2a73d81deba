use thiserror::Error;

use crate::backend::{BackendError, ChapterId};
use crate::core::action::MangaAction;

/// Everything that can go wrong while dispatching an action.
///
/// Only `Backend` is a runtime condition. The rest are caller contract
/// violations: they are raised before anything is sent to the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("unknown action \"{0}\"")]
    UnknownAction(String),

    #[error("action {action} requires option `{option}`")]
    MissingOption {
        action: MangaAction,
        option: &'static str,
    },

    #[error("action {action} does not accept option `{option}`")]
    UnexpectedOption {
        action: MangaAction,
        option: &'static str,
    },

    #[error("action {0} invoked with no manga selected")]
    EmptySelection(MangaAction),

    #[error("chapter {0} is not part of the supplied chapter list")]
    ChapterNotInList(ChapterId),

    #[error("chapter list is not ordered by position within a single manga")]
    UnorderedChapters,

    #[error("chapter {id} cannot be {operation}")]
    ChapterStateConflict {
        id: ChapterId,
        operation: &'static str,
    },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl DispatchError {
    /// True for errors caused by the caller rather than the backend.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, DispatchError::Backend(_))
    }
}
