//! # Actions
//!
//! Every batch operation a user can apply to a selection of manga is a
//! `MangaAction`. The action alone names *what* happens; `ActionRequest`
//! pairs it with exactly the options that action needs, so a request with
//! the wrong shape cannot be built.
//!
//! ```text
//! "mark_as_read" + ActionOptions ──validate()──► ActionRequest::MarkAsRead { .. }
//!                                                        │
//!                                                        ▼
//!                                          ActionDispatcher::perform_action()
//! ```
//!
//! The string form only exists at the boundary (`FromStr`, `perform_named`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::backend::CategoriesPatch;
use crate::core::error::DispatchError;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MangaAction {
    Download,
    Delete,
    MarkAsRead,
    MarkAsUnread,
    RemoveFromLibrary,
    ChangeCategories,
}

/// Translation keys attached to an action.
#[derive(Debug, PartialEq, Eq)]
pub struct ActionKeys {
    /// Label when acting on a single item.
    pub single: &'static str,
    /// Label when acting on a selection.
    pub selected: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

static DOWNLOAD_KEYS: ActionKeys = ActionKeys {
    single: "chapter.action.download.add.label.action",
    selected: "chapter.action.download.add.button.selected",
    success: "chapter.action.download.add.label.success",
    error: "chapter.action.download.add.label.error",
};

static DELETE_KEYS: ActionKeys = ActionKeys {
    single: "chapter.action.download.delete.label.action",
    selected: "chapter.action.download.delete.button.selected",
    success: "chapter.action.download.delete.label.success",
    error: "chapter.action.download.delete.label.error",
};

static MARK_AS_READ_KEYS: ActionKeys = ActionKeys {
    single: "chapter.action.mark_as_read.add.label.action.current",
    selected: "chapter.action.mark_as_read.add.button.selected",
    success: "chapter.action.mark_as_read.add.label.success",
    error: "chapter.action.mark_as_read.add.label.error",
};

static MARK_AS_UNREAD_KEYS: ActionKeys = ActionKeys {
    single: "chapter.action.mark_as_read.remove.label.action",
    selected: "chapter.action.mark_as_read.remove.button.selected",
    success: "chapter.action.mark_as_read.remove.label.success",
    error: "chapter.action.mark_as_read.remove.label.error",
};

static REMOVE_FROM_LIBRARY_KEYS: ActionKeys = ActionKeys {
    single: "manga.action.library.remove.label.action",
    selected: "manga.action.library.remove.button.selected",
    success: "manga.action.library.remove.label.success",
    error: "manga.action.library.remove.label.error",
};

static CHANGE_CATEGORIES_KEYS: ActionKeys = ActionKeys {
    single: "manga.action.category.label.action",
    selected: "manga.action.category.button.selected",
    success: "manga.action.category.label.success",
    error: "manga.action.category.label.error",
};

impl MangaAction {
    pub const ALL: [MangaAction; 6] = [
        MangaAction::Download,
        MangaAction::Delete,
        MangaAction::MarkAsRead,
        MangaAction::MarkAsUnread,
        MangaAction::RemoveFromLibrary,
        MangaAction::ChangeCategories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MangaAction::Download => "download",
            MangaAction::Delete => "delete",
            MangaAction::MarkAsRead => "mark_as_read",
            MangaAction::MarkAsUnread => "mark_as_unread",
            MangaAction::RemoveFromLibrary => "remove_from_library",
            MangaAction::ChangeCategories => "change_categories",
        }
    }

    pub fn keys(self) -> &'static ActionKeys {
        match self {
            MangaAction::Download => &DOWNLOAD_KEYS,
            MangaAction::Delete => &DELETE_KEYS,
            MangaAction::MarkAsRead => &MARK_AS_READ_KEYS,
            MangaAction::MarkAsUnread => &MARK_AS_UNREAD_KEYS,
            MangaAction::RemoveFromLibrary => &REMOVE_FROM_LIBRARY_KEYS,
            MangaAction::ChangeCategories => &CHANGE_CATEGORIES_KEYS,
        }
    }
}

impl fmt::Display for MangaAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MangaAction {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MangaAction::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DispatchError::UnknownAction(s.to_string()))
    }
}

/// An action together with the options it requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    Download,
    Delete,
    MarkAsRead { was_manually_marked_as_read: bool },
    MarkAsUnread,
    RemoveFromLibrary,
    ChangeCategories(CategoriesPatch),
}

impl ActionRequest {
    pub fn action(&self) -> MangaAction {
        match self {
            ActionRequest::Download => MangaAction::Download,
            ActionRequest::Delete => MangaAction::Delete,
            ActionRequest::MarkAsRead { .. } => MangaAction::MarkAsRead,
            ActionRequest::MarkAsUnread => MangaAction::MarkAsUnread,
            ActionRequest::RemoveFromLibrary => MangaAction::RemoveFromLibrary,
            ActionRequest::ChangeCategories(_) => MangaAction::ChangeCategories,
        }
    }
}

/// Loosely-typed options as they arrive from outside (JSON, IPC).
/// Use [`ActionOptions::into_request`] to turn them into an `ActionRequest`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ActionOptions {
    pub was_manually_marked_as_read: Option<bool>,
    pub change_categories_patch: Option<CategoriesPatch>,
}

const MANUALLY_MARKED: &str = "wasManuallyMarkedAsRead";
const CATEGORIES_PATCH: &str = "changeCategoriesPatch";

impl ActionOptions {
    /// Validates the option shape against `action`.
    pub fn into_request(self, action: MangaAction) -> Result<ActionRequest, DispatchError> {
        let ActionOptions {
            was_manually_marked_as_read,
            change_categories_patch,
        } = self;

        let forbid_manual = |value: Option<bool>| match value {
            Some(_) => Err(DispatchError::UnexpectedOption {
                action,
                option: MANUALLY_MARKED,
            }),
            None => Ok(()),
        };
        let forbid_patch = |value: Option<&CategoriesPatch>| match value {
            Some(_) => Err(DispatchError::UnexpectedOption {
                action,
                option: CATEGORIES_PATCH,
            }),
            None => Ok(()),
        };
        let plain = |request: ActionRequest| -> Result<ActionRequest, DispatchError> {
            forbid_manual(was_manually_marked_as_read)?;
            forbid_patch(change_categories_patch.as_ref())?;
            Ok(request)
        };

        match action {
            MangaAction::Download => plain(ActionRequest::Download),
            MangaAction::Delete => plain(ActionRequest::Delete),
            MangaAction::MarkAsUnread => plain(ActionRequest::MarkAsUnread),
            MangaAction::RemoveFromLibrary => plain(ActionRequest::RemoveFromLibrary),
            MangaAction::MarkAsRead => {
                forbid_patch(change_categories_patch.as_ref())?;
                let was_manually_marked_as_read =
                    was_manually_marked_as_read.ok_or(DispatchError::MissingOption {
                        action,
                        option: MANUALLY_MARKED,
                    })?;
                Ok(ActionRequest::MarkAsRead {
                    was_manually_marked_as_read,
                })
            }
            MangaAction::ChangeCategories => {
                forbid_manual(was_manually_marked_as_read)?;
                let patch = change_categories_patch.ok_or(DispatchError::MissingOption {
                    action,
                    option: CATEGORIES_PATCH,
                })?;
                Ok(ActionRequest::ChangeCategories(patch))
            }
        }
    }
}
