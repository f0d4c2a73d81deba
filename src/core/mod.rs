//! # Core Batch-Action Logic
//!
//! This module decides *what* to ask the backend for when a user applies an
//! action to a manga selection, and how to report the outcome.
//! It knows nothing about any specific UI or transport.
//!
//! ```text
//!   caller ──► ActionDispatcher ──► ChapterSetResolver ──► ChapterQuery
//!                   │                                          (backend)
//!                   ├──► ChapterMutations  (download, delete, read, unread)
//!                   │
//!                   └──► OutcomeReporter ──► MangaMutations
//!                              │             (remove, categories)
//!                              ▼
//!                          Notifier
//! ```
//!
//! ## Modules
//!
//! - [`action`]: `MangaAction`, its translation keys, and `ActionRequest`
//! - [`classify`]: download/read state from aggregate counters
//! - [`resolver`]: which chapters an action touches
//! - [`dispatcher`]: action → resolution → mutation
//! - [`reporter`]: success/error notifications around a mutation
//! - [`chapter_actions`]: single-chapter operations
//! - [`messages`]: translation key rendering
//! - [`config`]: `~/.mangabatch/config.toml`

pub mod action;
pub mod chapter_actions;
pub mod classify;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod messages;
pub mod reporter;
pub mod resolver;

// Re-export commonly used types for convenience
pub use action::{ActionOptions, ActionRequest, MangaAction};
pub use dispatcher::ActionDispatcher;
pub use error::DispatchError;
