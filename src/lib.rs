//! Batch actions for a manga library: classify, resolve, dispatch, report.

pub mod backend;
pub mod core;
pub mod logging;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{ActionDispatcher, ActionOptions, ActionRequest, DispatchError, MangaAction};
