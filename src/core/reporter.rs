//! # Outcome Reporting
//!
//! Runs a mutation and tells the user how it went. Exactly one notification
//! is emitted per call. On failure the original error is handed back after
//! notifying, so callers can still react to it.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use log::{info, warn};

use crate::backend::{Notifier, Severity};
use crate::core::action::MangaAction;
use crate::core::messages::MessageCatalog;

#[derive(Clone)]
pub struct OutcomeReporter {
    notifier: Arc<dyn Notifier>,
    catalog: Arc<MessageCatalog>,
}

impl OutcomeReporter {
    pub fn new(notifier: Arc<dyn Notifier>, catalog: Arc<MessageCatalog>) -> Self {
        Self { notifier, catalog }
    }

    /// Awaits `operation` and reports its outcome for `item_count` items.
    ///
    /// `item_count` is the size of the user's selection, not the number of
    /// records the operation ended up touching.
    pub async fn execute<T, E, Fut>(
        &self,
        action: MangaAction,
        item_count: usize,
        operation: Fut,
    ) -> Result<T, E>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let keys = action.keys();
        match operation.await {
            Ok(value) => {
                info!("{action} succeeded for {item_count} item(s)");
                self.notifier
                    .notify(&self.catalog.render(keys.success, item_count), Severity::Success);
                Ok(value)
            }
            Err(e) => {
                warn!("{action} failed for {item_count} item(s): {e}");
                self.notifier
                    .notify(&self.catalog.render(keys.error, item_count), Severity::Error);
                Err(e)
            }
        }
    }
}
