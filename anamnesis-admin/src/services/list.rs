//! Anamnesis list service
//!
//! Loads every form once and filters client-side. The search term is
//! debounced so the filter only changes once typing has paused.

use crate::api::{AnamnesisApi, AnamnesisForm};
use crate::config::SEARCH_DEBOUNCE;
use crate::error::Result;
use crate::services::debounce::Debounced;
use crate::services::dialog::Dialog;
use crate::services::scope::ViewScope;

/// State behind the list view
pub struct ListState<A> {
    api: A,
    scope: ViewScope,
    items: Vec<AnamnesisForm>,
    search: Debounced<String>,
    is_loading: bool,
    error: Option<String>,
    dialog: Option<Dialog>,
    pending_delete: Option<u64>,
}

impl<A: AnamnesisApi> ListState<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            items: Vec::new(),
            search: Debounced::new(String::new(), SEARCH_DEBOUNCE),
            is_loading: false,
            error: None,
            dialog: None,
            pending_delete: None,
        }
    }

    /// Fetch the whole collection from the backend
    pub async fn load(&mut self) -> Result<()> {
        tracing::info!("Loading anamnesis list");
        self.is_loading = true;

        let Some(outcome) = self.scope.run(self.api.list()).await else {
            return Ok(());
        };

        self.is_loading = false;

        match outcome {
            Ok(items) => {
                tracing::info!("Loaded {} anamnesis forms", items.len());
                self.items = items;
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to load anamnesis list: {}", err);
                self.set_error(err.to_string());
                Err(err)
            }
        }
    }

    /// All loaded forms in backend order, unfiltered
    pub fn items(&self) -> &[AnamnesisForm] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    // ===== Search =====

    /// The term as typed, before debouncing
    pub fn search_term(&self) -> &str {
        self.search.latest()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search.set(term.into());
    }

    /// Wait until the last typed term takes effect
    pub async fn settle_search(&mut self) {
        self.search.settle().await;
    }

    /// Forms matching the effective search term
    pub fn filtered(&mut self) -> Vec<AnamnesisForm> {
        let needle = self.search.current().to_lowercase();
        self.items
            .iter()
            .filter(|form| form.matches(&needle))
            .cloned()
            .collect()
    }

    // ===== Deletion =====

    /// Ask the user to confirm deleting form `id`
    pub fn request_delete(&mut self, id: u64) {
        self.pending_delete = Some(id);
        self.dialog = Some(Dialog::confirm("Are you sure you want to delete this item?"));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.dialog = None;
    }

    /// Delete the form awaiting confirmation, if any
    pub async fn confirm_delete(&mut self) -> Result<()> {
        self.dialog = None;
        match self.pending_delete.take() {
            Some(id) => self.delete_item(id).await,
            None => Ok(()),
        }
    }

    /// Delete a form on the backend, then drop it locally.
    ///
    /// Local state is only touched once the backend confirms.
    pub async fn delete_item(&mut self, id: u64) -> Result<()> {
        self.is_loading = true;

        let Some(outcome) = self.scope.run(self.api.delete(id)).await else {
            return Ok(());
        };

        self.is_loading = false;

        match outcome {
            Ok(()) => {
                self.items.retain(|form| form.id != id);
                tracing::info!("Anamnesis form {} removed from list", id);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to delete anamnesis form {}: {}", id, err);
                self.set_error(err.to_string());
                Err(err)
            }
        }
    }

    fn set_error(&mut self, message: String) {
        self.dialog = Some(Dialog::error(message.clone()));
        self.error = Some(message);
    }

    /// Close the current dialog
    pub fn acknowledge(&mut self) {
        self.dialog = None;
        self.error = None;
    }

    /// The view is going away; abandon any request in flight
    pub fn unmount(&self) {
        self.scope.end();
    }

    /// Handle on this view's scope. Ending it from another task abandons
    /// a request that is still awaiting.
    pub fn scope(&self) -> ViewScope {
        self.scope.clone()
    }
}
