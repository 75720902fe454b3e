//! Anamnesis detail service
//!
//! Shows a single persisted form. Unlike the form builder, changes made
//! here go to the backend immediately: deleting a section sends a partial
//! update and reordering sections saves the whole form.

use crate::api::{AnamnesisApi, AnamnesisForm};
use crate::error::{AppError, Result};
use crate::reorder::{reorder_items, DragEndEvent};
use crate::services::dialog::Dialog;
use crate::services::scope::ViewScope;

/// State behind the detail view
pub struct DetailState<A> {
    api: A,
    scope: ViewScope,
    form: Option<AnamnesisForm>,
    is_loading: bool,
    error: Option<String>,
    dialog: Option<Dialog>,
    section_to_delete: Option<String>,
}

impl<A: AnamnesisApi> DetailState<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            form: None,
            is_loading: true,
            error: None,
            dialog: None,
            section_to_delete: None,
        }
    }

    /// Fetch form `id` from the backend
    pub async fn load(&mut self, id: u64) -> Result<()> {
        tracing::info!("Loading anamnesis form {}", id);
        self.is_loading = true;

        let Some(outcome) = self.scope.run(self.api.get(id)).await else {
            return Ok(());
        };

        self.is_loading = false;

        match outcome {
            Ok(form) => {
                self.form = Some(form);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to load anamnesis form {}: {}", id, err);
                Err(self.fail(err))
            }
        }
    }

    pub fn form(&self) -> Option<&AnamnesisForm> {
        self.form.as_ref()
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

    pub fn section_to_delete(&self) -> Option<&str> {
        self.section_to_delete.as_deref()
    }

    // ===== Section deletion =====

    /// Ask the user to confirm deleting a section
    pub fn request_section_delete(&mut self, section_id: impl Into<String>) {
        self.section_to_delete = Some(section_id.into());
        self.dialog = Some(Dialog::confirm(
            "Are you sure you want to delete this section?",
        ));
    }

    pub fn cancel_section_delete(&mut self) {
        self.section_to_delete = None;
        self.dialog = None;
    }

    /// Persist the removal of the section awaiting confirmation.
    ///
    /// The remaining sections are sent as a partial update; the section is
    /// only removed locally once the backend accepts it.
    pub async fn confirm_section_delete(&mut self) -> Result<()> {
        self.dialog = None;

        let Some(section_id) = self.section_to_delete.take() else {
            return Ok(());
        };
        let Some(form) = self.form.as_ref() else {
            return Ok(());
        };

        let id = form.id;
        let remaining: Vec<_> = form
            .sections
            .iter()
            .filter(|s| s.id != section_id)
            .cloned()
            .collect();

        tracing::info!("Deleting section {} of anamnesis form {}", section_id, id);

        let Some(outcome) = self
            .scope
            .run(self.api.patch_sections(id, &remaining))
            .await
        else {
            return Ok(());
        };

        match outcome {
            Ok(_) => {
                if let Some(form) = self.form.as_mut() {
                    form.sections = remaining;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to delete section {}: {}", section_id, err);
                Err(self.fail(err))
            }
        }
    }

    // ===== Reordering =====

    /// Reorder sections and save the form right away
    pub async fn reorder_sections(&mut self, event: &DragEndEvent) -> Result<()> {
        let Some(form) = self.form.as_mut() else {
            return Ok(());
        };

        let before: Vec<String> = form.sections.iter().map(|s| s.id.clone()).collect();
        let sections = std::mem::take(&mut form.sections);
        form.sections = reorder_items(sections, event);

        let unchanged = form
            .sections
            .iter()
            .map(|s| s.id.as_str())
            .eq(before.iter().map(String::as_str));
        if unchanged {
            return Ok(());
        }

        let snapshot = form.clone();
        tracing::debug!("Saving new section order of anamnesis form {}", snapshot.id);

        let Some(outcome) = self.scope.run(self.api.replace(&snapshot)).await else {
            return Ok(());
        };

        match outcome {
            Ok(_) => {
                self.dialog = Some(Dialog::success("Section successfully updated"));
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Failed to save section order: {}", err);
                Err(self.fail(AppError::Generic(format!(
                    "Failed to update the form data: {}",
                    err
                ))))
            }
        }
    }

    fn fail(&mut self, err: AppError) -> AppError {
        let message = err.to_string();
        self.dialog = Some(Dialog::error(message.clone()));
        self.error = Some(message);
        err
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
