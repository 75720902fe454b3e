//! Form builder service
//!
//! Holds the draft of an anamnesis form while it is created or edited:
//! sections and questions are added, edited, reordered and removed
//! locally, and the whole form is persisted in one request on save.

use crate::api::{AnamnesisApi, AnamnesisForm, Question, QuestionType, Section};
use crate::app::Route;
use crate::error::{AppError, Result};
use crate::ids;
use crate::reorder::{reorder_items, DragEndEvent};
use crate::services::dialog::Dialog;
use crate::services::scope::ViewScope;
use crate::validation::{validate_form, ValidationError};
use chrono::{SecondsFormat, Utc};

/// Draft state of the create/update form
pub struct FormState<A> {
    api: A,
    scope: ViewScope,
    /// Backend id and creation time; `None` until the form is persisted
    id: Option<u64>,
    created_at: Option<String>,
    title: String,
    description: String,
    sections: Vec<Section>,
    is_saving: bool,
    error: Option<String>,
    dialog: Option<Dialog>,
    saved: Option<AnamnesisForm>,
}

impl<A: AnamnesisApi> FormState<A> {
    /// Empty draft for a new form
    pub fn new(api: A) -> Self {
        Self {
            api,
            scope: ViewScope::new(),
            id: None,
            created_at: None,
            title: String::new(),
            description: String::new(),
            sections: Vec::new(),
            is_saving: false,
            error: None,
            dialog: None,
            saved: None,
        }
    }

    /// Draft initialised from a form the backend already knows
    pub fn from_existing(api: A, form: AnamnesisForm) -> Self {
        let mut state = Self::new(api);
        if form.is_persisted() {
            state.id = Some(form.id);
            state.created_at = Some(form.created_at).filter(|at| !at.is_empty());
        }
        state.title = form.title;
        state.description = form.description;
        state.sections = form.sections;
        state
    }

    /// Fetch form `id` and open it for editing.
    ///
    /// Returns `Ok(None)` if `scope` ended before the response arrived.
    pub async fn load(api: A, scope: &ViewScope, id: u64) -> Result<Option<Self>> {
        tracing::info!("Loading anamnesis form {} for editing", id);

        let Some(form) = scope.run(api.get(id)).await.transpose()? else {
            return Ok(None);
        };

        let mut state = Self::from_existing(api, form);
        state.scope = scope.clone();
        Ok(Some(state))
    }

    // ===== Accessors =====

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    /// The form as returned by the backend after the last successful save
    pub fn saved(&self) -> Option<&AnamnesisForm> {
        self.saved.as_ref()
    }

    // ===== Editing =====

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Append an empty section and return its id
    pub fn add_section(&mut self) -> String {
        let section = Section::new(ids::section_id());
        let id = section.id.clone();
        tracing::debug!("Adding section {}", id);
        self.sections.push(section);
        id
    }

    pub fn set_section_title(&mut self, section_id: &str, title: impl Into<String>) {
        if let Some(section) = self.section_mut(section_id) {
            section.title = title.into();
        }
    }

    /// Remove a section; unknown ids are ignored
    pub fn remove_section(&mut self, section_id: &str) {
        self.sections.retain(|s| s.id != section_id);
    }

    pub fn reorder_sections(&mut self, event: &DragEndEvent) {
        let sections = std::mem::take(&mut self.sections);
        self.sections = reorder_items(sections, event);
    }

    /// Append an empty question to a section.
    ///
    /// Returns the new question's id, or `None` if the section does not exist.
    pub fn add_question(&mut self, section_id: &str, question_type: QuestionType) -> Option<String> {
        let section = self.section_mut(section_id)?;
        let question = Question::new(ids::question_id(), question_type);
        let id = question.id.clone();
        tracing::debug!("Adding {:?} question {} to section {}", question_type, id, section_id);
        section.questions.push(question);
        Some(id)
    }

    /// Replace the question with `updated.id` by `updated`
    pub fn update_question(&mut self, section_id: &str, updated: Question) {
        let Some(section) = self.section_mut(section_id) else {
            return;
        };
        if let Some(question) = section.questions.iter_mut().find(|q| q.id == updated.id) {
            *question = updated;
        }
    }

    pub fn remove_question(&mut self, section_id: &str, question_id: &str) {
        if let Some(section) = self.section_mut(section_id) {
            section.questions.retain(|q| q.id != question_id);
        }
    }

    pub fn reorder_questions(&mut self, section_id: &str, event: &DragEndEvent) {
        if let Some(section) = self.section_mut(section_id) {
            let questions = std::mem::take(&mut section.questions);
            section.questions = reorder_items(questions, event);
        }
    }

    fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    // ===== Saving =====

    /// First rule the draft violates, if any
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_form(&self.title, &self.description, &self.sections)
    }

    /// Validate and persist the draft.
    ///
    /// New forms are created with a fresh id and timestamp; existing forms
    /// are replaced in full, keeping their original creation time.
    pub async fn save(&mut self) -> Result<AnamnesisForm> {
        self.saved = None;

        if let Err(err) = self.validate() {
            tracing::debug!("Form failed validation: {}", err);
            return Err(self.fail(err.into()));
        }

        self.is_saving = true;
        self.error = None;

        let payload = self.payload();
        let is_update = self.id.is_some();

        tracing::info!(
            "{} anamnesis form {}",
            if is_update { "Updating" } else { "Creating" },
            payload.id
        );

        let api = &self.api;
        let request = async {
            if is_update {
                api.replace(&payload).await
            } else {
                api.create(&payload).await
            }
        };
        let outcome = self.scope.run(request).await;

        self.is_saving = false;

        match outcome {
            None => Err(AppError::Generic("Save abandoned: the form was closed".into())),
            Some(Err(err)) => {
                tracing::warn!("Failed to save anamnesis form {}: {}", payload.id, err);
                Err(self.fail(err))
            }
            Some(Ok(saved)) => {
                tracing::info!("Anamnesis form {} saved", payload.id);
                self.id = Some(payload.id);
                self.created_at = Some(payload.created_at);
                self.dialog = Some(Dialog::success(format!(
                    "Data successfully {}!",
                    if is_update { "updated" } else { "created" }
                )));
                self.saved = Some(saved.clone());
                Ok(saved)
            }
        }
    }

    /// The complete document that a save sends
    fn payload(&self) -> AnamnesisForm {
        AnamnesisForm {
            id: self.id.unwrap_or_else(ids::form_id),
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: self
                .created_at
                .clone()
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            sections: self.sections.clone(),
        }
    }

    fn fail(&mut self, err: AppError) -> AppError {
        let message = err.to_string();
        self.dialog = Some(Dialog::error(message.clone()));
        self.error = Some(message);
        err
    }

    // ===== Dialog =====

    /// Close the current dialog.
    ///
    /// After a successful save the view should leave for the returned route.
    pub fn acknowledge(&mut self) -> Option<Route> {
        self.dialog = None;
        self.error = None;
        self.saved.as_ref().map(|_| Route::List)
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
