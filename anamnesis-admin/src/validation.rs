//! Form validation
//!
//! Checks a draft before it is sent to the backend. Rules are evaluated in
//! a fixed order and only the first violation is reported.

use crate::api::models::Section;
use thiserror::Error;

/// First rule a draft form violates
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Form title is required.")]
    MissingTitle,

    #[error("Form description is required.")]
    MissingDescription,

    #[error("At least one section is required.")]
    NoSections,

    #[error("Section must have a title.")]
    UntitledSection,

    #[error("Section must have at least one question.")]
    EmptySection,

    #[error("Question cannot be empty.")]
    EmptyQuestion,
}

/// Validate a form's editable parts.
///
/// Order: title, description, section count, then each section in turn
/// (title, question count, then each text question's prompt).
pub fn validate_form(
    title: &str,
    description: &str,
    sections: &[Section],
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingTitle);
    }

    if description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }

    if sections.is_empty() {
        return Err(ValidationError::NoSections);
    }

    for section in sections {
        if section.title.trim().is_empty() {
            return Err(ValidationError::UntitledSection);
        }

        if section.questions.is_empty() {
            return Err(ValidationError::EmptySection);
        }

        let blank_prompt = section
            .questions
            .iter()
            .any(|q| q.question_type.requires_prompt() && q.prompt.trim().is_empty());

        if blank_prompt {
            return Err(ValidationError::EmptyQuestion);
        }
    }

    Ok(())
}
