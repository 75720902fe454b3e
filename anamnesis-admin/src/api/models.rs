//! Anamnesis domain models
//!
//! Rust structs mirroring the backend's JSON documents.
//! All models use serde with the backend's camelCase field names.

use serde::{Deserialize, Serialize};

/// Kind of answer a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    ShortText,
    LongText,
    MultipleChoice,
    DateTime,
}

impl QuestionType {
    /// All question types, in the order the form builder offers them
    pub const ALL: [QuestionType; 4] = [
        QuestionType::ShortText,
        QuestionType::LongText,
        QuestionType::MultipleChoice,
        QuestionType::DateTime,
    ];

    /// Human readable name, e.g. "Short Text"
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::ShortText => "Short Text",
            QuestionType::LongText => "Long Text",
            QuestionType::MultipleChoice => "Multiple Choice",
            QuestionType::DateTime => "Date Time",
        }
    }

    /// Whether a save requires the prompt to be filled in
    pub fn requires_prompt(self) -> bool {
        matches!(self, QuestionType::ShortText | QuestionType::LongText)
    }
}

/// A single prompt within a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    /// The text shown to the patient
    #[serde(rename = "question", default)]
    pub prompt: String,
    /// Answer choices; only meaningful for multiple choice questions
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    pub fn new(id: String, question_type: QuestionType) -> Self {
        Self {
            id,
            question_type,
            prompt: String::new(),
            options: Vec::new(),
        }
    }

    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }

    /// Copy with an empty option appended
    pub fn with_option_added(&self) -> Self {
        let mut question = self.clone();
        question.options.push(String::new());
        question
    }

    /// Copy with the option at `index` replaced; out of range leaves options as is
    pub fn with_option_changed(&self, index: usize, value: impl Into<String>) -> Self {
        let mut question = self.clone();
        if let Some(option) = question.options.get_mut(index) {
            *option = value.into();
        }
        question
    }

    /// Copy with the option at `index` removed; out of range leaves options as is
    pub fn with_option_removed(&self, index: usize) -> Self {
        let mut question = self.clone();
        if index < question.options.len() {
            question.options.remove(index);
        }
        question
    }
}

/// A titled, ordered group of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(id: String) -> Self {
        Self {
            id,
            title: String::new(),
            questions: Vec::new(),
        }
    }
}

/// An anamnesis form as stored by the backend
///
/// An `id` of 0 means the form has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnamnesisForm {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// ISO-8601 timestamp of the first save
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl AnamnesisForm {
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Case-insensitive substring match against title or description.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Body of a partial update that replaces only the sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsPatch {
    pub sections: Vec<Section>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_uses_backend_field_names() {
        let form = AnamnesisForm {
            id: 42,
            title: "Intake".into(),
            description: "General".into(),
            created_at: "2024-05-01T10:00:00.000Z".into(),
            sections: vec![Section {
                id: "section-1".into(),
                title: "History".into(),
                questions: vec![Question {
                    id: "question-1".into(),
                    question_type: QuestionType::MultipleChoice,
                    prompt: "Smoker?".into(),
                    options: vec!["Yes".into(), "No".into()],
                }],
            }],
        };

        let value = serde_json::to_value(&form).unwrap();

        assert_eq!(value["createdAt"], "2024-05-01T10:00:00.000Z");
        assert_eq!(value["sections"][0]["questions"][0]["type"], "multiple_choice");
        assert_eq!(value["sections"][0]["questions"][0]["question"], "Smoker?");
    }

    #[test]
    fn test_missing_options_and_unknown_fields_are_tolerated() {
        let form: AnamnesisForm = serde_json::from_value(json!({
            "id": 3,
            "title": "Flu",
            "description": "cold",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "actions": "",
            "sections": [{
                "id": "s",
                "title": "t",
                "questions": [{ "id": "q", "type": "date_time", "question": "When?" }]
            }]
        }))
        .unwrap();

        let question = &form.sections[0].questions[0];
        assert_eq!(question.question_type, QuestionType::DateTime);
        assert!(question.options.is_empty());
    }

    #[test]
    fn test_option_editing_returns_full_replacement() {
        let question = Question::new("q".into(), QuestionType::MultipleChoice)
            .with_option_added()
            .with_option_added()
            .with_option_changed(0, "Yes")
            .with_option_changed(1, "No")
            .with_option_changed(5, "ignored");

        assert_eq!(question.options, vec!["Yes", "No"]);

        let trimmed = question.with_option_removed(0).with_option_removed(9);
        assert_eq!(trimmed.options, vec!["No"]);
        assert_eq!(trimmed.id, "q");
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = QuestionType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, ["Short Text", "Long Text", "Multiple Choice", "Date Time"]);
        assert!(QuestionType::LongText.requires_prompt());
        assert!(!QuestionType::DateTime.requires_prompt());
    }
}
