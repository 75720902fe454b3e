//! Modal dialogs raised by the controllers
//!
//! Errors, confirmations and success notices all surface as a single
//! blocking dialog with a message. The presentation layer renders whatever
//! dialog a controller currently holds.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogKind {
    Error,
    Success,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

impl Dialog {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Success,
            message: message.into(),
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Confirm,
            message: message.into(),
        }
    }
}
