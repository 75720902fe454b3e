//! Services module
//!
//! View controllers that coordinate between the presentation layer and
//! the backend client.

pub mod debounce;
pub mod detail;
pub mod dialog;
pub mod form;
pub mod list;
pub mod scope;

pub use detail::DetailState;
pub use dialog::{Dialog, DialogKind};
pub use form::FormState;
pub use list::ListState;
pub use scope::ViewScope;
