//! Anamnesis admin library
//!
//! Client-side core of the anamnesis admin application: the backend
//! client, the view controllers and the helpers they share. Rendering
//! lives outside this crate.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ids;
pub mod reorder;
pub mod services;
pub mod table;
pub mod validation;
