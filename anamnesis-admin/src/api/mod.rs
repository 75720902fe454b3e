//! Backend access
//!
//! This module provides everything needed to talk to the anamnesis backend:
//! - Model definitions mirroring the backend's documents
//! - The REST client and the trait the controllers depend on

pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{AnamnesisApi, HttpAnamnesisApi};
pub use models::*;
