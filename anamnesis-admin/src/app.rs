//! Application state and routing
//!
//! This module manages the shared application state and the client routes.
//! The backend client is built once here and handed to every view.

use crate::api::HttpAnamnesisApi;
use crate::config::AppConfig;
use crate::error::Result;
use crate::services::{DetailState, FormState, ListState, ViewScope};

/// Views of the admin application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(u64),
    Create,
    Update(u64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/detail/{}", id),
            Route::Create => "/create".to_string(),
            Route::Update(id) => format!("/update/{}", id),
        }
    }

    /// Parse a client path; unknown paths yield `None`
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_matches('/');
        let mut parts = trimmed.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some(""), None, None) => Some(Route::List),
            (Some("create"), None, None) => Some(Route::Create),
            (Some("detail"), Some(id), None) => id.parse().ok().map(Route::Detail),
            (Some("update"), Some(id), None) => id.parse().ok().map(Route::Update),
            _ => None,
        }
    }
}

/// Central application state holding the backend client
#[derive(Clone)]
pub struct AppState {
    pub api: HttpAnamnesisApi,
}

impl AppState {
    pub fn new(api: HttpAnamnesisApi) -> Self {
        Self { api }
    }

    /// Controller for the list view
    pub fn list_view(&self) -> ListState<HttpAnamnesisApi> {
        ListState::new(self.api.clone())
    }

    /// Controller for the detail view
    pub fn detail_view(&self) -> DetailState<HttpAnamnesisApi> {
        DetailState::new(self.api.clone())
    }

    /// Empty draft for the create view
    pub fn create_view(&self) -> FormState<HttpAnamnesisApi> {
        FormState::new(self.api.clone())
    }

    /// Draft of an existing form for the update view
    pub async fn update_view(
        &self,
        scope: &ViewScope,
        id: u64,
    ) -> Result<Option<FormState<HttpAnamnesisApi>>> {
        FormState::load(self.api.clone(), scope, id).await
    }
}

/// Application setup - called once on startup
pub fn setup(config: AppConfig) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("Backend: {}", config.base_url());

    let api = HttpAnamnesisApi::new(config)?;
    let state = AppState::new(api);

    tracing::info!("Application initialized successfully");

    Ok(state)
}
