//! REST client for the anamnesis backend
//!
//! [`AnamnesisApi`] is the seam the controllers depend on;
//! [`HttpAnamnesisApi`] talks to the real backend over HTTP.

use super::models::{AnamnesisForm, Section, SectionsPatch};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::future::Future;

/// Operations offered by the anamnesis backend
pub trait AnamnesisApi: Send + Sync {
    /// `GET /anamnesis`
    fn list(&self) -> impl Future<Output = Result<Vec<AnamnesisForm>>> + Send;

    /// `GET /anamnesis/{id}`
    fn get(&self, id: u64) -> impl Future<Output = Result<AnamnesisForm>> + Send;

    /// `POST /anamnesis`
    fn create(&self, form: &AnamnesisForm) -> impl Future<Output = Result<AnamnesisForm>> + Send;

    /// `PUT /anamnesis/{id}`, replacing the whole document
    fn replace(&self, form: &AnamnesisForm)
        -> impl Future<Output = Result<AnamnesisForm>> + Send;

    /// `PATCH /anamnesis/{id}` with only the sections
    fn patch_sections(
        &self,
        id: u64,
        sections: &[Section],
    ) -> impl Future<Output = Result<AnamnesisForm>> + Send;

    /// `DELETE /anamnesis/{id}`
    fn delete(&self, id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// HTTP implementation of [`AnamnesisApi`]
#[derive(Clone)]
pub struct HttpAnamnesisApi {
    client: Client,
    config: AppConfig,
}

impl HttpAnamnesisApi {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("anamnesis-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Send a request and fail on any non-success status
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let url = response.url().to_string();
            tracing::warn!("Backend returned {} for {}", status, url);
            return Err(AppError::Status { status, url });
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl AnamnesisApi for HttpAnamnesisApi {
    async fn list(&self) -> Result<Vec<AnamnesisForm>> {
        tracing::debug!("Fetching anamnesis list");
        let forms: Vec<AnamnesisForm> = self
            .send_json(self.client.get(self.config.collection_url()))
            .await?;
        tracing::debug!("Fetched {} anamnesis forms", forms.len());
        Ok(forms)
    }

    async fn get(&self, id: u64) -> Result<AnamnesisForm> {
        tracing::debug!("Fetching anamnesis form {}", id);
        match self.send_json(self.client.get(self.config.item_url(id))).await {
            Err(AppError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND => {
                Err(AppError::FormNotFound(id))
            }
            other => other,
        }
    }

    async fn create(&self, form: &AnamnesisForm) -> Result<AnamnesisForm> {
        tracing::info!("Creating anamnesis form {}", form.id);
        self.send_json(self.client.post(self.config.collection_url()).json(form))
            .await
    }

    async fn replace(&self, form: &AnamnesisForm) -> Result<AnamnesisForm> {
        tracing::info!("Replacing anamnesis form {}", form.id);
        self.send_json(self.client.put(self.config.item_url(form.id)).json(form))
            .await
    }

    async fn patch_sections(&self, id: u64, sections: &[Section]) -> Result<AnamnesisForm> {
        tracing::info!("Patching sections of anamnesis form {}", id);
        let patch = SectionsPatch {
            sections: sections.to_vec(),
        };
        self.send_json(self.client.patch(self.config.item_url(id)).json(&patch))
            .await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        tracing::info!("Deleting anamnesis form {}", id);
        self.send(self.client.delete(self.config.item_url(id)))
            .await?;
        Ok(())
    }
}
