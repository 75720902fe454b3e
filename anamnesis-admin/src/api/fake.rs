//! In-memory backend used by the controller unit tests

use super::client::AnamnesisApi;
use super::models::{AnamnesisForm, Section};
use crate::error::{AppError, Result};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request the fake backend received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Get(u64),
    Create(AnamnesisForm),
    Replace(AnamnesisForm),
    PatchSections(u64, Vec<Section>),
    Delete(u64),
}

#[derive(Default)]
struct Inner {
    forms: Vec<AnamnesisForm>,
    calls: Vec<Call>,
    failing: bool,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Inner>>,
}

impl FakeApi {
    pub fn with_forms(forms: Vec<AnamnesisForm>) -> Self {
        let api = Self::default();
        api.inner.lock().unwrap().forms = forms;
        api
    }

    /// Make every following request fail
    pub fn fail_requests(&self) {
        self.inner.lock().unwrap().failing = true;
    }

    /// Hold every following request for `delay` before answering
    pub fn delay_requests(&self, delay: Duration) {
        self.inner.lock().unwrap().delay = Some(delay);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn forms(&self) -> Vec<AnamnesisForm> {
        self.inner.lock().unwrap().forms.clone()
    }

    async fn wait(&self) {
        let delay = self.inner.lock().unwrap().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn record(&self, call: Call) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.failing {
            return Err(AppError::Generic("backend unavailable".into()));
        }
        Ok(())
    }
}

impl AnamnesisApi for FakeApi {
    async fn list(&self) -> Result<Vec<AnamnesisForm>> {
        self.wait().await;
        self.record(Call::List)?;
        Ok(self.forms())
    }

    async fn get(&self, id: u64) -> Result<AnamnesisForm> {
        self.wait().await;
        self.record(Call::Get(id))?;
        self.forms()
            .into_iter()
            .find(|form| form.id == id)
            .ok_or(AppError::FormNotFound(id))
    }

    async fn create(&self, form: &AnamnesisForm) -> Result<AnamnesisForm> {
        self.wait().await;
        self.record(Call::Create(form.clone()))?;
        self.inner.lock().unwrap().forms.push(form.clone());
        Ok(form.clone())
    }

    async fn replace(&self, form: &AnamnesisForm) -> Result<AnamnesisForm> {
        self.wait().await;
        self.record(Call::Replace(form.clone()))?;
        let mut inner = self.inner.lock().unwrap();
        let stored = inner
            .forms
            .iter_mut()
            .find(|stored| stored.id == form.id)
            .ok_or(AppError::FormNotFound(form.id))?;
        *stored = form.clone();
        Ok(form.clone())
    }

    async fn patch_sections(&self, id: u64, sections: &[Section]) -> Result<AnamnesisForm> {
        self.wait().await;
        self.record(Call::PatchSections(id, sections.to_vec()))?;
        let mut inner = self.inner.lock().unwrap();
        let stored = inner
            .forms
            .iter_mut()
            .find(|stored| stored.id == id)
            .ok_or(AppError::FormNotFound(id))?;
        stored.sections = sections.to_vec();
        Ok(stored.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.wait().await;
        self.record(Call::Delete(id))?;
        self.inner.lock().unwrap().forms.retain(|form| form.id != id);
        Ok(())
    }
}
