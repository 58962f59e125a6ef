//! In-memory repository for catalog sources and hosts.

use crate::host_catalog::{
    domain::{HostCatalogEntry, ModelId, Source, SourceId, SourceSetName},
    ports::{HostCatalogError, HostCatalogRepository, HostCatalogResult},
};
use crate::host_url::HostUrl;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Thread-safe in-memory host catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHostCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    sources: HashMap<SourceId, Source>,
    entries: Vec<HostCatalogEntry>,
}

impl InMemoryCatalogState {
    fn hosts_where(&self, predicate: impl Fn(&HostCatalogEntry) -> bool) -> Vec<HostUrl> {
        self.entries
            .iter()
            .filter(|entry| predicate(entry))
            .map(|entry| entry.host_url.clone())
            .collect()
    }
}

impl InMemoryHostCatalog {
    /// Creates an empty in-memory catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> HostCatalogResult<RwLockReadGuard<'_, InMemoryCatalogState>> {
        self.state
            .read()
            .map_err(|err| HostCatalogError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> HostCatalogResult<RwLockWriteGuard<'_, InMemoryCatalogState>> {
        self.state
            .write()
            .map_err(|err| HostCatalogError::persistence(std::io::Error::other(err.to_string())))
    }
}

#[async_trait]
impl HostCatalogRepository for InMemoryHostCatalog {
    async fn register_source(&self, source: &Source) -> HostCatalogResult<()> {
        let mut state = self.write()?;
        if state.sources.contains_key(&source.id()) {
            return Err(HostCatalogError::DuplicateSource(source.id()));
        }
        state.sources.insert(source.id(), source.clone());
        Ok(())
    }

    async fn attach_host(
        &self,
        source_id: SourceId,
        host_url: &HostUrl,
    ) -> HostCatalogResult<HostCatalogEntry> {
        let mut state = self.write()?;
        let source = state
            .sources
            .get(&source_id)
            .ok_or(HostCatalogError::SourceNotFound(source_id))?;
        let entry = HostCatalogEntry::for_source(source, host_url.clone());

        if !state.entries.contains(&entry) {
            state.entries.push(entry.clone());
        }
        Ok(entry)
    }

    async fn find_source(&self, source_id: SourceId) -> HostCatalogResult<Option<Source>> {
        let state = self.read()?;
        Ok(state.sources.get(&source_id).cloned())
    }

    async fn source_set_exists(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<bool> {
        let state = self.read()?;
        Ok(state
            .sources
            .values()
            .any(|source| source.model_id() == model_id && source.source_set() == source_set))
    }

    async fn hosts_for_model(&self, model_id: &ModelId) -> HostCatalogResult<Vec<HostUrl>> {
        let state = self.read()?;
        Ok(state.hosts_where(|entry| entry.model_id == *model_id))
    }

    async fn hosts_for_source_set(
        &self,
        model_id: &ModelId,
        source_set: &SourceSetName,
    ) -> HostCatalogResult<Vec<HostUrl>> {
        let state = self.read()?;
        Ok(state.hosts_where(|entry| {
            entry.model_id == *model_id && entry.source_set == *source_set
        }))
    }

    async fn hosts_for_source(
        &self,
        source_id: SourceId,
    ) -> HostCatalogResult<Option<Vec<HostUrl>>> {
        let state = self.read()?;
        if !state.sources.contains_key(&source_id) {
            return Ok(None);
        }
        Ok(Some(state.hosts_where(|entry| entry.source_id == source_id)))
    }

    async fn list_entries(&self) -> HostCatalogResult<Vec<HostCatalogEntry>> {
        let state = self.read()?;
        Ok(state.entries.clone())
    }
}
