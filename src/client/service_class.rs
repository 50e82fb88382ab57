//! Service class client
//!
//! Service classes are registered cluster-scoped and stored in the default
//! namespace.

use super::{KindClient, KindCollection};
use crate::config::StorageConfig;
use crate::crd::{CatalogObject, ServiceClass};
use crate::domain::ports::ResourceStoreRef;
use crate::error::{Error, Result};
use crate::registry::KindRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Client for service classes
pub struct ServiceClassClient {
    collection: KindCollection<ServiceClass>,
}

impl ServiceClassClient {
    pub fn new(
        store: ResourceStoreRef,
        registry: Arc<KindRegistry>,
        config: &StorageConfig,
    ) -> Result<Self> {
        Ok(Self {
            collection: KindCollection::new(store, registry, config)?,
        })
    }
}

#[async_trait]
impl KindClient<ServiceClass> for ServiceClassClient {
    async fn list(&self, namespace: &str) -> Result<Vec<ServiceClass>> {
        self.collection.list(namespace).await.map_err(|e| {
            warn!("Failed to list service classes: {}", e);
            e
        })
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<ServiceClass> {
        self.collection.get(name, namespace).await
    }

    async fn create(&self, class: ServiceClass) -> Result<ServiceClass> {
        let name = class.name().unwrap_or_default().to_string();
        info!("Creating service class {}", name);
        self.collection.create(class).await.map_err(|e| {
            warn!("Failed to create service class {}: {}", name, e);
            e
        })
    }

    async fn update(&self, class: ServiceClass) -> Result<ServiceClass> {
        let name = class.name().unwrap_or_default().to_string();
        info!("Updating service class {}", name);
        self.collection.update(class).await.map_err(|e| {
            warn!("Failed to update service class {}: {}", name, e);
            e
        })
    }

    async fn delete(&self, _name: &str) -> Result<()> {
        Err(Error::not_implemented("service class delete"))
    }
}
