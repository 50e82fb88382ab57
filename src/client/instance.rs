//! Instance client
//!
//! Instances are registered namespaced. An instance without a namespace is
//! stored in the default namespace.

use super::{KindClient, KindCollection};
use crate::config::StorageConfig;
use crate::crd::{CatalogObject, Instance};
use crate::domain::ports::ResourceStoreRef;
use crate::error::{Error, Result};
use crate::registry::KindRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Client for service instances
pub struct InstanceClient {
    collection: KindCollection<Instance>,
}

impl InstanceClient {
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
impl KindClient<Instance> for InstanceClient {
    async fn list(&self, namespace: &str) -> Result<Vec<Instance>> {
        self.collection.list(namespace).await
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<Instance> {
        self.collection.get(name, namespace).await
    }

    async fn create(&self, instance: Instance) -> Result<Instance> {
        let ns = self.collection.namespace_for(instance.namespace()).to_string();
        info!("Creating instance {}/{}", ns, instance.name().unwrap_or_default());
        self.collection.create(instance).await.map_err(|e| {
            warn!("Failed to create instance in {}: {}", ns, e);
            e
        })
    }

    async fn update(&self, instance: Instance) -> Result<Instance> {
        let ns = self.collection.namespace_for(instance.namespace()).to_string();
        info!("Updating instance {}/{}", ns, instance.name().unwrap_or_default());
        self.collection.update(instance).await.map_err(|e| {
            warn!("Failed to update instance in {}: {}", ns, e);
            e
        })
    }

    async fn delete(&self, _name: &str) -> Result<()> {
        Err(Error::not_implemented("instance delete"))
    }
}
