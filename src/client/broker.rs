//! Broker client
//!
//! Brokers are registered cluster-scoped, so every broker is stored in the
//! default namespace and namespace arguments are ignored.

use super::{KindClient, KindCollection};
use crate::config::StorageConfig;
use crate::crd::{Broker, CatalogObject};
use crate::domain::ports::ResourceStoreRef;
use crate::error::{Error, Result};
use crate::registry::KindRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Client for brokers
pub struct BrokerClient {
    collection: KindCollection<Broker>,
}

impl BrokerClient {
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
impl KindClient<Broker> for BrokerClient {
    async fn list(&self, namespace: &str) -> Result<Vec<Broker>> {
        self.collection.list(namespace).await
    }

    async fn get(&self, name: &str, namespace: &str) -> Result<Broker> {
        self.collection.get(name, namespace).await
    }

    async fn create(&self, broker: Broker) -> Result<Broker> {
        info!("Creating broker {}", broker.name().unwrap_or_default());
        self.collection.create(broker).await.map_err(|e| {
            warn!("Failed to create broker: {}", e);
            e
        })
    }

    async fn update(&self, _broker: Broker) -> Result<Broker> {
        Err(Error::not_implemented("broker update"))
    }

    async fn delete(&self, _name: &str) -> Result<()> {
        Err(Error::not_implemented("broker delete"))
    }
}
