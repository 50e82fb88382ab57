//! Kind Clients
//!
//! Typed CRUD access to the custom resource collection of each catalog kind.
//! All clients share one [`ResourceStore`](crate::domain::ResourceStore).
//!
//! The namespace an object is stored in follows the scope recorded in the
//! [`KindRegistry`]. Namespaced kinds use the requested namespace, falling back
//! to the configured default when it is empty. Cluster-scoped kinds are always
//! stored in the default namespace and namespace arguments are ignored.
//!
//! `create` and `update` hand back the object the caller passed in, stamped
//! with its kind and API version, rather than the copy confirmed by the host.
//! Server assigned fields such as the resource version are therefore not
//! reflected in the returned object.

pub mod broker;
pub mod instance;
pub mod service_class;

pub use broker::BrokerClient;
pub use instance::InstanceClient;
pub use service_class::ServiceClassClient;

use crate::codec::{from_unstructured, stamp_type_meta, to_unstructured};
use crate::config::StorageConfig;
use crate::crd::CatalogObject;
use crate::domain::ports::ResourceStoreRef;
use crate::error::{Error, Result};
use crate::registry::{KindRegistry, ResourceKind};
use async_trait::async_trait;
use kube::api::DynamicObject;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// Kind Client Trait
// =============================================================================

/// CRUD operations over one catalog kind
#[async_trait]
pub trait KindClient<T: CatalogObject>: Send + Sync {
    /// List every object in a namespace
    ///
    /// A single item that fails to convert fails the whole call.
    async fn list(&self, namespace: &str) -> Result<Vec<T>>;

    /// Fetch one object. Not-found from the host is returned unchanged.
    async fn get(&self, name: &str, namespace: &str) -> Result<T>;

    async fn create(&self, obj: T) -> Result<T>;

    async fn update(&self, obj: T) -> Result<T>;

    async fn delete(&self, name: &str) -> Result<()>;
}

// =============================================================================
// Kind Collection
// =============================================================================

/// Conversion and store access shared by the kind clients
pub(crate) struct KindCollection<T> {
    store: ResourceStoreRef,
    registry: Arc<KindRegistry>,
    kind: ResourceKind,
    default_namespace: String,
    _object: PhantomData<fn() -> T>,
}

impl<T: CatalogObject> KindCollection<T> {
    pub(crate) fn new(
        store: ResourceStoreRef,
        registry: Arc<KindRegistry>,
        config: &StorageConfig,
    ) -> Result<Self> {
        let kind = registry
            .get(T::KIND)
            .cloned()
            .ok_or_else(|| Error::Configuration(format!("kind {} is not registered", T::KIND)))?;
        Ok(Self {
            store,
            registry,
            kind,
            default_namespace: config.default_namespace.clone(),
            _object: PhantomData,
        })
    }

    /// Namespace objects of this kind are stored in
    pub(crate) fn namespace_for<'a>(&'a self, namespace: Option<&'a str>) -> &'a str {
        match namespace {
            Some(ns) if self.kind.namespaced && !ns.is_empty() => ns,
            _ => &self.default_namespace,
        }
    }

    pub(crate) async fn list(&self, namespace: &str) -> Result<Vec<T>> {
        let ns = self.namespace_for(Some(namespace));
        self.store
            .list(&self.kind, ns)
            .await?
            .into_iter()
            .map(from_unstructured)
            .collect()
    }

    pub(crate) async fn get(&self, name: &str, namespace: &str) -> Result<T> {
        let ns = self.namespace_for(Some(namespace));
        debug!("Getting {} {}/{}", self.kind.kind, ns, name);
        let obj = self.store.get(&self.kind, ns, name).await?;
        from_unstructured(obj)
    }

    pub(crate) async fn create(&self, mut obj: T) -> Result<T> {
        let ns = self.namespace_for(obj.namespace()).to_string();
        let wire = self.prepare(&mut obj)?;
        self.store.create(&self.kind, &ns, &wire).await?;
        Ok(obj)
    }

    pub(crate) async fn update(&self, mut obj: T) -> Result<T> {
        let ns = self.namespace_for(obj.namespace()).to_string();
        let wire = self.prepare(&mut obj)?;
        self.store.update(&self.kind, &ns, &wire).await?;
        Ok(obj)
    }

    /// Stamp the object and build its wire form with an explicit name
    fn prepare(&self, obj: &mut T) -> Result<DynamicObject> {
        stamp_type_meta(obj, &self.registry)?;
        let name = match obj.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(Error::MissingName),
        };
        let mut wire = to_unstructured(obj)?;
        wire.metadata.name = Some(name);
        Ok(wire)
    }
}

// =============================================================================
// Client Bundle
// =============================================================================

/// One client per catalog kind over a shared store
pub struct CatalogClients {
    pub brokers: BrokerClient,
    pub instances: InstanceClient,
    pub service_classes: ServiceClassClient,
}

impl CatalogClients {
    pub fn new(
        store: ResourceStoreRef,
        registry: Arc<KindRegistry>,
        config: &StorageConfig,
    ) -> Result<Self> {
        Ok(Self {
            brokers: BrokerClient::new(store.clone(), registry.clone(), config)?,
            instances: InstanceClient::new(store.clone(), registry.clone(), config)?,
            service_classes: ServiceClassClient::new(store, registry, config)?,
        })
    }
}
