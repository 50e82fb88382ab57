//! Domain Ports - Host cluster capabilities used by the storage adapter
//!
//! These traits define the boundaries between the storage logic and the host
//! API server. Errors from the host, not-found in particular, are returned
//! unchanged so callers can inspect them with [`crate::Error::is_not_found`].

use crate::error::Result;
use crate::registry::ResourceKind;
use async_trait::async_trait;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::DynamicObject;
use std::sync::Arc;

// =============================================================================
// Definition Store Port
// =============================================================================

/// Port for extension resource type registrations
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Fetch a registration by name
    async fn get(&self, name: &str) -> Result<CustomResourceDefinition>;

    /// Submit a new registration
    async fn create(
        &self,
        definition: &CustomResourceDefinition,
    ) -> Result<CustomResourceDefinition>;
}

// =============================================================================
// Resource Store Port
// =============================================================================

/// Port for object access, keyed by (kind, namespace)
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// List every object of a kind in a namespace
    async fn list(&self, kind: &ResourceKind, namespace: &str) -> Result<Vec<DynamicObject>>;

    /// Fetch one object by name
    async fn get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<DynamicObject>;

    /// Create an object
    async fn create(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject>;

    /// Replace an existing object
    async fn update(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject>;
}

// =============================================================================
// Raw Writer Port
// =============================================================================

/// Port for writes where the caller controls the wire encoding
#[async_trait]
pub trait RawWriter: Send + Sync {
    /// PUT an encoded body to an absolute API path
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<()>;
}

// =============================================================================
// Type Aliases for Arc'd Traits
// =============================================================================

pub type DefinitionStoreRef = Arc<dyn DefinitionStore>;
pub type ResourceStoreRef = Arc<dyn ResourceStore>;
pub type RawWriterRef = Arc<dyn RawWriter>;
