//! Resource Versioner
//!
//! The resource version travels on the wire as a decimal string. Parsing and
//! formatting happen only in this module; everything else uses `u64`.
//! Version zero means no version is asserted.

use crate::codec::to_unstructured;
use crate::config::StorageConfig;
use crate::crd::CatalogObject;
use crate::domain::ports::RawWriterRef;
use crate::error::{Error, Result};
use crate::registry::{KindRegistry, ResourceKind, GROUP, VERSION};
use async_trait::async_trait;
use kube::core::TypeMeta;
use std::marker::PhantomData;
use tracing::error;

// =============================================================================
// Versioner Trait
// =============================================================================

/// Resource version access used by the generic storage layer
#[async_trait]
pub trait Versioner<K: CatalogObject>: Send + Sync {
    /// Stamp `resource_version` on the object and write it back
    async fn update_object(&self, obj: &mut K, resource_version: u64) -> Result<()>;

    /// Stamp `resource_version` on a list. Not supported.
    async fn update_list(&self, items: &mut Vec<K>, resource_version: u64) -> Result<()>;

    /// Resource version of a stored object
    fn object_resource_version(&self, obj: &K) -> Result<u64>;
}

fn format_version(resource_version: u64) -> String {
    resource_version.to_string()
}

fn parse_version(value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|source| Error::InvalidResourceVersion {
            value: value.to_string(),
            source,
        })
}

// =============================================================================
// CRD Versioner
// =============================================================================

/// Versioner writing through the raw custom resource REST path
pub struct CrdVersioner<K> {
    writer: RawWriterRef,
    kind: ResourceKind,
    config: StorageConfig,
    _object: PhantomData<fn() -> K>,
}

impl<K: CatalogObject> CrdVersioner<K> {
    pub fn new(
        writer: RawWriterRef,
        registry: &KindRegistry,
        config: &StorageConfig,
    ) -> Result<Self> {
        let kind = registry
            .get(K::KIND)
            .cloned()
            .ok_or_else(|| Error::Configuration(format!("kind {} is not registered", K::KIND)))?;
        Ok(Self {
            writer,
            kind,
            config: config.clone(),
            _object: PhantomData,
        })
    }

    fn object_path(&self, namespace: &str, name: &str) -> String {
        format!(
            "/apis/{}/{}/namespaces/{}/{}/{}",
            GROUP,
            VERSION,
            namespace,
            self.kind.url_segment(),
            name
        )
    }

    /// Encode the object, filling in type meta when the object lacks it
    fn encode(&self, obj: &K, name: &str) -> Result<Vec<u8>> {
        let mut wire = to_unstructured(obj)?;
        if wire.types.is_none() {
            wire.types = Some(TypeMeta {
                api_version: self.kind.api_version(),
                kind: self.kind.kind.to_string(),
            });
        }
        serde_json::to_vec(&wire).map_err(|source| Error::Encode {
            name: name.to_string(),
            source,
        })
    }
}

#[async_trait]
impl<K: CatalogObject> Versioner<K> for CrdVersioner<K> {
    /// The stamp is not rolled back when the write fails.
    async fn update_object(&self, obj: &mut K, resource_version: u64) -> Result<()> {
        obj.metadata_mut().resource_version = Some(format_version(resource_version));

        let name = match obj.name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                error!("getting name of the {} object", self.kind.kind);
                return Err(Error::MissingName);
            }
        };
        // objects read back from custom resources do not always carry a namespace
        let namespace = self
            .config
            .namespace_or_default(obj.namespace())
            .to_string();

        let body = self.encode(obj, &name).map_err(|e| {
            error!("encoding {} {} ({})", self.kind.kind, name, e);
            e
        })?;

        let path = self.object_path(&namespace, &name);
        self.writer.put(&path, body).await.map_err(|e| {
            error!("error updating object {} ({})", name, e);
            e
        })
    }

    async fn update_list(&self, _items: &mut Vec<K>, _resource_version: u64) -> Result<()> {
        Err(Error::not_implemented("UpdateList"))
    }

    fn object_resource_version(&self, obj: &K) -> Result<u64> {
        let value = obj
            .metadata()
            .resource_version
            .as_deref()
            .ok_or_else(|| Error::MissingResourceVersion {
                name: obj.name().unwrap_or_default().to_string(),
            })?;
        parse_version(value)
    }
}

// =============================================================================
// Update Preparation
// =============================================================================

/// Metadata about the stored copy, handed to update functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseMeta {
    /// Remaining time to live in seconds, zero if none
    pub ttl: i64,
    /// Version of the stored copy
    pub resource_version: u64,
}

/// Current stored state of an object
#[derive(Debug, Clone)]
pub struct ObjectState<K> {
    pub obj: K,
    pub meta: ResponseMeta,
}

/// Prepare one candidate for an optimistic update
///
/// Runs `user_update` on the current state to obtain a candidate and an
/// optional TTL. A candidate still carrying a resource version has it reset to
/// zero through [`Versioner::update_object`], since only the store may assign
/// versions. There is no retry on conflict here.
pub async fn update_state<K, V, F>(
    versioner: &V,
    state: ObjectState<K>,
    user_update: F,
) -> Result<(K, u64)>
where
    K: CatalogObject,
    V: Versioner<K> + ?Sized,
    F: FnOnce(K, &ResponseMeta) -> Result<(K, Option<u64>)>,
{
    let (mut candidate, ttl) = user_update(state.obj, &state.meta).map_err(|e| {
        error!("user update ({})", e);
        e
    })?;

    let version = versioner.object_resource_version(&candidate).map_err(|e| {
        error!("getting resource version ({})", e);
        e
    })?;
    if version != 0 {
        versioner.update_object(&mut candidate, 0).await?;
    }

    Ok((candidate, ttl.unwrap_or(0)))
}
