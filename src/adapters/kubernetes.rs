//! Kubernetes Adapter
//!
//! Implements the definition store, resource store and raw writer ports on
//! top of a `kube::Client`. Catalog objects are addressed dynamically through
//! an `ApiResource` derived from the kind registry.

use crate::domain::ports::{DefinitionStore, RawWriter, ResourceStore};
use crate::error::{Error, Result};
use crate::registry::ResourceKind;
use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::api::{Api, DynamicObject, ListParams, PostParams};
use kube::Client;
use tracing::{debug, trace};

/// Host cluster access through the Kubernetes API
#[derive(Clone)]
pub struct KubeHost {
    client: Client,
}

impl KubeHost {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the ambient kubeconfig or in-cluster configuration
    pub async fn try_default() -> Result<Self> {
        Ok(Self::new(Client::try_default().await?))
    }

    fn definitions(&self) -> Api<CustomResourceDefinition> {
        Api::all(self.client.clone())
    }

    fn objects(&self, kind: &ResourceKind, namespace: &str) -> Api<DynamicObject> {
        Api::namespaced_with(self.client.clone(), namespace, &kind.api_resource())
    }
}

#[async_trait]
impl DefinitionStore for KubeHost {
    async fn get(&self, name: &str) -> Result<CustomResourceDefinition> {
        Ok(self.definitions().get(name).await?)
    }

    async fn create(
        &self,
        definition: &CustomResourceDefinition,
    ) -> Result<CustomResourceDefinition> {
        Ok(self
            .definitions()
            .create(&PostParams::default(), definition)
            .await?)
    }
}

#[async_trait]
impl ResourceStore for KubeHost {
    async fn list(&self, kind: &ResourceKind, namespace: &str) -> Result<Vec<DynamicObject>> {
        let list = self
            .objects(kind, namespace)
            .list(&ListParams::default())
            .await?;
        debug!("Listed {} {} in {}", list.items.len(), kind.plural, namespace);
        Ok(list.items)
    }

    async fn get(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject> {
        Ok(self.objects(kind, namespace).get(name).await?)
    }

    async fn create(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        Ok(self
            .objects(kind, namespace)
            .create(&PostParams::default(), obj)
            .await?)
    }

    async fn update(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        let name = obj.metadata.name.as_deref().ok_or(Error::MissingName)?;
        Ok(self
            .objects(kind, namespace)
            .replace(name, &PostParams::default(), obj)
            .await?)
    }
}

#[async_trait]
impl RawWriter for KubeHost {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<()> {
        trace!("PUT {} ({} bytes)", path, body.len());
        let request = http::Request::put(path)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body)?;
        let _response: serde_json::Value = self.client.request(request).await?;
        Ok(())
    }
}
