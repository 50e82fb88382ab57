//! In-memory fakes of the host cluster ports, for tests

use crate::domain::ports::{DefinitionStore, RawWriter, ResourceStore};
use crate::error::{api_error, Error, Result};
use crate::registry::ResourceKind;
use async_trait::async_trait;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::DynamicObject;
use parking_lot::Mutex;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Definition Store
// =============================================================================

#[derive(Default)]
pub struct FakeDefinitionStore {
    installed: Mutex<BTreeSet<String>>,
    never_ready: Mutex<BTreeSet<String>>,
    failing_gets: Mutex<BTreeMap<String, u16>>,
    failing_creates: Mutex<BTreeMap<String, String>>,
    failing_create_calls: Mutex<usize>,
    gets: Mutex<Vec<String>>,
    creates: Mutex<Vec<String>>,
}

impl FakeDefinitionStore {
    pub fn preinstall(&self, name: &str) {
        self.installed.lock().insert(name.to_string());
    }

    /// The registration is accepted but never reported back
    pub fn never_ready(&self, name: &str) {
        self.never_ready.lock().insert(name.to_string());
    }

    pub fn fail_get(&self, name: &str, code: u16) {
        self.failing_gets.lock().insert(name.to_string(), code);
    }

    pub fn fail_create(&self, name: &str, message: &str) {
        self.failing_creates
            .lock()
            .insert(name.to_string(), message.to_string());
    }

    /// The first `n` create calls fail with `Error <call number>`
    pub fn fail_first_creates(&self, n: usize) {
        *self.failing_create_calls.lock() = n;
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.gets.lock().clone()
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.creates.lock().clone()
    }
}

#[async_trait]
impl DefinitionStore for FakeDefinitionStore {
    async fn get(&self, name: &str) -> Result<CustomResourceDefinition> {
        self.gets.lock().push(name.to_string());

        if let Some(code) = self.failing_gets.lock().get(name) {
            return Err(api_error(*code, "Forbidden", "access denied"));
        }
        let visible =
            self.installed.lock().contains(name) && !self.never_ready.lock().contains(name);
        if !visible {
            return Err(api_error(404, "NotFound", &format!("{} not found", name)));
        }
        Ok(CustomResourceDefinition {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn create(
        &self,
        definition: &CustomResourceDefinition,
    ) -> Result<CustomResourceDefinition> {
        let name = definition.metadata.name.clone().unwrap_or_default();
        let call = {
            let mut creates = self.creates.lock();
            creates.push(name.clone());
            creates.len()
        };

        if call <= *self.failing_create_calls.lock() {
            return Err(Error::Internal(format!("Error {}", call)));
        }
        if let Some(message) = self.failing_creates.lock().get(&name) {
            return Err(Error::Internal(message.clone()));
        }
        self.installed.lock().insert(name);
        Ok(definition.clone())
    }
}

// =============================================================================
// Resource Store
// =============================================================================

type ObjectKey = (String, String, String);

/// Object store assigning increasing resource versions
#[derive(Default)]
pub struct FakeResourceStore {
    objects: Mutex<BTreeMap<ObjectKey, DynamicObject>>,
    version: Mutex<u64>,
    calls: Mutex<Vec<String>>,
}

impl FakeResourceStore {
    /// Store an object as-is, bypassing the create path
    pub fn insert_raw(&self, kind: &ResourceKind, namespace: &str, obj: DynamicObject) {
        let name = obj.metadata.name.clone().unwrap_or_default();
        self.objects
            .lock()
            .insert(key(kind, namespace, &name), obj);
    }

    pub fn stored(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Option<DynamicObject> {
        self.objects.lock().get(&key(kind, namespace, name)).cloned()
    }

    /// Calls in the form `<op> <plural>/<namespace>[/<name>]`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn next_version(&self) -> String {
        let mut version = self.version.lock();
        *version += 1;
        version.to_string()
    }
}

fn key(kind: &ResourceKind, namespace: &str, name: &str) -> ObjectKey {
    (kind.plural.to_string(), namespace.to_string(), name.to_string())
}

fn not_found(kind: &ResourceKind, name: &str) -> Error {
    api_error(404, "NotFound", &format!("{} \"{}\" not found", kind.plural, name))
}

#[async_trait]
impl ResourceStore for FakeResourceStore {
    async fn list(&self, kind: &ResourceKind, namespace: &str) -> Result<Vec<DynamicObject>> {
        self.calls
            .lock()
            .push(format!("list {}/{}", kind.plural, namespace));
        Ok(self
            .objects
            .lock()
            .iter()
            .filter(|((plural, ns, _), _)| plural == kind.plural && ns == namespace)
            .map(|(_, obj)| obj.clone())
            .collect())
    }

    async fn get(&self, kind: &ResourceKind, namespace: &str, name: &str) -> Result<DynamicObject> {
        self.calls
            .lock()
            .push(format!("get {}/{}/{}", kind.plural, namespace, name));
        self.stored(kind, namespace, name)
            .ok_or_else(|| not_found(kind, name))
    }

    async fn create(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        let name = obj.metadata.name.clone().unwrap_or_default();
        self.calls
            .lock()
            .push(format!("create {}/{}/{}", kind.plural, namespace, name));

        let k = key(kind, namespace, &name);
        if self.objects.lock().contains_key(&k) {
            return Err(api_error(409, "AlreadyExists", &format!("{} already exists", name)));
        }
        let mut stored = obj.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.resource_version = Some(self.next_version());
        self.objects.lock().insert(k, stored.clone());
        Ok(stored)
    }

    async fn update(
        &self,
        kind: &ResourceKind,
        namespace: &str,
        obj: &DynamicObject,
    ) -> Result<DynamicObject> {
        let name = obj.metadata.name.clone().unwrap_or_default();
        self.calls
            .lock()
            .push(format!("update {}/{}/{}", kind.plural, namespace, name));

        let k = key(kind, namespace, &name);
        if !self.objects.lock().contains_key(&k) {
            return Err(not_found(kind, &name));
        }
        let mut stored = obj.clone();
        stored.metadata.namespace = Some(namespace.to_string());
        stored.metadata.resource_version = Some(self.next_version());
        self.objects.lock().insert(k, stored.clone());
        Ok(stored)
    }
}

// =============================================================================
// Raw Writer
// =============================================================================

#[derive(Default)]
pub struct FakeRawWriter {
    puts: Mutex<Vec<(String, serde_json::Value)>>,
    fail: bool,
}

impl FakeRawWriter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Recorded writes as (path, decoded body)
    pub fn puts(&self) -> Vec<(String, serde_json::Value)> {
        self.puts.lock().clone()
    }
}

#[async_trait]
impl RawWriter for FakeRawWriter {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<()> {
        if self.fail {
            return Err(api_error(409, "Conflict", "the object has been modified"));
        }
        let value = serde_json::from_slice(&body)
            .map_err(|e| Error::Internal(format!("bad body: {}", e)))?;
        self.puts.lock().push((path.to_string(), value));
        Ok(())
    }
}
