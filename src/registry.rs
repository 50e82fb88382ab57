//! Kind Registry
//!
//! Immutable table describing every service catalog kind that is persisted
//! as a custom resource: its kind name, list companion, plural resource name
//! (which doubles as the URL path segment) and scope.
//!
//! The registry is built once at startup and handed to every component that
//! needs kind metadata, usually behind an `Arc`.

use kube::core::{ApiResource, GroupVersionKind};
use serde::{Deserialize, Serialize};

/// API group every catalog kind is registered under
pub const GROUP: &str = "servicecatalog.k8s.io";

/// Version served for every catalog kind
pub const VERSION: &str = "v1alpha1";

// =============================================================================
// Kind Identifiers
// =============================================================================

/// Identifier of a catalog kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindId {
    Broker,
    Instance,
    ServiceClass,
    Binding,
}

impl std::fmt::Display for KindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KindId::Broker => write!(f, "broker"),
            KindId::Instance => write!(f, "instance"),
            KindId::ServiceClass => write!(f, "service-class"),
            KindId::Binding => write!(f, "binding"),
        }
    }
}

// =============================================================================
// Resource Kind
// =============================================================================

/// Descriptor of one catalog kind as stored in the host cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceKind {
    /// Registry key
    pub id: KindId,
    /// Kind name stamped on objects (e.g. `Broker`)
    pub kind: &'static str,
    /// Kind name of the list companion (e.g. `BrokerList`)
    pub list_kind: &'static str,
    /// Singular lowercase resource name
    pub singular: &'static str,
    /// Plural resource name
    pub plural: &'static str,
    /// Whether objects of this kind live in a namespace
    pub namespaced: bool,
    /// Human readable description submitted with the registration
    pub description: &'static str,
}

impl ResourceKind {
    /// Path segment used in REST URLs
    pub fn url_segment(&self) -> &'static str {
        self.plural
    }

    /// Name of the extension resource registration, `<plural>.<group>`
    pub fn definition_name(&self) -> String {
        format!("{}.{}", self.plural, GROUP)
    }

    /// `group/version` string stamped on objects
    pub fn api_version(&self) -> String {
        format!("{}/{}", GROUP, VERSION)
    }

    /// Dynamic API resource used to address this kind through kube
    pub fn api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(GROUP, VERSION, self.kind);
        ApiResource::from_gvk_with_plural(&gvk, self.plural)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Fixed set of catalog kinds
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: Vec<ResourceKind>,
}

impl KindRegistry {
    /// Build a registry from an explicit set of kinds
    pub fn new(kinds: Vec<ResourceKind>) -> Self {
        Self { kinds }
    }

    /// The service catalog kinds: brokers, instances, service classes and bindings
    pub fn service_catalog() -> Self {
        Self::new(vec![
            ResourceKind {
                id: KindId::Broker,
                kind: "Broker",
                list_kind: "BrokerList",
                singular: "broker",
                plural: "brokers",
                namespaced: false,
                description: "A service broker registered with the service catalog",
            },
            ResourceKind {
                id: KindId::Instance,
                kind: "Instance",
                list_kind: "InstanceList",
                singular: "instance",
                plural: "instances",
                namespaced: true,
                description: "A provisioned instance of a service class",
            },
            ResourceKind {
                id: KindId::ServiceClass,
                kind: "ServiceClass",
                list_kind: "ServiceClassList",
                singular: "serviceclass",
                plural: "serviceclasses",
                namespaced: false,
                description: "A class of service offered by a broker",
            },
            ResourceKind {
                id: KindId::Binding,
                kind: "Binding",
                list_kind: "BindingList",
                singular: "binding",
                plural: "bindings",
                namespaced: true,
                description: "Credentials binding an application to a service instance",
            },
        ])
    }

    /// Look up a kind. Every `KindId` is present in the service catalog registry.
    pub fn get(&self, id: KindId) -> Option<&ResourceKind> {
        self.kinds.iter().find(|k| k.id == id)
    }

    /// Iterate kinds in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ResourceKind> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::service_catalog()
    }
}
