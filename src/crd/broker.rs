//! Broker resource
//!
//! A broker is an endpoint implementing the open service broker API. Brokers
//! are cluster-scoped in the catalog and stored in the default namespace.

use super::{object_meta, CatalogObject, Condition};
use crate::registry::KindId;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A service broker registered with the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: BrokerSpec,

    #[serde(default)]
    pub status: BrokerStatus,
}

/// Desired state of a broker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerSpec {
    /// Address of the broker API
    pub url: String,

    /// Secret holding the credentials used to talk to the broker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_secret: Option<SecretReference>,
}

/// Reference to a secret by name and namespace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretReference {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Observed state of a broker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Broker {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            metadata: object_meta(name, None),
            spec: BrokerSpec {
                url: url.to_string(),
                auth_secret: None,
            },
            ..Default::default()
        }
    }
}

impl CatalogObject for Broker {
    const KIND: KindId = KindId::Broker;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn set_type_meta(&mut self, api_version: String, kind: String) {
        self.api_version = api_version;
        self.kind = kind;
    }
}
