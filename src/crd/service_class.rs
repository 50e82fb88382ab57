//! ServiceClass resource
//!
//! Service classes are published by brokers. Unlike brokers and instances the
//! payload sits at the top level of the object rather than under a spec.

use super::{object_meta, CatalogObject};
use crate::registry::KindId;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A class of service offered by a broker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceClass {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Broker offering this class
    #[serde(default)]
    pub broker_name: String,

    #[serde(default)]
    pub description: String,

    /// Whether instances of this class can be bound
    #[serde(default)]
    pub bindable: bool,

    /// Whether an instance may switch plans after provisioning
    #[serde(default)]
    pub plan_updatable: bool,

    #[serde(default)]
    pub plans: Vec<ServicePlan>,

    #[serde(default, rename = "externalID")]
    pub external_id: String,

    /// Broker supplied metadata, stored verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpha_tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alpha_requires: Vec<String>,
}

/// A plan (tier) of a service class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePlan {
    pub name: String,

    #[serde(default, rename = "externalID")]
    pub external_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub free: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_metadata: Option<serde_json::Value>,
}

impl ServiceClass {
    pub fn new(name: &str, broker_name: &str) -> Self {
        Self {
            metadata: object_meta(name, None),
            broker_name: broker_name.to_string(),
            ..Default::default()
        }
    }
}

impl CatalogObject for ServiceClass {
    const KIND: KindId = KindId::ServiceClass;

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
