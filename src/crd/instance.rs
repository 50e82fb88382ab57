//! Instance resource

use super::{object_meta, CatalogObject, Condition};
use crate::registry::KindId;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};

/// A provisioned instance of a service class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    #[serde(default)]
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: InstanceSpec,

    #[serde(default)]
    pub status: InstanceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceSpec {
    /// Name of the service class to provision
    pub service_class_name: String,

    /// Name of the plan within the service class
    pub plan_name: String,

    /// Opaque provisioning parameters passed to the broker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,

    /// Identifier of the instance as known to the broker
    #[serde(default, rename = "externalID")]
    pub external_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Set while the broker is processing an asynchronous operation
    #[serde(default)]
    pub async_op_in_progress: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_operation: Option<String>,

    #[serde(default, rename = "dashboardURL", skip_serializing_if = "Option::is_none")]
    pub dashboard_url: Option<String>,
}

impl Instance {
    pub fn new(name: &str, namespace: &str, service_class_name: &str, plan_name: &str) -> Self {
        Self {
            metadata: object_meta(name, Some(namespace)),
            spec: InstanceSpec {
                service_class_name: service_class_name.to_string(),
                plan_name: plan_name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl CatalogObject for Instance {
    const KIND: KindId = KindId::Instance;

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
