//! Service catalog resource types
//!
//! This module contains the typed domain objects persisted as custom resources:
//! - Broker: a service broker endpoint
//! - Instance: a provisioned service instance
//! - ServiceClass: a service offering advertised by a broker

pub mod broker;
pub mod instance;
pub mod service_class;

pub use broker::*;
pub use instance::*;
pub use service_class::*;

use crate::registry::KindId;
use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog Object Trait
// =============================================================================

/// A typed catalog object with standard object metadata and a type stamp
pub trait CatalogObject: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Registry entry describing where objects of this type are stored
    const KIND: KindId;

    fn metadata(&self) -> &ObjectMeta;

    fn metadata_mut(&mut self) -> &mut ObjectMeta;

    /// Overwrite the `apiVersion` and `kind` stamp
    fn set_type_meta(&mut self, api_version: String, kind: String);

    fn name(&self) -> Option<&str> {
        self.metadata().name.as_deref()
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}

// =============================================================================
// Conditions
// =============================================================================

/// Condition type shared by brokers and instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionType {
    Ready,
}

/// Condition status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// Observed condition of a broker or instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,

    pub status: ConditionStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub message: String,
}

impl Condition {
    /// A ready condition stamped with the current time
    pub fn ready(status: ConditionStatus, reason: &str, message: &str) -> Self {
        Self {
            type_: ConditionType::Ready,
            status,
            last_transition_time: Some(Utc::now()),
            reason: reason.to_string(),
            message: message.to_string(),
        }
    }
}

pub(crate) fn object_meta(name: &str, namespace: Option<&str>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: namespace.map(str::to_string),
        ..Default::default()
    }
}
