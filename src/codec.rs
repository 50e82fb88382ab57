//! Object Codec
//!
//! Converts typed catalog objects to and from the schema-less
//! [`DynamicObject`] form stored in the host cluster.

use crate::crd::CatalogObject;
use crate::error::{Error, Result};
use crate::registry::KindRegistry;
use kube::api::DynamicObject;
use tracing::warn;

/// Stamp the authoritative `kind` and `apiVersion` onto an object
pub fn stamp_type_meta<T: CatalogObject>(obj: &mut T, registry: &KindRegistry) -> Result<()> {
    let kind = registry
        .get(T::KIND)
        .ok_or_else(|| Error::Configuration(format!("kind {} is not registered", T::KIND)))?;
    obj.set_type_meta(kind.api_version(), kind.kind.to_string());
    Ok(())
}

/// Convert a typed object into its unstructured twin
pub fn to_unstructured<T: CatalogObject>(obj: &T) -> Result<DynamicObject> {
    serde_json::to_value(obj)
        .and_then(serde_json::from_value)
        .map_err(|source| {
            warn!(kind = %T::KIND, name = ?obj.name(), "Failed to convert object: {}", source);
            Error::Conversion {
                kind: T::KIND,
                source,
            }
        })
}

/// Convert an unstructured object into a typed one
pub fn from_unstructured<T: CatalogObject>(obj: DynamicObject) -> Result<T> {
    serde_json::to_value(obj)
        .and_then(serde_json::from_value)
        .map_err(|source| {
            warn!(kind = %T::KIND, "Failed to convert object: {}", source);
            Error::Conversion {
                kind: T::KIND,
                source,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crd::{
        Broker, Condition, ConditionStatus, Instance, SecretReference, ServiceClass, ServicePlan,
    };
    use assert_matches::assert_matches;
    use serde_json::json;

    fn stamped<T: CatalogObject>(mut obj: T) -> T {
        stamp_type_meta(&mut obj, &KindRegistry::service_catalog()).unwrap();
        obj
    }

    #[test]
    fn test_stamp_type_meta() {
        let broker = stamped(Broker::new("b1", "http://b1"));
        assert_eq!(broker.kind, "Broker");
        assert_eq!(broker.api_version, "servicecatalog.k8s.io/v1alpha1");

        let class = stamped(ServiceClass::new("c1", "b1"));
        assert_eq!(class.kind, "ServiceClass");
    }

    #[test]
    fn test_stamp_unregistered_kind() {
        let registry = KindRegistry::new(vec![]);
        let mut broker = Broker::new("b1", "http://b1");
        assert_matches!(
            stamp_type_meta(&mut broker, &registry),
            Err(Error::Configuration(_))
        );
    }

    #[test]
    fn test_to_unstructured_carries_identity() {
        let mut instance = stamped(Instance::new("db-1", "team-a", "postgres", "small"));
        instance.metadata.resource_version = Some("7".into());

        let obj = to_unstructured(&instance).unwrap();
        let types = obj.types.as_ref().unwrap();
        assert_eq!(types.kind, "Instance");
        assert_eq!(types.api_version, "servicecatalog.k8s.io/v1alpha1");
        assert_eq!(obj.metadata.name.as_deref(), Some("db-1"));
        assert_eq!(obj.metadata.namespace.as_deref(), Some("team-a"));
        assert_eq!(obj.metadata.resource_version.as_deref(), Some("7"));
        assert_eq!(obj.data["spec"]["planName"], "small");
    }

    #[test]
    fn test_round_trip_broker() {
        let mut broker = stamped(Broker::new("ups-broker", "http://ups"));
        broker.spec.auth_secret = Some(SecretReference {
            name: "creds".into(),
            namespace: None,
        });
        broker.status.conditions.push(Condition::ready(
            ConditionStatus::True,
            "FetchedCatalog",
            "Successfully fetched catalog from broker",
        ));

        let back: Broker = from_unstructured(to_unstructured(&broker).unwrap()).unwrap();
        assert_eq!(back, broker);
    }

    #[test]
    fn test_round_trip_instance() {
        let mut instance = stamped(Instance::new("db-1", "team-a", "postgres", "small"));
        instance.spec.parameters = Some(json!({"storage": "10Gi", "replicas": 2}));
        instance.status.async_op_in_progress = true;
        instance.status.last_operation = Some("provision-42".into());

        let back: Instance = from_unstructured(to_unstructured(&instance).unwrap()).unwrap();
        assert_eq!(back, instance);
    }

    #[test]
    fn test_round_trip_service_class() {
        let mut class = stamped(ServiceClass::new("postgres", "ups-broker"));
        class.bindable = true;
        class.external_metadata = Some(json!({"displayName": "PostgreSQL"}));
        class.alpha_tags = vec!["sql".into()];
        class.plans = vec![ServicePlan {
            name: "small".into(),
            external_id: "p-1".into(),
            description: Some("1 vCPU".into()),
            free: false,
            external_metadata: None,
        }];

        let back: ServiceClass = from_unstructured(to_unstructured(&class).unwrap()).unwrap();
        assert_eq!(back, class);
    }

    #[test]
    fn test_from_unstructured_rejects_bad_payload() {
        let obj: DynamicObject = serde_json::from_value(json!({
            "apiVersion": "servicecatalog.k8s.io/v1alpha1",
            "kind": "Broker",
            "metadata": {"name": "b1"},
            "spec": {"url": 42}
        }))
        .unwrap();

        let res: Result<Broker> = from_unstructured(obj);
        assert_matches!(res, Err(Error::Conversion { kind: crate::registry::KindId::Broker, .. }));
    }
}
