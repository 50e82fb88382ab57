//! Custom resource definitions for catalog kinds

use crate::registry::{ResourceKind, GROUP, VERSION};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    CustomResourceDefinition, CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
    CustomResourceDefinitionVersion, CustomResourceValidation, JSONSchemaProps,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Category every catalog kind is listed under
pub const CATEGORY: &str = "servicecatalog";

/// Build the registration submitted for a kind
///
/// The schema accepts any payload. Every kind is registered as namespaced:
/// cluster-scoped catalog kinds are kept in the default namespace.
pub fn definition_for(kind: &ResourceKind) -> CustomResourceDefinition {
    let schema = JSONSchemaProps {
        type_: Some("object".to_string()),
        description: Some(kind.description.to_string()),
        x_kubernetes_preserve_unknown_fields: Some(true),
        ..Default::default()
    };

    CustomResourceDefinition {
        metadata: ObjectMeta {
            name: Some(kind.definition_name()),
            ..Default::default()
        },
        spec: CustomResourceDefinitionSpec {
            group: GROUP.to_string(),
            names: CustomResourceDefinitionNames {
                kind: kind.kind.to_string(),
                list_kind: Some(kind.list_kind.to_string()),
                plural: kind.plural.to_string(),
                singular: Some(kind.singular.to_string()),
                categories: Some(vec![CATEGORY.to_string()]),
                short_names: None,
            },
            scope: "Namespaced".to_string(),
            versions: vec![CustomResourceDefinitionVersion {
                name: VERSION.to_string(),
                served: true,
                storage: true,
                schema: Some(CustomResourceValidation {
                    open_api_v3_schema: Some(schema),
                }),
                ..Default::default()
            }],
            ..Default::default()
        },
        status: None,
    }
}
