use super::status_types::Conditions;
use k8s_openapi::api::core::v1::ObjectReference;
use kube::{CustomResource, Resource, ResourceExt};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Label carrying the type of a Kamelet.
pub const KAMELET_TYPE_LABEL: &str = "camel.apache.org/kamelet.type";
/// Value of [`KAMELET_TYPE_LABEL`] for Kamelets producing events.
pub const KAMELET_TYPE_SOURCE: &str = "source";
/// Value of [`KAMELET_TYPE_LABEL`] for Kamelets consuming events.
pub const KAMELET_TYPE_SINK: &str = "sink";

/// A Kamelet is a reusable, parameterized connector template.
#[derive(CustomResource, Serialize, Deserialize, Default, Debug, Clone, JsonSchema)]
#[kube(
    kind = "Kamelet",
    group = "camel.apache.org",
    status = "KameletStatus",
    version = "v1alpha1",
    shortname = "kl",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct KameletSpec {
    /// Definition is the JSON-schema of the properties accepted by the Kamelet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<JsonSchemaProps>,
    /// Template is the Camel route the Kamelet expands to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    // deprecated in favour of template, still served by older catalogs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<Value>,
    /// Types of the data consumed and produced by the Kamelet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Value>,
    /// Maven or Camel dependencies required by the template.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
}

/// The subset of a JSON-schema used to declare Kamelet properties.
#[derive(Serialize, Deserialize, Default, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchemaProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, JsonSchemaProp>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonSchemaProp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
    #[serde(rename = "x-descriptors", default, skip_serializing_if = "Vec::is_empty")]
    pub x_descriptors: Vec<String>,
}

/// The observed state of a [`Kamelet`], owned by the Camel K operator.
#[derive(Serialize, Deserialize, Default, Debug, Clone, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KameletStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Ready or Error, empty until the operator reconciled the Kamelet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<KameletProperty>,
}

/// A property default as resolved by the operator.
#[derive(Serialize, Deserialize, Default, Debug, Clone, JsonSchema)]
pub struct KameletProperty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Kamelet {
    /// The value of the `camel.apache.org/kamelet.type` label.
    pub fn kamelet_type(&self) -> Option<&str> {
        self.labels().get(KAMELET_TYPE_LABEL).map(String::as_str)
    }

    pub fn is_event_source(&self) -> bool {
        self.kamelet_type() == Some(KAMELET_TYPE_SOURCE)
    }

    /// Property names the definition declares as required.
    pub fn required_properties(&self) -> &[String] {
        self.spec
            .definition
            .as_ref()
            .map(|definition| definition.required.as_slice())
            .unwrap_or_default()
    }

    pub fn phase(&self) -> Option<&str> {
        self.status.as_ref().and_then(|status| status.phase.as_deref())
    }

    /// A reference to this Kamelet suitable for an [`Endpoint`](super::Endpoint).
    pub fn reference(&self) -> ObjectReference {
        ObjectReference {
            kind: Some(Kamelet::kind(&()).into_owned()),
            api_version: Some(Kamelet::api_version(&()).into_owned()),
            name: self.metadata.name.clone(),
            namespace: self.metadata.namespace.clone(),
            ..Default::default()
        }
    }
}
