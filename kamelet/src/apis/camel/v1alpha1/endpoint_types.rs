use crate::error::Error;
use k8s_openapi::api::core::v1::ObjectReference;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Endpoint represents a source or sink of a [`KameletBinding`](super::KameletBinding).
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Ref can be used to declare a Kubernetes resource as source/sink endpoint.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<ObjectReference>,
    /// URI can be used to specify the (Camel) endpoint explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Properties are a key value representation of endpoint properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<EndpointProperties>,
    /// Types defines the data type of the data produced/consumed by the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<Value>,
}

impl From<ObjectReference> for Endpoint {
    fn from(reference: ObjectReference) -> Self {
        Endpoint {
            ref_: Some(reference),
            ..Default::default()
        }
    }
}

impl Endpoint {
    pub fn with_properties(self, properties: Option<EndpointProperties>) -> Self {
        Endpoint { properties, ..self }
    }

    /// The endpoint properties flattened into strings. Empty when no properties are set.
    pub fn property_map(&self) -> Result<BTreeMap<String, String>, Error> {
        match &self.properties {
            Some(properties) => properties.property_map(),
            None => Ok(BTreeMap::new()),
        }
    }
}

/// A flat key/value bag attached to an [`Endpoint`].
///
/// Values written by the plugin are always strings, but bindings created by other
/// clients may carry numbers or booleans, so the raw JSON value is kept.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, JsonSchema)]
#[serde(transparent)]
pub struct EndpointProperties(BTreeMap<String, Value>);

impl EndpointProperties {
    pub fn new() -> EndpointProperties {
        EndpointProperties(BTreeMap::new())
    }

    /// Insert a string property, replacing any previous value of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn property_map(&self) -> Result<BTreeMap<String, String>, Error> {
        self.0
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => String::new(),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(Error::NonScalarProperty(key.clone()))
                    }
                };
                Ok((key.clone(), value))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EndpointProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = EndpointProperties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}
