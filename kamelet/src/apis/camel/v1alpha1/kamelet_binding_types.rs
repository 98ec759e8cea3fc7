use super::{endpoint_types::Endpoint, status_types::Conditions};
use kube::{CustomResource, Resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// KameletBinding connects a Kamelet source to a sink, optionally through
/// intermediate steps. The operator materializes it as a Camel K integration.
#[derive(CustomResource, Serialize, Deserialize, Default, Debug, Clone, PartialEq, JsonSchema)]
#[kube(
    kind = "KameletBinding",
    group = "camel.apache.org",
    status = "KameletBindingStatus",
    version = "v1alpha1",
    shortname = "klb",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct KameletBindingSpec {
    /// Integration is an optional integration used to specify custom parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integration: Option<Value>,
    /// Source is the starting point of the integration defined by this binding.
    pub source: Endpoint,
    /// Sink is where data should ultimately be sent to.
    pub sink: Endpoint,
    /// Steps contains an optional list of intermediate steps that are executed between the
    /// Source and the Sink.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Endpoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_handler: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
}

/// Communicates the observed state of the [`KameletBinding`] (from the operator).
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KameletBindingStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// Creating, Ready or Error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    #[serde(default)]
    pub conditions: Conditions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

impl KameletBinding {
    /// A namespaced binding of `source` to `sink`.
    pub fn for_endpoints(name: &str, namespace: &str, source: Endpoint, sink: Endpoint) -> Self {
        let mut binding = KameletBinding::new(
            name,
            KameletBindingSpec {
                source,
                sink,
                ..Default::default()
            },
        );
        binding.metadata.namespace = Some(namespace.to_string());
        binding
    }

    /// `<kind>.<group>/<name>`, as printed by `kubectl -o name`.
    pub fn qualified_name(&self) -> String {
        format!(
            "{}.{}/{}",
            KameletBinding::kind(&()).to_lowercase(),
            KameletBinding::group(&()),
            self.metadata.name.as_deref().unwrap_or_default()
        )
    }

    /// Path of this binding on the API server, if it is named and namespaced.
    pub fn api_path(&self) -> Option<String> {
        let name = self.metadata.name.as_ref()?;
        let namespace = self.metadata.namespace.as_deref()?;
        let collection = <KameletBinding as Resource>::url_path(&(), Some(namespace));
        Some(format!("{collection}/{name}"))
    }
}
