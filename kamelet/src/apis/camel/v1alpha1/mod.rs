//! Types of the `camel.apache.org/v1alpha1` API group consumed by the Kamelet plugin.
mod endpoint_types;
mod kamelet_binding_types;
mod kamelet_types;
mod status_types;

pub use endpoint_types::{Endpoint, EndpointProperties};
pub use kamelet_binding_types::{KameletBinding, KameletBindingSpec, KameletBindingStatus};
pub use kamelet_types::{
    JsonSchemaProp, JsonSchemaProps, Kamelet, KameletProperty, KameletSpec, KameletStatus,
    KAMELET_TYPE_LABEL, KAMELET_TYPE_SINK, KAMELET_TYPE_SOURCE,
};
pub use status_types::{Condition, ConditionStatus, Conditions, CONDITION_READY};

pub const GROUP: &str = "camel.apache.org";
pub const VERSION: &str = "v1alpha1";
