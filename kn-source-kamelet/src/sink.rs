//! Resolution of sink expressions into object references.
use crate::error::{Error, Result};
use k8s_openapi::api::core::v1::ObjectReference;
use regex::Regex;
use std::sync::OnceLock;

/// Canonical kind and apiVersion of a short sink type name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkType {
    pub kind: &'static str,
    pub api_version: &'static str,
}

const SINK_TYPES: [(&str, SinkType); 3] = [
    (
        "broker",
        SinkType {
            kind: "Broker",
            api_version: "eventing.knative.dev/v1",
        },
    ),
    (
        "channel",
        SinkType {
            kind: "Channel",
            api_version: "messaging.knative.dev/v1",
        },
    ),
    (
        "service",
        SinkType {
            kind: "Service",
            api_version: "serving.knative.dev/v1",
        },
    ),
];

pub fn sink_type(name: &str) -> Option<SinkType> {
    SINK_TYPES
        .iter()
        .find(|(short, _)| *short == name)
        .map(|(_, sink_type)| *sink_type)
}

fn sink_expression() -> &'static Regex {
    static EXPRESSION: OnceLock<Regex> = OnceLock::new();
    EXPRESSION.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<apiVersion>(?:[a-z0-9.-]+/)?[a-z0-9.-]+):)?(?P<kind>[A-Za-z0-9.-]+):(?:(?P<namespace>[a-z0-9.-]+)/)?(?P<name>[a-z0-9.-]+)$",
        )
        .expect("sink expression is a valid regex")
    })
}

/// Parse `[apiVersion:]kind:[namespace/]name` into a reference to a supported sink.
///
/// The kind of the reference is always the canonical kind of the short type name, the
/// apiVersion is only filled in when the expression does not carry one.
pub fn decode_sink(sink: &str) -> Result<ObjectReference> {
    let captures = sink_expression()
        .captures(sink)
        .ok_or_else(|| Error::UnsupportedSinkExpression(sink.to_string()))?;
    let group = |name: &str| captures.name(name).map(|m| m.as_str().to_string());

    let kind = group("kind").unwrap_or_default();
    let sink_type = sink_type(&kind).ok_or(Error::UnsupportedSinkType(kind))?;

    Ok(ObjectReference {
        kind: Some(sink_type.kind.to_string()),
        api_version: group("apiVersion").or_else(|| Some(sink_type.api_version.to_string())),
        namespace: group("namespace"),
        name: group("name"),
        ..Default::default()
    })
}

/// The sink selectors of the command line, at most one is expected to be set.
#[derive(Debug, Clone, Default)]
pub struct SinkOptions {
    pub sink: Option<String>,
    pub broker: Option<String>,
    pub channel: Option<String>,
    pub service: Option<String>,
}

impl SinkOptions {
    /// The sink expression of the first selector set, in the order
    /// `--sink`, `--broker`, `--channel`, `--service`.
    pub fn expression(&self) -> Result<String> {
        let non_empty = |value: &Option<String>| {
            value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
        };
        non_empty(&self.sink)
            .or_else(|| non_empty(&self.broker).map(|name| format!("broker:{name}")))
            .or_else(|| non_empty(&self.channel).map(|name| format!("channel:{name}")))
            .or_else(|| non_empty(&self.service).map(|name| format!("service:{name}")))
            .ok_or(Error::MissingSink)
    }

    /// Resolve the selected sink, defaulting its namespace to `namespace`.
    pub fn resolve(&self, namespace: &str) -> Result<ObjectReference> {
        let mut reference = decode_sink(&self.expression()?)?;
        if reference.namespace.is_none() {
            reference.namespace = Some(namespace.to_string());
        }
        Ok(reference)
    }
}
