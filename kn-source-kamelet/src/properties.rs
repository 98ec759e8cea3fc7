//! Parsing of `<key>=<value>` command line properties.
use kamelet::EndpointProperties;
use tracing::warn;

/// Split a property on its first `=`. The value may itself contain `=`.
pub fn parse_property(property: &str) -> Option<(&str, &str)> {
    property.split_once('=')
}

/// Collect properties into an endpoint property bag.
///
/// Entries without `=` are skipped with a warning. Later entries win over earlier
/// ones with the same key. Returns `None` when no property remains, so that no empty
/// `properties` object is sent to the cluster.
pub fn parse_properties<S: AsRef<str>>(properties: &[S]) -> Option<EndpointProperties> {
    let bag: EndpointProperties = properties
        .iter()
        .map(|property| property.as_ref())
        .filter_map(|property| {
            let parsed = parse_property(property);
            if parsed.is_none() {
                warn!(%property, "skipping property not in the form of \"<key>=<value>\"");
            }
            parsed
        })
        .collect();

    if bag.is_empty() {
        None
    } else {
        Some(bag)
    }
}
