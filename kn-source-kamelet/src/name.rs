//! Derivation of binding names.
use k8s_openapi::api::core::v1::ObjectReference;

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn is_disallowed_start_end_char(c: char) -> bool {
    !(c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// The binding name: `name` when given, otherwise `<source>-to-<sinkKind>-<sinkName>`
/// normalized into a lowercase DNS label.
pub fn name_for(name: Option<&str>, source: &str, sink: &ObjectReference) -> String {
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    let generated = format!(
        "{}-to-{}-{}",
        source,
        sink.kind.as_deref().unwrap_or_default(),
        sink.name.as_deref().unwrap_or_default()
    );

    let base = generated.rsplit('/').next().unwrap_or_default();
    let base = base.split('.').next().unwrap_or_default();
    base.to_lowercase()
        .chars()
        .filter(|c| is_allowed_char(*c))
        .collect::<String>()
        .trim_matches(is_disallowed_start_end_char)
        .to_string()
}
