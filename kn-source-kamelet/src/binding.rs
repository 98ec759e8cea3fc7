//! Construction of KameletBindings and their create-or-update against the cluster.
use crate::client::KameletClient;
use crate::error::{Error, Result};
use crate::name::name_for;
use crate::properties::parse_properties;
use crate::sink::SinkOptions;
use crate::validate::verify_properties;
use kamelet::{Endpoint, KameletBinding};
use std::fmt;
use tracing::{debug, info};

/// Everything needed to bind a Kamelet source to a sink.
#[derive(Debug, Clone, Default)]
pub struct CreateBindingOptions {
    /// Binding name, derived from source and sink when unset.
    pub name: Option<String>,
    /// Name of the Kamelet used as source.
    pub source: String,
    pub source_properties: Vec<String>,
    pub sink: SinkOptions,
    pub sink_properties: Vec<String>,
}

/// Whether an upsert created a new binding or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

impl fmt::Display for Upsert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upsert::Created => f.write_str("created"),
            Upsert::Updated => f.write_str("updated"),
        }
    }
}

/// Build the binding described by `options` and create or update it in `namespace`.
///
/// Every check runs before the cluster is written to, so a failure leaves no
/// partial state behind.
pub async fn create_binding<C>(
    client: &C,
    namespace: &str,
    options: &CreateBindingOptions,
) -> Result<(KameletBinding, Upsert)>
where
    C: KameletClient + ?Sized,
{
    debug!(source = %options.source, %namespace, "fetching kamelet");
    let kamelet = client.get_kamelet(namespace, &options.source).await?;
    if !kamelet.is_event_source() {
        return Err(Error::NotEventSource(options.source.clone()));
    }

    let source = Endpoint::from(kamelet.reference())
        .with_properties(parse_properties(&options.source_properties));
    verify_properties(&kamelet, &source)?;

    let sink_ref = options.sink.resolve(namespace)?;
    debug!(
        kind = sink_ref.kind.as_deref().unwrap_or_default(),
        name = sink_ref.name.as_deref().unwrap_or_default(),
        "resolved sink"
    );
    let name = name_for(options.name.as_deref(), &options.source, &sink_ref);
    let sink = Endpoint::from(sink_ref).with_properties(parse_properties(&options.sink_properties));

    let binding = KameletBinding::for_endpoints(&name, namespace, source, sink);
    upsert_binding(client, namespace, binding).await
}

/// Create `binding`, or overwrite the existing binding of the same name.
///
/// The existing binding is not merged: its resource version is carried over and
/// everything else is replaced.
pub async fn upsert_binding<C>(
    client: &C,
    namespace: &str,
    mut binding: KameletBinding,
) -> Result<(KameletBinding, Upsert)>
where
    C: KameletClient + ?Sized,
{
    let name = binding.metadata.name.clone().unwrap_or_default();
    match client.create_binding(namespace, &binding).await {
        Ok(created) => {
            info!(%name, %namespace, "kamelet binding created");
            Ok((created, Upsert::Created))
        }
        Err(err) if err.is_already_exists() => {
            debug!(%name, "kamelet binding exists, updating");
            let existing = client.get_binding(namespace, &name).await?;
            binding.metadata.resource_version = existing.metadata.resource_version;
            let updated = client.replace_binding(namespace, &binding).await?;
            info!(%name, %namespace, "kamelet binding updated");
            Ok((updated, Upsert::Updated))
        }
        Err(err) => Err(err.into()),
    }
}
