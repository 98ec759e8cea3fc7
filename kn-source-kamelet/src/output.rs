//! Printing of command results in the formats selected with `--output`.
use crate::error::Result;
use clap::ValueEnum;
use kamelet::{Kamelet, KameletBinding};
use serde::Serialize;
use std::io::Write;
use url::Url;

/// Structured formats for any serializable result.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeFormat {
    Json,
    Yaml,
}

/// Formats accepted by `bind` and `binding create`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingOutput {
    Json,
    Yaml,
    /// `kameletbinding.camel.apache.org/<name>`
    Name,
    /// URL of the binding on the API server
    Url,
}

pub fn print_serialized<T, W>(out: &mut W, value: &T, format: SerializeFormat) -> Result<()>
where
    T: Serialize,
    W: Write,
{
    match format {
        SerializeFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(value)?)?,
        SerializeFormat::Yaml => write!(out, "{}", serde_yaml::to_string(value)?)?,
    }
    Ok(())
}

pub fn print_binding<W: Write>(
    out: &mut W,
    binding: &KameletBinding,
    format: BindingOutput,
    cluster_url: &Url,
) -> Result<()> {
    match format {
        BindingOutput::Json => print_serialized(out, binding, SerializeFormat::Json)?,
        BindingOutput::Yaml => print_serialized(out, binding, SerializeFormat::Yaml)?,
        BindingOutput::Name => writeln!(out, "{}", binding.qualified_name())?,
        BindingOutput::Url => {
            let path = binding.api_path().unwrap_or_default();
            writeln!(out, "{}", cluster_url.join(&path)?)?
        }
    }
    Ok(())
}

/// A `v1/List` wrapper, the shape kubectl prints for collections.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct List<'a, T> {
    api_version: &'static str,
    kind: &'static str,
    items: &'a [T],
}

impl<'a> List<'a, Kamelet> {
    pub fn kamelets(items: &'a [Kamelet]) -> Self {
        List {
            api_version: "v1",
            kind: "List",
            items,
        }
    }
}
