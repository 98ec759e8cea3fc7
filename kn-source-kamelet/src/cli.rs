//! Command line of the `kn-source-kamelet` plugin.
use crate::binding::{create_binding, CreateBindingOptions};
use crate::client::{KameletClient, KubeKameletClient};
use crate::error::Result;
use crate::list::kamelet_table;
use crate::output::{print_binding, print_serialized, BindingOutput, List, SerializeFormat};
use crate::sink::SinkOptions;
use crate::version::VersionInfo;
use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::io::Write;
use tracing::debug;

const BIND_EXAMPLES: &str = r#"Examples:
  # Bind Kamelets to a Knative sink
  kn-source-kamelet bind SOURCE --broker default

  # Add binding properties
  kn-source-kamelet bind SOURCE --sink|broker|channel|service=<name> --source-property=<key>=<value>"#;

const BINDING_CREATE_EXAMPLES: &str = r#"Examples:
  # Create Kamelet binding with source and sink.
  kn-source-kamelet binding create NAME --kamelet=timer-source --broker default

  # Add binding properties
  kn-source-kamelet binding create NAME --kamelet=name --sink|broker|channel|service=<name> --source-property=<key>=<value> --sink-property=<key>=<value>"#;

#[derive(Parser, Debug)]
#[command(
    name = "kn-source-kamelet",
    version,
    about = "Knative client plugin to list Kamelet sources and bind them to Knative sinks"
)]
pub struct Cli {
    /// Increase logging verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Filter directives for the logger: `-v` and `-vv` take precedence over `rust_log`,
    /// which in turn replaces the `warn` default.
    pub fn log_directives(&self, rust_log: Option<String>) -> String {
        match self.verbose {
            0 => rust_log
                .filter(|directives| !directives.trim().is_empty())
                .unwrap_or_else(|| "warn".into()),
            1 => "info".into(),
            _ => "debug".into(),
        }
    }

    /// Run the selected command against the cluster of the current kubeconfig context.
    pub async fn process(self) -> anyhow::Result<()> {
        let mut out = std::io::stdout();
        match self.command {
            Command::Version(opt) => opt.execute(&mut out)?,
            command => {
                let client = KubeKameletClient::infer()
                    .await
                    .context("unable to connect to the cluster")?;
                command.execute(&client, &mut out).await?;
            }
        }
        Ok(())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available Kamelet sources
    List(ListOpt),
    /// Create Kamelet bindings and bind source to Knative broker, channel or service
    Bind(BindOpt),
    /// Manage Kamelet bindings
    #[command(subcommand)]
    Binding(BindingCommand),
    /// Print the plugin version
    Version(VersionOpt),
}

impl Command {
    pub async fn execute<C, W>(self, client: &C, out: &mut W) -> Result<()>
    where
        C: KameletClient + ?Sized,
        W: Write,
    {
        match self {
            Command::List(opt) => opt.execute(client, out).await,
            Command::Bind(opt) => opt.execute(client, out).await,
            Command::Binding(BindingCommand::Create(opt)) => opt.execute(client, out).await,
            Command::Version(opt) => opt.execute(out),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum BindingCommand {
    /// Create Kamelet bindings and bind source to Knative broker, channel or service
    Create(BindingCreateOpt),
}

#[derive(Args, Debug, Default)]
pub struct NamespaceOpt {
    /// Namespace to use, defaults to the namespace of the current kubeconfig context
    #[arg(short, long)]
    pub namespace: Option<String>,
}

impl NamespaceOpt {
    fn resolve<C: KameletClient + ?Sized>(&self, client: &C) -> String {
        self.namespace
            .clone()
            .unwrap_or_else(|| client.default_namespace().to_string())
    }
}

/// Sink selectors, at most one may be given.
#[derive(Args, Debug, Default)]
pub struct SinkOpt {
    /// Sink expression to define the binding sink, e.g. broker:default or service:ns/name
    #[arg(long, value_name = "EXPRESSION", group = "sink_selector")]
    pub sink: Option<String>,
    /// Uses a broker as binding sink
    #[arg(long, value_name = "NAME", group = "sink_selector")]
    pub broker: Option<String>,
    /// Uses a channel as binding sink
    #[arg(long, value_name = "NAME", group = "sink_selector")]
    pub channel: Option<String>,
    /// Uses a Knative service as binding sink
    #[arg(long, value_name = "NAME", group = "sink_selector")]
    pub service: Option<String>,
}

impl From<SinkOpt> for SinkOptions {
    fn from(opt: SinkOpt) -> Self {
        let SinkOpt {
            sink,
            broker,
            channel,
            service,
        } = opt;
        SinkOptions {
            sink,
            broker,
            channel,
            service,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListOpt {
    #[command(flatten)]
    pub namespace: NamespaceOpt,
    /// Print the Kamelets as a structured document instead of a table
    #[arg(short, long, value_enum)]
    pub output: Option<SerializeFormat>,
    /// Do not print the header row
    #[arg(long)]
    pub no_headers: bool,
}

impl ListOpt {
    pub async fn execute<C, W>(self, client: &C, out: &mut W) -> Result<()>
    where
        C: KameletClient + ?Sized,
        W: Write,
    {
        let namespace = self.namespace.resolve(client);
        let kamelets = client.list_kamelets(&namespace).await?;
        debug!(count = kamelets.len(), %namespace, "listed kamelets");

        match self.output {
            Some(format) => print_serialized(out, &List::kamelets(&kamelets), format),
            None if kamelets.is_empty() => {
                writeln!(out, "No Kamelets found in namespace {namespace}.")?;
                Ok(())
            }
            None => {
                let table = kamelet_table(&kamelets, self.no_headers, chrono::Utc::now());
                writeln!(out, "{table}")?;
                Ok(())
            }
        }
    }
}

#[derive(Args, Debug)]
#[command(after_help = BIND_EXAMPLES)]
pub struct BindOpt {
    /// Name of the Kamelet source
    pub source: String,
    /// Binding name, derived from source and sink when omitted
    #[arg(long)]
    pub name: Option<String>,
    #[command(flatten)]
    pub namespace: NamespaceOpt,
    #[command(flatten)]
    pub sink: SinkOpt,
    /// Add a source property in the form of "<key>=<value>"
    #[arg(long = "source-property", value_name = "KEY=VALUE")]
    pub source_properties: Vec<String>,
    /// Print the resulting binding in the given format
    #[arg(short, long, value_enum)]
    pub output: Option<BindingOutput>,
}

impl BindOpt {
    pub async fn execute<C, W>(self, client: &C, out: &mut W) -> Result<()>
    where
        C: KameletClient + ?Sized,
        W: Write,
    {
        let namespace = self.namespace.resolve(client);
        let options = CreateBindingOptions {
            name: self.name,
            source: self.source,
            source_properties: self.source_properties,
            sink: self.sink.into(),
            sink_properties: vec![],
        };
        bind(client, out, &namespace, &options, self.output).await
    }
}

#[derive(Args, Debug)]
#[command(after_help = BINDING_CREATE_EXAMPLES)]
pub struct BindingCreateOpt {
    /// Name of the binding
    pub name: String,
    /// Name of the Kamelet source
    #[arg(long = "kamelet", value_name = "SOURCE")]
    pub source: String,
    #[command(flatten)]
    pub namespace: NamespaceOpt,
    #[command(flatten)]
    pub sink: SinkOpt,
    /// Add a source property in the form of "<key>=<value>"
    #[arg(long = "source-property", value_name = "KEY=VALUE")]
    pub source_properties: Vec<String>,
    /// Add a sink property in the form of "<key>=<value>"
    #[arg(long = "sink-property", value_name = "KEY=VALUE")]
    pub sink_properties: Vec<String>,
    /// Print the resulting binding in the given format
    #[arg(short, long, value_enum)]
    pub output: Option<BindingOutput>,
}

impl BindingCreateOpt {
    pub async fn execute<C, W>(self, client: &C, out: &mut W) -> Result<()>
    where
        C: KameletClient + ?Sized,
        W: Write,
    {
        let namespace = self.namespace.resolve(client);
        let options = CreateBindingOptions {
            name: Some(self.name),
            source: self.source,
            source_properties: self.source_properties,
            sink: self.sink.into(),
            sink_properties: self.sink_properties,
        };
        bind(client, out, &namespace, &options, self.output).await
    }
}

async fn bind<C, W>(
    client: &C,
    out: &mut W,
    namespace: &str,
    options: &CreateBindingOptions,
    output: Option<BindingOutput>,
) -> Result<()>
where
    C: KameletClient + ?Sized,
    W: Write,
{
    let (binding, upsert) = create_binding(client, namespace, options).await?;
    match output {
        Some(format) => print_binding(out, &binding, format, client.cluster_url()),
        None => {
            let name = binding.metadata.name.as_deref().unwrap_or_default();
            writeln!(out, "kamelet binding \"{name}\" {upsert}")?;
            Ok(())
        }
    }
}

#[derive(Args, Debug)]
pub struct VersionOpt {
    /// Print the version information as a structured document
    #[arg(short, long, value_enum)]
    pub output: Option<SerializeFormat>,
}

impl VersionOpt {
    pub fn execute<W: Write>(self, out: &mut W) -> Result<()> {
        let info = VersionInfo::current();
        match self.output {
            Some(format) => print_serialized(out, &info, format),
            None => {
                write!(out, "{info}")?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::binding::test::source_kamelet;
    use crate::client::memory::MemoryClient;
    use chrono::Utc;
    use clap::CommandFactory;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
    use kamelet::{Condition, ConditionStatus, KameletStatus, CONDITION_READY};

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("kn-source-kamelet").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    async fn run(client: &MemoryClient, args: &[&str]) -> Result<String> {
        let mut out = Vec::new();
        parse(args).execute(client, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn ready(name: &str) -> kamelet::Kamelet {
        let mut kamelet = source_kamelet(name, &[]);
        let conditions = [Condition {
            type_: CONDITION_READY.into(),
            status: ConditionStatus::True,
            ..Default::default()
        }]
        .into_iter()
        .collect();
        kamelet.metadata.creation_timestamp = Some(Time(Utc::now()));
        kamelet.status = Some(KameletStatus {
            phase: Some("Ready".into()),
            conditions,
            ..Default::default()
        });
        kamelet
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn verbosity_overrides_rust_log() {
        let cli = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("kn-source-kamelet").chain(args.iter().copied()))
                .unwrap()
        };
        let rust_log = || Some("kube=trace".to_string());

        assert_eq!(cli(&["list"]).log_directives(None), "warn");
        assert_eq!(cli(&["list"]).log_directives(Some(" ".into())), "warn");
        assert_eq!(cli(&["list"]).log_directives(rust_log()), "kube=trace");
        assert_eq!(cli(&["-v", "list"]).log_directives(rust_log()), "info");
        assert_eq!(cli(&["list", "-vv"]).log_directives(rust_log()), "debug");
    }

    #[test]
    fn bind_requires_exactly_one_source() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("kn-source-kamelet").chain(args.iter().copied()))
        };
        assert!(parse(&["bind"]).is_err());
        assert!(parse(&["bind", "a", "b"]).is_err());
        assert!(parse(&["bind", "a"]).is_ok());
    }

    #[test]
    fn sink_selectors_are_exclusive() {
        let result = Cli::try_parse_from([
            "kn-source-kamelet",
            "bind",
            "timer-source",
            "--broker",
            "default",
            "--service",
            "mysvc",
        ]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn binding_create_requires_kamelet() {
        let result = Cli::try_parse_from(["kn-source-kamelet", "binding", "create", "ticks"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_repeated_properties() {
        match parse(&[
            "binding",
            "create",
            "ticks",
            "--kamelet",
            "timer-source",
            "--source-property",
            "period=1000",
            "--source-property=message=hi",
            "--sink-property",
            "a=b",
            "-o",
            "yaml",
        ]) {
            Command::Binding(BindingCommand::Create(opt)) => {
                assert_eq!(opt.source_properties, ["period=1000", "message=hi"]);
                assert_eq!(opt.sink_properties, ["a=b"]);
                assert_eq!(opt.output, Some(BindingOutput::Yaml));
            }
            command => panic!("unexpected command {command:?}"),
        }
    }

    #[async_std::test]
    async fn lists_kamelets_in_fetch_order() {
        let client = MemoryClient::new()
            .with_kamelet(ready("k1"))
            .with_kamelet(ready("k2"))
            .with_kamelet(ready("k3"));
        let output = run(&client, &["list"]).await.unwrap();

        let lines: Vec<&str> = output.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 4);
        for column in ["NAME", "PHASE", "AGE", "CONDITIONS", "READY", "REASON"] {
            assert!(lines[0].contains(column));
        }
        for (line, name) in lines[1..].iter().zip(["k1", "k2", "k3"]) {
            assert!(line.contains(name) && line.contains("Ready") && line.contains("True"));
        }
    }

    #[async_std::test]
    async fn lists_nothing() {
        let output = run(&MemoryClient::new(), &["list", "-n", "empty"]).await.unwrap();
        assert_eq!(output, "No Kamelets found in namespace empty.\n");
    }

    #[async_std::test]
    async fn lists_as_json() {
        let client = MemoryClient::new().with_kamelet(ready("k1"));
        let output = run(&client, &["list", "-o", "json"]).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["items"].as_array().map(Vec::len), Some(1));
    }

    #[async_std::test]
    async fn bind_reports_created_then_updated() {
        let client = MemoryClient::new().with_kamelet(ready("timer-source"));
        let args = ["bind", "timer-source", "--service", "mysvc"];

        let output = run(&client, &args).await.unwrap();
        assert_eq!(output, "kamelet binding \"timer-source-to-service-mysvc\" created\n");

        let output = run(&client, &args).await.unwrap();
        assert_eq!(output, "kamelet binding \"timer-source-to-service-mysvc\" updated\n");
        assert_eq!(client.bindings().len(), 1);
    }

    #[async_std::test]
    async fn bind_prints_requested_format_instead_of_message() {
        let client = MemoryClient::new().with_kamelet(ready("timer-source"));
        let output = run(&client, &["bind", "timer-source", "--broker", "default", "-o", "name"])
            .await
            .unwrap();
        assert_eq!(output, "kameletbinding.camel.apache.org/timer-source-to-broker-default\n");
    }

    #[async_std::test]
    async fn binding_create_uses_positional_name() {
        let client = MemoryClient::new().with_kamelet(ready("timer-source"));
        let output = run(
            &client,
            &[
                "binding",
                "create",
                "ticks",
                "--kamelet",
                "timer-source",
                "--sink",
                "channel:events",
                "--sink-property",
                "ce.source=timer",
            ],
        )
        .await
        .unwrap();
        assert_eq!(output, "kamelet binding \"ticks\" created\n");
        let binding = &client.bindings()[0];
        assert_eq!(binding.spec.sink.property_map().unwrap()["ce.source"], "timer");
    }

    #[async_std::test]
    async fn bind_without_sink_fails() {
        let client = MemoryClient::new().with_kamelet(ready("timer-source"));
        let err = run(&client, &["bind", "timer-source"]).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn version_prints_metadata() {
        let mut out = Vec::new();
        VersionOpt { output: None }.execute(&mut out).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.starts_with(&format!("Version:      {}", env!("CARGO_PKG_VERSION"))));
        assert!(output.contains("Build Date:"));
        assert!(output.contains("Git Revision:"));
    }
}
