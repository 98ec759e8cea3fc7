use clap::Parser;
use kn_source_kamelet::cli::Cli;
use kn_source_kamelet::Error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::new(cli.log_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.process().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<Error>() {
                Some(err) if err.is_invalid_argument() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
