#![warn(clippy::all, clippy::pedantic)]

//! httpcheck - single-pass HTTP health check runner.
//!
//! Loads a set of named check definitions, runs every check once
//! concurrently, and reports each result to the configured sink. `dev`
//! reads the checks from a local file and logs results; `prod` reads them
//! from Consul and submits results to Sensu.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use httpcheck_core::{Dispatcher, Executor, Sink, check};
use tracing::error;

mod provider;
mod sinks;

use provider::{ConfigProvider, ConsulProvider, FileProvider};
use sinks::{LogSink, SensuSink};

#[derive(Debug, Parser)]
#[command(name = "httpcheck", version, about = "make check web projects")]
struct Cli {
    /// Logging level: info, warning, error, fatal, debug, panic
    #[arg(short, long, env = "HTTPCHECK_LOG_LEVEL", default_value = "warning")]
    log_level: String,

    /// dev: input from the config file, output to stdout. prod: input from
    /// Consul, output to Sensu
    #[arg(short, long, env = "HTTPCHECK_ENV", default_value = "dev")]
    env: Environment,

    /// ip-address override applied to every check
    #[arg(short, long, env = "HTTPCHECK_IP")]
    ip: Option<String>,

    /// Path to the check definitions file
    #[arg(short = 'f', long, env = "HTTPCHECK_CONFIG", default_value = "config.yaml")]
    config: String,

    /// Consul API host
    #[arg(
        short = 'c',
        long,
        env = "HTTPCHECK_CONSUL_API",
        default_value = "http://consul-api:8500"
    )]
    consul_api: String,

    /// Sensu API host
    #[arg(
        short = 's',
        long,
        env = "HTTPCHECK_SENSU_API",
        default_value = "http://sensu-api:4567"
    )]
    sensu_api: String,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Environment {
    Dev,
    Prod,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_with_level(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (provider, sink): (Box<dyn ConfigProvider>, Arc<dyn Sink>) = match cli.env {
        Environment::Dev => (Box::new(FileProvider::new(&cli.config)), Arc::new(LogSink)),
        Environment::Prod => (
            Box::new(ConsulProvider::new(&cli.consul_api)),
            Arc::new(SensuSink::new(&cli.sensu_api)),
        ),
    };

    // A provider or parse failure is fatal: there is nothing to run.
    let payload = provider.fetch().await?;
    let checks = check::from_yaml(&payload)?;

    let executor = Arc::new(Executor::new()?);
    let dispatcher = Dispatcher::new(executor, sink);
    dispatcher.run(&checks, cli.ip.as_deref()).await;

    Ok(())
}
