use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use deploy_submit::config::{SettingsBuilder, SettingsOverrides};
use deploy_submit::executor::run;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "deploy-submit",
    version,
    about = "Submit a deployment config to the remote deployment service",
    disable_help_subcommand = true
)]
struct Cli {
    /// JSON document to submit (defaults to deploy-config.json)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Deployment endpoint receiving the POST
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Origin page fetched first to pick up session cookies
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// Bearer credential sent with both requests
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    /// Env file read for DEPLOY_* settings (defaults to ./.env when present)
    #[arg(short, long, value_name = "FILE")]
    env: Option<PathBuf>,

    /// Emit debug diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_dir = std::env::current_dir().context("resolving working directory")?;
    let settings = SettingsBuilder::new(
        base_dir,
        SettingsOverrides {
            config_path: cli.config,
            endpoint: cli.endpoint,
            origin: cli.origin,
            token: cli.token,
            env_file: cli.env,
        },
    )
    .build()
    .context("resolving settings")?;

    run(&settings).await?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,deploy_submit=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
