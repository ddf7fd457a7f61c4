//! `typebind` binary
//!
//! Binds one type declaration into a project through the HTTP API and
//! prints the resulting request state as JSON.
//!
//! ```text
//! typebind --project abc123 --expr "type Maybe a = Just a | Nothing"
//! typebind --project abc123 --file maybe.type --api-url http://localhost:8999
//! ```

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use typebind_add_type::{
    AddTypeController, AddTypeState, ClientConfig, HttpBindTypeClient, ProjectHash,
};

/// Bind a type declaration into a project
#[derive(Debug, Parser)]
#[command(name = "typebind", version, about)]
struct Cli {
    /// Hash of the project to bind into
    #[arg(long)]
    project: String,

    /// Type declaration source
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    expr: Option<String>,

    /// Read the type declaration from a file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Override the API base URL (defaults to $TYPEBIND_API_URL)
    #[arg(long)]
    api_url: Option<String>,
}

impl Cli {
    /// Type declaration to submit, from `--expr` or the `--file` contents.
    fn code(&self) -> anyhow::Result<String> {
        match (&self.expr, &self.file) {
            (Some(expr), _) => Ok(expr.clone()),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display())),
            (None, None) => anyhow::bail!("either --expr or --file is required"),
        }
    }

    /// Apply `--api-url` on top of the environment configuration.
    fn client_config(&self, config: ClientConfig) -> ClientConfig {
        match &self.api_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }
}

/// Process exit status for a final request state.
fn exit_status(state: &AddTypeState) -> u8 {
    u8::from(state.is_failed())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "typebind=info,typebind_add_type=info,typebind_runtime=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let code = cli.code()?;

    let env_config = ClientConfig::from_env().context("loading client configuration")?;
    let config = cli.client_config(env_config);
    let client = HttpBindTypeClient::new(&config).context("building bind-type client")?;
    info!(endpoint = client.endpoint(), "client ready");

    let controller = AddTypeController::new(
        ProjectHash::new(cli.project),
        code,
        Arc::new(client),
        |project, hashes| {
            info!(
                project = %project.hash,
                bindings = project.bindings.len(),
                generated = ?hashes,
                "project updated"
            );
        },
    );

    controller.trigger().await;
    let state = controller.state().await;

    println!("{}", serde_json::to_string_pretty(&state)?);

    Ok(ExitCode::from(exit_status(&state)))
}
