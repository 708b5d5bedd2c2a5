//! grpc-clientgen CLI entrypoint
//! Parses command-line arguments and dispatches to the client generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use grpc_clientgen::{
    application::{GenerateClientRequest, GenerateClientUseCase},
    core::{EnvCredentialSource, GeneratorConfig, RegistryBackend},
    infrastructure::{FileSystemOutputService, ProcessCommandExecutor, registry_for},
};
use std::path::PathBuf;
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "grpc-clientgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at DEBUG instead of INFO when RUST_LOG is not set
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate the publishable client package into <dir>/client
    Generate {
        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Print the version the next client package would be published under
    Version {
        #[command(flatten)]
        service: ServiceArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct ServiceArgs {
    /// Service directory named <prefix><service> (defaults to the current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// Config file (defaults to grpc-clientgen.toml in the service directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Backend used for the registry version lookup
    #[arg(long, value_enum)]
    pub registry_backend: Option<RegistryBackend>,
    /// Registry URL used for lookups and written as the publish target
    #[arg(long)]
    pub registry_url: Option<Url>,
    /// Timeout in seconds for the registry lookup
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Command run in the service directory before generation (e.g. "npm run proto:generate")
    #[arg(long)]
    pub proto_command: Option<String>,
}

impl ServiceArgs {
    fn service_dir(&self) -> anyhow::Result<PathBuf> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to get current directory")?,
        };
        dir.canonicalize()
            .with_context(|| format!("Failed to resolve service directory {}", dir.display()))
    }

    /// Defaults, then the config file, then these flags
    fn load_config(&self, service_dir: &std::path::Path) -> anyhow::Result<GeneratorConfig> {
        let mut config = GeneratorConfig::load(service_dir, self.config.as_deref())
            .context("Failed to load generator configuration")?;

        if let Some(backend) = self.registry_backend {
            config.registry_backend = backend;
        }
        if let Some(url) = &self.registry_url {
            config.registry_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.registry_timeout_secs = secs;
        }
        if let Some(command) = &self.proto_command {
            config.proto_command = Some(command.clone());
        }

        config
            .validate()
            .context("Invalid generator configuration")?;
        debug!(?config, "Effective configuration");
        Ok(config)
    }

    fn use_case(
        &self,
        service_dir: &std::path::Path,
        config: &GeneratorConfig,
    ) -> anyhow::Result<GenerateClientUseCase> {
        let executor = Arc::new(ProcessCommandExecutor::new());
        let registry = registry_for(config, executor.clone(), service_dir)
            .context("Failed to set up registry client")?;
        Ok(GenerateClientUseCase::new(
            Arc::new(EnvCredentialSource::new(config.token_env.clone())),
            registry,
            executor,
            Arc::new(FileSystemOutputService::new()),
        ))
    }
}

/// INFO (DEBUG with `--verbose`) unless `RUST_LOG` says otherwise
fn log_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the results
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate { service } => {
            let service_dir = service.service_dir()?;
            let config = service.load_config(&service_dir)?;
            let use_case = service.use_case(&service_dir, &config)?;

            info!(dir = %service_dir.display(), "Starting client generation");
            let response = use_case
                .execute(GenerateClientRequest::new(service_dir, config))
                .await
                .context("Failed to generate client package")?;

            println!(
                "Using version {} ({})",
                response.plan.version, response.plan.provenance
            );
            println!(
                "✅ Client package {}@{} generated in {}",
                response.plan.package_name,
                response.plan.version,
                response.output_path.display()
            );
            println!("To build and publish the client, run: npm run client:publish");
        }
        Commands::Version { service, json } => {
            let service_dir = service.service_dir()?;
            let config = service.load_config(&service_dir)?;
            let use_case = service.use_case(&service_dir, &config)?;

            let plan = use_case
                .plan(&GenerateClientRequest::new(service_dir, config))
                .await
                .context("Failed to resolve client version")?;

            if *json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&plan).context("Failed to serialize version")?
                );
            } else {
                println!("{} {} ({})", plan.package_name, plan.version, plan.provenance);
            }
        }
    }

    Ok(())
}
