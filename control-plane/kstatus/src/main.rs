use std::path::PathBuf;

use clap::Parser;
use envconfig::Envconfig;
use kube::Client;
use kstatus::config::StatusConfig;
use kstatus::output::{self, OutputFormat};
use kstatus::status::StatusRunner;
use kstatus::store::KubeObjectStore;
use kstatus::{init_tracing, manifest};
use tracing::info;

/// Report whether the resources in the given manifests are ready.
#[derive(Parser, Debug)]
#[command(name = "kstatus", version, about)]
struct Cli {
    /// Manifest files or directories to check
    #[arg(short = 'f', long = "filename", required = true, num_args = 1..)]
    filenames: Vec<PathBuf>,

    /// Namespace for resources that do not set one
    #[arg(short = 'n', long)]
    namespace: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum)]
    output: Option<OutputFormat>,

    /// Number of resources fetched at once
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = StatusConfig::init_from_env()?.with_overrides(
        cli.namespace,
        cli.concurrency,
        cli.output,
    );
    init_tracing(&cfg.log);

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    info!(?cfg, "Doing apply status");
    let resources = manifest::load_paths(&cli.filenames)?;

    let client = Client::try_default().await?;
    let store = KubeObjectStore::new(client, cfg.namespace.clone());
    let runner = StatusRunner::new(store).with_concurrency(cfg.concurrency);
    let (result, aggregate) = runner.run(resources).await;

    println!("{}", output::render(&result, cfg.output)?);

    if let Some(e) = aggregate {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
