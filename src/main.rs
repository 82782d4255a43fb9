use anyhow::Context;
use clap::Parser;
use fleet_allocator::allocation::{FleetTarget, KubeAllocator};
use fleet_allocator::cli::Cli;
use fleet_allocator::k8s::K8sClient;
use fleet_allocator::server::{self, AppState};
use std::net::{Ipv4Addr, SocketAddr};
use std::process;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");

    info!("Starting fleet-allocator v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let source = cli
        .config_source()
        .context("Failed to determine Kubernetes config source")?;

    let client = K8sClient::from_source(&source)
        .await
        .context("Failed to connect to Kubernetes")?;

    let target = FleetTarget::new(cli.namespace, cli.fleet);
    info!(
        "Allocating from fleet {} in namespace {}",
        target.fleet, target.namespace
    );

    let allocator = KubeAllocator::new(&client, &target.namespace);
    let state = AppState::new(Arc::new(allocator), target);

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, cli.port));
    server::serve(state, address)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
