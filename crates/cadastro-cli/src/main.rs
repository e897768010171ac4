// SPDX-License-Identifier: AGPL-3.0-or-later
//! # cadastro CLI Entry Point
//!
//! Assembles subcommands and dispatches to handlers. This binary is the
//! composition root: every service is constructed exactly once here and
//! injected by `Arc` — no framework container, no global registries.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cadastro_api::{AppConfig, AppState};
use cadastro_core::Cep;
use cadastro_service::{AddressResolver, CustomerRegistry};
use cadastro_store::{
    init_pool, AddressStore, CustomerStore, InMemoryAddressStore, InMemoryCustomerStore,
    PgAddressStore, PgCustomerStore,
};
use cadastro_viacep::{CepLookup, ViaCepClient, ViaCepConfig};

/// Cadastro Stack CLI — customer registry toolchain.
///
/// Serves the customer registry API and performs ad-hoc postal-code
/// lookups against the ViaCEP directory.
#[derive(Parser, Debug)]
#[command(name = "cadastro", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the customer registry API server.
    Serve(ServeArgs),
    /// Resolve one CEP against the ViaCEP directory and print the address.
    Cep(CepArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Port to bind, overriding CADASTRO_PORT (default 8080).
    #[arg(long)]
    port: Option<u16>,
}

#[derive(clap::Args, Debug)]
struct CepArgs {
    /// Postal code, NNNNNNNN or NNNNN-NNN.
    code: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args).await,
        Commands::Cep(args) => lookup_cep(args).await,
    }
}

/// Construct the store backends: Postgres when `DATABASE_URL` is set,
/// in-memory otherwise.
async fn init_stores() -> anyhow::Result<(Arc<dyn AddressStore>, Arc<dyn CustomerStore>)> {
    Ok(match init_pool().await? {
        Some(pool) => (
            Arc::new(PgAddressStore::new(pool.clone())) as Arc<dyn AddressStore>,
            Arc::new(PgCustomerStore::new(pool)) as Arc<dyn CustomerStore>,
        ),
        None => (
            Arc::new(InMemoryAddressStore::new()) as Arc<dyn AddressStore>,
            Arc::new(InMemoryCustomerStore::new()) as Arc<dyn CustomerStore>,
        ),
    })
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.port = port;
    }

    let (addresses, customers) = init_stores().await?;
    let directory = Arc::new(ViaCepClient::new(ViaCepConfig::from_env())?);
    let resolver = AddressResolver::new(addresses, directory);
    let registry = Arc::new(CustomerRegistry::new(customers, resolver));

    let state = AppState::with_config(config.clone(), registry);
    let app = cadastro_api::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("cadastro-api listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

async fn lookup_cep(args: CepArgs) -> anyhow::Result<()> {
    let cep = Cep::parse(&args.code)?;
    let client = ViaCepClient::new(ViaCepConfig::from_env())?;
    let address = client.fetch(&cep).await?;
    println!("{}", serde_json::to_string_pretty(&address)?);
    Ok(())
}
