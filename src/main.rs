use std::process::ExitCode;
use std::sync::Arc;

use coasters::{AdminGate, Config, Error, Server, Store};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Error> {
    // Refuse to start without an admin secret.
    let config = Config::from_env()?;
    info!(addr = %config.addr, "starting coasters");

    let server = Server::bind(&config.addr)?;
    let app = coasters::app(
        Arc::new(Store::new()),
        Arc::new(AdminGate::new(config.admin_password)),
    );

    server.serve(app).await
}
