use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use roster_web::docroot::DocumentRoot;
use roster_web::store::FileRecordStore;
use roster_web::{Config, RosterApp, Server};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let subscriber = FmtSubscriber::builder().with_env_filter(config.env_filter()).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("can't install log subscriber: {e}");
        return ExitCode::FAILURE;
    }

    let docroot = match DocumentRoot::new(&config.root) {
        Ok(docroot) => docroot,
        Err(e) => {
            error!(root = %config.root.display(), cause = %e, "can't open document root");
            return ExitCode::FAILURE;
        }
    };
    let store = Arc::new(FileRecordStore::new(&config.store));
    info!(root = %config.root.display(), store = %config.store.display(), "serving roster");

    let server = match Server::builder()
        .address(config.address.as_str())
        .handler(RosterApp::new(docroot, store))
        .mode(config.mode)
        .limits(config.limits())
        .build()
    {
        Ok(server) => server,
        Err(e) => {
            error!(address = %config.address, cause = %e, "invalid server configuration");
            return ExitCode::FAILURE;
        }
    };

    match server.start().await {
        Ok(()) => {
            info!("server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(cause = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
