//! Admin API over the mock subject seed
//!
//! ```text
//! cargo run --example admin_api
//! curl 'http://127.0.0.1:3000/subjects?sort=name:asc&current=1&pageSize=2'
//! ```
//!
//! Reads `campus.yaml` from the working directory when present, then applies
//! `CAMPUS_*` environment overrides.

use campus::prelude::*;
use std::path::Path;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

const CONFIG_FILE: &str = "campus.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,campus=debug")),
        )
        .init();

    let config = if Path::new(CONFIG_FILE).exists() {
        AdminConfig::from_yaml_file(CONFIG_FILE)?
    } else {
        AdminConfig::default()
    }
    .with_env_overrides()?;

    println!("📚 Campus Admin API");
    println!("===================\n");
    println!("Listening on http://{}", config.server.addr());
    println!("  GET  /subjects?filters=[{{\"field\":\"department\",\"operator\":\"eq\",\"value\":\"math\"}}]");
    println!("  GET  /subjects?sort=name:asc&current=1&pageSize=2");
    println!("  POST /classes");
    println!("Banner uploads go to {} (preset '{}')\n", config.upload.url, config.upload.preset);

    ServerBuilder::new()
        .with_data_provider(MockDataProvider::new())
        .with_config(config)
        .with_cors(CorsLayer::permissive())
        .serve()
        .await
}
