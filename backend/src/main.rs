use anyhow::Result;
use clap::Parser;
use tracing::info;

use mess_admin::config::AppConfig;
use mess_admin::logging::init_logger;
use mess_admin::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::parse();
    init_logger(config.log_json);
    config.validate()?;

    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, config.allowed_origin.as_deref())?;

    let addr = config.bind_addr()?;
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
