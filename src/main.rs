//! Binary entry point for the Leave Balance Engine server.

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use leave_engine::api::{AppState, create_router};
use leave_engine::db::Database;
use leave_engine::policy::LeavePolicy;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let db_path = std::env::var("LEAVE_DB").unwrap_or_else(|_| "leave.db".to_string());
    let policy = match std::env::var("LEAVE_POLICY") {
        Ok(path) => {
            info!(path = %path, "Loading leave policy");
            LeavePolicy::from_file(&path)?
        }
        Err(_) => LeavePolicy::default(),
    };

    let db = Database::open(PathBuf::from(db_path))?;
    let state = AppState::new(db, policy);

    let addr = std::env::var("LEAVE_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Leave engine listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
