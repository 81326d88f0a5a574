//! HTTP server command.

use std::net::SocketAddr;
use storyscribe::{
    SharedWorkshop,
    api::{ApiState, create_router},
};
use tracing::info;

/// Serve the JSON API until the process is stopped.
pub async fn serve(
    workshop: SharedWorkshop,
    addr: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = ApiState::start(workshop).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Storyscribe API listening");
    println!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
