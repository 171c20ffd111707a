//! HTTP front for the planner.

mod routes;

pub use routes::{build_router, AppState, QueryResponse};

use crate::{core::TripPlanner, error::PlannerError};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(planner: TripPlanner, addr: SocketAddr) -> crate::Result<()> {
    let app = build_router(AppState::new(Arc::new(planner)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| PlannerError::Config(format!("failed to bind {addr}: {err}")))?;
    info!(%addr, "itinerary service listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| PlannerError::Unknown(format!("server stopped: {err}")))
}
