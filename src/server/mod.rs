//! HTTP surface of the allocator.
//!
//! A single route, `/allocate`, answers every method. Each request performs
//! exactly one allocation against the fleet configured at startup and replies
//! with the allocated game server's name and endpoints, or a bare 500.

use crate::allocation::{allocation_request, AllocationResult, Allocator, FleetTarget};
use crate::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<dyn Allocator>,
    pub target: Arc<FleetTarget>,
}

impl AppState {
    pub fn new(allocator: Arc<dyn Allocator>, target: FleetTarget) -> Self {
        Self {
            allocator,
            target: Arc::new(target),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", any(allocate))
        .with_state(state)
}

pub async fn serve(state: AppState, address: SocketAddr) -> Result<()> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(address).await.map_err(|e| {
        error!("Failed to bind HTTP server on {}: {}", address, e);
        e
    })?;

    info!("Listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn allocate(State(state): State<AppState>) -> Response {
    let target = &state.target;
    debug!("Allocating from fleet {}/{}", target.namespace, target.fleet);

    let allocation = match state
        .allocator
        .allocate(allocation_request(&target.fleet))
        .await
    {
        Ok(allocation) => allocation,
        Err(e) => {
            error!("failed to allocate: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let result = AllocationResult::from_allocation(&allocation);

    match json_response(&result) {
        Ok(response) => {
            debug!("Allocated {} from fleet {}", result.name, target.fleet);
            response
        }
        Err(e) => {
            // The game server is already allocated at this point; the name is
            // the only handle left for reclaiming it.
            error!(
                "failed to encode allocation {} from fleet {}: {}",
                result.name, target.fleet, e
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn json_response<T: Serialize>(body: &T) -> Result<Response> {
    let bytes = serde_json::to_vec(body)?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AllocatorError;
    use serde::Serializer;

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    #[test]
    fn test_json_response_sets_content_type() {
        let response = json_response(&serde_json::json!({ "name": "gs-1" })).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_json_response_surfaces_serialization_failure() {
        let err = json_response(&Unserializable).unwrap_err();

        assert!(matches!(err, AllocatorError::SerializationError(_)));
        assert!(err.to_string().contains("refusing to serialize"));
    }
}
