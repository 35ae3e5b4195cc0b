//! HTTP routes.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::Serialize;
use serde_json::{Value, json};

use veil_auth::{AuthLayer, Identity};
use veil_core::{ClassName, Error, ObjectId, RedactedObject};

use crate::error::Result;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Response from a find.
#[derive(Debug, Serialize)]
pub struct FindResponse {
    /// Visible objects, redacted, in ID order.
    pub results: Vec<RedactedObject>,
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let auth = AuthLayer::new(state.identities.clone(), state.auth.clone());

    let classes = Router::new()
        .route("/classes/{class_name}", get(find_objects))
        .route("/classes/{class_name}/{object_id}", get(get_object))
        .route_layer(auth)
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/1", classes.clone())
        .merge(classes)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /classes/{class_name}
#[tracing::instrument(skip(state, identity), fields(principal = %identity.principal))]
async fn find_objects(
    State(state): State<AppState>,
    Path(class_name): Path<String>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<FindResponse>> {
    let class = ClassName::new(class_name);
    let objects = state.objects.find_objects(&class).await?;
    let total = objects.len();

    let scope = state.redactor.scope_for(identity).await;
    let results = state.redactor.present_many_in(&scope, objects).await?;
    tracing::debug!(total, visible = results.len(), "find complete");

    Ok(Json(FindResponse { results }))
}

/// GET /classes/{class_name}/{object_id}
#[tracing::instrument(skip(state, identity), fields(principal = %identity.principal))]
async fn get_object(
    State(state): State<AppState>,
    Path((class_name, object_id)): Path<(String, String)>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<RedactedObject>> {
    let class = ClassName::new(class_name);
    let id = ObjectId::new(object_id);

    let object = state
        .objects
        .get_object(&class, &id)
        .await?
        .ok_or_else(|| Error::not_found(class.as_str(), id.as_str()))?;

    let scope = state.redactor.scope_for(identity).await;
    let view = state.redactor.present_one_in(&scope, object).await?;
    Ok(Json(view))
}

/// GET /health
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let Json(value) = health().await;
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_find_response_shape() {
        let response = FindResponse { results: vec![] };
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "results": [] }));
    }
}
