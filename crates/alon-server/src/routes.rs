//! HTTP routes for the recipe API.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument};

use alon_core::{Recipe, parse_create_body};

use crate::error::ApiError;
use crate::storage::RecipeStore;

/// Collection path of the JSON API.
pub const API_RECIPES: &str = "/api/recipes";

/// Same API as exposed by the serverless deployment.
pub const FUNCTION_RECIPES: &str = "/.netlify/functions/recipes";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self { store }
    }
}

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive filter over fill, public ID and info.
    pub search: Option<String>,
}

/// Build the full application router.
///
/// Requests running longer than `request_timeout` are answered with 408.
/// Unknown paths and unsupported methods get JSON error bodies like every
/// other failure.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(recipe_routes(API_RECIPES))
        .merge(recipe_routes(FUNCTION_RECIPES))
        .route("/healthz", get(healthz))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The four recipe operations mounted under `base`.
fn recipe_routes(base: &str) -> Router<AppState> {
    Router::new()
        .route(base, get(list_recipes).post(create_recipe))
        .route(
            &format!("{base}/{{public_id}}"),
            get(get_recipe).delete(delete_recipe),
        )
}

/// `GET /api/recipes`: every recipe, newest first.
#[instrument(skip(state))]
async fn list_recipes(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let Query(params) = params?;
    let recipes = match params.search.as_deref() {
        Some(term) => state.store.search(term).await?,
        None => state.store.list().await?,
    };
    Ok(Json(recipes))
}

/// `POST /api/recipes`: validate the body and store a new recipe.
///
/// A body sent without a JSON content type is not parsed and is validated as
/// an empty object.
#[instrument(skip_all)]
async fn create_recipe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Recipe>), ApiError> {
    let json_body: &[u8] = if has_json_content_type(&headers) {
        &body
    } else {
        &[]
    };
    let input = parse_create_body(json_body)?;
    let recipe = state.store.create(&input).await?;

    info!(id = recipe.id, public_id = %recipe.public_id, "Recipe created");

    Ok((StatusCode::CREATED, Json(recipe)))
}

/// `GET /api/recipes/{public_id}`
#[instrument(skip(state))]
async fn get_recipe(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    state
        .store
        .get_by_public_id(&public_id)
        .await?
        .map(Json)
        .ok_or_else(ApiError::recipe_not_found)
}

/// `DELETE /api/recipes/{public_id}`: 204 on success.
#[instrument(skip(state))]
async fn delete_recipe(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_by_public_id(&public_id).await? {
        info!(%public_id, "Recipe deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::recipe_not_found())
    }
}

/// `GET /healthz`: 200 when the store answers.
async fn healthz(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.store.count().await?;
    Ok(Json(json!({ "ok": true })))
}

/// `application/json`, with or without parameters, or any `+json` suffix.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| mime.trim().to_ascii_lowercase())
        .is_some_and(|mime| {
            mime == "application/json"
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn json_content_types() {
        assert!(has_json_content_type(&with_content_type("application/json")));
        assert!(has_json_content_type(&with_content_type(
            "Application/JSON; charset=utf-8"
        )));
        assert!(has_json_content_type(&with_content_type(
            "application/merge-patch+json"
        )));
    }

    #[test]
    fn non_json_content_types() {
        assert!(!has_json_content_type(&HeaderMap::new()));
        assert!(!has_json_content_type(&with_content_type("text/plain")));
        assert!(!has_json_content_type(&with_content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!has_json_content_type(&with_content_type("text/json+xml")));
    }
}
