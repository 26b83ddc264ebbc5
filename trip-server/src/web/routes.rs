//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::catalogue::CatalogueError;
use crate::domain::{FacetCategory, TripId, facet_option};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/trips", get(list_trips))
        .route("/trips/:id", get(trip_detail))
        .route("/trips/:id/like", post(toggle_like))
        .route("/search", put(set_query))
        .route("/search/popular", get(popular_searches))
        .route("/catalogue/grow", post(grow_catalogue))
        .route("/catalogue/reset", post(reset_catalogue))
        .route("/facets", get(list_facets).delete(clear_facets))
        .route("/facets/:id/toggle", post(toggle_facet))
        .route("/facets/category/:category", delete(clear_category))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Build the projection response for the current session.
async fn catalogue_response(state: &AppState) -> CatalogueResponse {
    let session = state.session.read().await;
    let trips = state.catalogue.project(&session.browse).await;
    let table = state.catalogue.seed_table().await;

    CatalogueResponse {
        query: session.browse.query().to_string(),
        active_facets: session.browse.facets().iter().cloned().collect(),
        trips: trips
            .iter()
            .map(|t| TripCard::from_record(t, session.popularity(t.id(), &table)))
            .collect(),
        loaded: state.catalogue.len().await,
        growing: state.catalogue.is_growing(),
    }
}

/// The filtered, sorted catalogue.
async fn list_trips(State(state): State<AppState>) -> Json<CatalogueResponse> {
    Json(catalogue_response(&state).await)
}

fn parse_id(raw: &str) -> Result<TripId, AppError> {
    TripId::parse(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Detail of one loaded trip.
async fn trip_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripCard>, AppError> {
    let id = parse_id(&id)?;
    let record = state
        .catalogue
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound {
            message: format!("no trip {id}"),
        })?;

    let table = state.catalogue.seed_table().await;
    let session = state.session.read().await;
    let popularity = session.popularity(record.id(), &table);
    Ok(Json(TripCard::from_record(&record, popularity)))
}

/// Toggle the liked flag of a loaded trip, moving its like count.
async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, AppError> {
    let id = parse_id(&id)?;
    if state.catalogue.get(&id).await.is_none() {
        return Err(AppError::NotFound {
            message: format!("no trip {id}"),
        });
    }

    let table = state.catalogue.seed_table().await;
    let popularity = state.session.write().await.toggle_like(&id, &table);

    Ok(Json(LikeResponse {
        id: id.to_string(),
        likes: popularity.likes,
        liked: popularity.liked,
    }))
}

/// Replace the search text.
async fn set_query(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Json<CatalogueResponse> {
    state.session.write().await.browse.set_query(req.query);
    Json(catalogue_response(&state).await)
}

/// Search shortcuts for the search box.
async fn popular_searches() -> Json<PopularSearches> {
    Json(PopularSearches::default())
}

/// Ask for one more page.
async fn grow_catalogue(
    State(state): State<AppState>,
) -> Result<Json<GrowthResponse>, AppError> {
    let outcome = state.catalogue.request_growth().await?;
    Ok(Json(outcome.into()))
}

/// Reload the catalogue from scratch.
async fn reset_catalogue(
    State(state): State<AppState>,
) -> Result<Json<CatalogueResponse>, AppError> {
    state.catalogue.initialize().await?;
    state.session.write().await.likes.clear();
    Ok(Json(catalogue_response(&state).await))
}

/// The filter picker.
async fn list_facets(State(state): State<AppState>) -> Json<FacetsResponse> {
    let session = state.session.read().await;
    Json(FacetsResponse::build(session.browse.facets()))
}

/// Switch an offered option on or off.
async fn toggle_facet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogueResponse>, AppError> {
    let option = facet_option(&id).ok_or_else(|| AppError::NotFound {
        message: format!("no filter option {id}"),
    })?;

    state
        .session
        .write()
        .await
        .browse
        .toggle_facet(option.clone());
    Ok(Json(catalogue_response(&state).await))
}

/// Switch off every option.
async fn clear_facets(State(state): State<AppState>) -> Json<CatalogueResponse> {
    state.session.write().await.browse.clear_all();
    Json(catalogue_response(&state).await)
}

/// Switch off every option in one category.
async fn clear_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<CatalogueResponse>, AppError> {
    let category = FacetCategory::parse(&category);
    if !category.is_recognized() {
        return Err(AppError::BadRequest {
            message: format!("unknown filter category {category}"),
        });
    }

    state.session.write().await.browse.clear_category(&category);
    Ok(Json(catalogue_response(&state).await))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The seed source failed; the client may retry.
    Upstream { message: String },
    Internal { message: String },
}

impl From<CatalogueError> for AppError {
    fn from(e: CatalogueError) -> Self {
        match e {
            CatalogueError::Source(_) => AppError::Upstream {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
