use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde_json::{Value, json};

use crate::cost::insert::{InsertCostService, InsertOutcome};
use crate::cost::lifecycle::CostLifecycleService;
use crate::cost::model::{AllocationRequest, CostRecord};
use crate::cost::update::UpdateCostService;
use crate::error::CostError;

#[derive(Clone)]
pub struct AppState {
    pub insert: Arc<InsertCostService>,
    pub update: Arc<UpdateCostService>,
    pub lifecycle: Arc<CostLifecycleService>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/food-costs", post(create_cost))
        .route("/api/food-costs/actives", get(list_active))
        .route("/api/food-costs/inactives", get(list_inactive))
        .route("/api/food-costs/search/{week_number}", get(search_by_week))
        .route("/api/food-costs/{id}", put(update_cost))
        .route("/api/food-costs/delete/{id}", put(soft_delete))
        .route("/api/food-costs/restore/{id}", put(restore))
        .route(
            "/api/food-costs/delete/physical/{id}",
            delete(delete_physically),
        )
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn create_cost(
    State(state): State<AppState>,
    Json(request): Json<AllocationRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let outcome = state.insert.add_cost(&request).await.map_err(reject)?;

    // Both outcomes are success to the caller; a duplicate submission is an
    // idempotent no-op rather than an error.
    let message = match outcome {
        InsertOutcome::Created(_) => "cost record created",
        InsertOutcome::AlreadyRecorded => "period already recorded",
    };

    Ok(Json(json!({ "message": message })))
}

async fn update_cost(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AllocationRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    state.update.update_cost(id, &request).await.map_err(reject)?;

    Ok(Json(json!({ "message": "cost record updated" })))
}

async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<CostRecord>>, (StatusCode, String)> {
    state.lifecycle.list_active().await.map(Json).map_err(reject)
}

async fn list_inactive(
    State(state): State<AppState>,
) -> Result<Json<Vec<CostRecord>>, (StatusCode, String)> {
    state.lifecycle.list_inactive().await.map(Json).map_err(reject)
}

async fn search_by_week(
    State(state): State<AppState>,
    Path(week_number): Path<String>,
) -> Result<Json<Vec<CostRecord>>, (StatusCode, String)> {
    state
        .lifecycle
        .search_by_week(&week_number)
        .await
        .map(Json)
        .map_err(reject)
}

async fn soft_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CostRecord>, (StatusCode, String)> {
    state.lifecycle.soft_delete(id).await.map(Json).map_err(reject)
}

async fn restore(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CostRecord>, (StatusCode, String)> {
    state.lifecycle.restore(id).await.map(Json).map_err(reject)
}

async fn delete_physically(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    state.lifecycle.delete_physically(id).await.map_err(reject)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Maps every domain error to a response status, exhaustively.
fn reject(err: CostError) -> (StatusCode, String) {
    let status = match &err {
        CostError::RecordNotFound(_) | CostError::FoodNotFound(_) | CostError::FlockNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        CostError::InvalidAllocation(_)
        | CostError::AlreadyInactive(_)
        | CostError::AlreadyActive(_) => StatusCode::BAD_REQUEST,
        CostError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        CostError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, err.to_string())
}
