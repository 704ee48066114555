use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use core_types::{Facility, FacilityFilter, FacilityQuery};
use serde::Serialize;
use std::sync::Arc;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub ok: bool,
}

/// # POST /facilities/
/// Creates a facility. The body is validated while it is deserialized, so an
/// invalid facility never reaches the store.
pub async fn create_facility(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Facility>, JsonRejection>,
) -> Result<Json<Facility>, AppError> {
    let Json(facility) = payload?;
    let stored = state.store.create_facility(&facility).await?;
    tracing::info!(uid = %stored.uid, "Created facility.");
    Ok(Json(stored))
}

/// # GET /facilities/
/// Lists one page of facilities, ordered by announcement date.
pub async fn list_facilities(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FacilityQuery>, QueryRejection>,
) -> Result<Json<Vec<Facility>>, AppError> {
    let Query(query) = query?;
    let filter = FacilityFilter::try_from(query)?;
    let facilities = state.store.list_facilities(&filter).await?;
    Ok(Json(facilities))
}

/// # GET /facilities/:uid
pub async fn get_facility(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Facility>, AppError> {
    let facility = state.store.get_facility(&uid).await?;
    Ok(Json(facility))
}

/// # DELETE /facilities/:uid
pub async fn delete_facility(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DeleteAck>, AppError> {
    state.store.delete_facility(&uid).await?;
    tracing::info!(%uid, "Deleted facility.");
    Ok(Json(DeleteAck { ok: true }))
}
