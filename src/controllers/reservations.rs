use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::ApiResult;
use crate::services::CreateReservation;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route("/reservations/{id}", get(get_reservation).delete(cancel_reservation))
}

/* ---------- QUERIES ---------- */

// GET /reservations?userId=
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListQuery {
    user_id: i32,
}

async fn list_reservations(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<impl IntoResponse> {
    let Query(params) = params?;
    let views = state.reservations.list_reservations(params.user_id).await?;
    Ok((StatusCode::OK, Json(views)))
}

// GET /reservations/{id}
async fn get_reservation(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    let view = state.reservations.get_reservation(id).await?;
    Ok((StatusCode::OK, Json(view)))
}

/* ---------- COMMANDS ---------- */

// POST /reservations
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1))]
    pub sequence_id: i32,
    #[validate(range(min = 1))]
    pub seat_row: i32,
    #[validate(range(min = 1))]
    pub seat_column: i32,
    #[validate(range(min = 1))]
    pub place_id: i32,
}

impl From<CreateReservationRequest> for CreateReservation {
    fn from(req: CreateReservationRequest) -> Self {
        CreateReservation {
            user_id: req.user_id,
            sequence_id: req.sequence_id,
            seat_row: req.seat_row,
            seat_column: req.seat_column,
            place_id: req.place_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateReservationResponse {
    id: i32,
}

async fn create_reservation(
    State(state): State<Arc<AppState>>,
    req: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = req?;
    req.validate()?;

    let reservation = state.reservations.reserve_seat(req.into()).await?;
    Ok((StatusCode::CREATED, Json(CreateReservationResponse { id: reservation.id })))
}

// DELETE /reservations/{id}
async fn cancel_reservation(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<impl IntoResponse> {
    let Path(id) = id?;
    state.reservations.cancel_reservation(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
