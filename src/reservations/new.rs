use std::sync::Arc;

use axum::{Json, debug_handler, extract::State, http::StatusCode, response::IntoResponse};

use crate::AppResult;
use crate::model::ReservationDraft;
use crate::store::ReservationStore;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn create(
    State(store): State<Arc<dyn ReservationStore>>,
    Json(draft): Json<ReservationDraft>,
) -> AppResult<impl IntoResponse> {
    draft.validate()?;

    let reservation = store.create(draft).await?;
    tracing::info!(
        id = %reservation.id,
        machine = reservation.machine_number,
        kind = reservation.machine_type.as_str(),
        "reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation)))
}
