use std::sync::Arc;

use axum::{debug_handler, extract::{Path, State}, http::StatusCode};
use uuid::Uuid;

use crate::AppResult;
use crate::store::ReservationStore;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn remove(
    State(store): State<Arc<dyn ReservationStore>>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    store.delete(id).await?;
    tracing::info!(%id, "reservation deleted");
    Ok(StatusCode::NO_CONTENT)
}
