use std::sync::Arc;

use axum::{Json, debug_handler, extract::{Query, State}};
use serde::Deserialize;

use crate::classify;
use crate::model::MachineKind;
use crate::session::{Overview, Session};

#[derive(Debug, Deserialize)]
pub(crate) struct OverviewQuery {
    kind: Option<MachineKind>,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn overview(
    State(session): State<Arc<Session>>,
    Query(query): Query<OverviewQuery>,
) -> Json<Overview> {
    let kind = query.kind.unwrap_or(MachineKind::Washer);
    Json(session.overview(kind, classify::now_local()).await)
}
