use std::sync::Arc;

use axum::{Json, debug_handler, extract::State};
use serde::Serialize;

use crate::AppResult;
use crate::reminder::Permission;
use crate::session::Session;

#[derive(Debug, Serialize)]
pub(crate) struct RemindersReply {
    permission: Permission,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn enable(
    State(session): State<Arc<Session>>,
) -> AppResult<Json<RemindersReply>> {
    let permission = session.enable_reminders().await?;
    Ok(Json(RemindersReply { permission }))
}
