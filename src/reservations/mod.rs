mod list;
mod new;
mod remind;
mod remove;
mod ws;

use axum::{Router, routing::{delete, get, post}};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list::overview).post(new::create))
        .route("/reservations/{id}", delete(remove::remove))
        .route("/reminders", post(remind::enable))
        .route("/ws", get(ws::live))
}
