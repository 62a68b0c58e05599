use std::sync::Arc;

use axum::{
    debug_handler,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::model::Reservation;
use crate::notify::{ChannelNotifier, Notification};
use crate::session::ReservationView;
use crate::store::ReservationStore;

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum LiveMessage {
    Reservations { entries: Vec<ReservationView> },
    Reminder { notification: Notification },
}

fn snapshot_message(entries: Vec<Reservation>) -> LiveMessage {
    LiveMessage::Reservations {
        entries: entries.into_iter().map(ReservationView::from).collect(),
    }
}

/// Pushes a full reservation snapshot on every store change and a reminder
/// message for every fired notification. Clients only listen; anything
/// they send is ignored until they hang up.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn live(
    State(store): State<Arc<dyn ReservationStore>>,
    State(notifier): State<Arc<ChannelNotifier>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let mut snapshots = store.subscribe();
    let mut reminders = notifier.subscribe();

    ws.on_upgrade(async move |stream| {
        let (mut sender, mut receiver) = stream.split();

        let initial = snapshots.borrow_and_update().clone();
        if let Some(entries) = initial {
            let Ok(message) = serde_json::to_string(&snapshot_message(entries)) else {
                return;
            };
            if sender.send(message.into()).await.is_err() {
                return;
            }
        }

        loop {
            let message = tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let Some(entries) = snapshots.borrow_and_update().clone() else {
                        continue;
                    };
                    serde_json::to_string(&snapshot_message(entries))
                }
                reminder = reminders.recv() => match reminder {
                    Ok(notification) => {
                        serde_json::to_string(&LiveMessage::Reminder { notification })
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                incoming = receiver.next() => match incoming {
                    Some(Ok(_)) => continue,
                    _ => break,
                },
            };

            let Ok(message) = message else {
                continue;
            };
            if sender.send(message.into()).await.is_err() {
                break;
            }
        }
    })
}
