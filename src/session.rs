//! A session owns the live projection of the store plus the reminder tick.
//! Both are background tasks acquired at start and released on shutdown or
//! drop, whichever comes first.

use std::sync::Arc;

use serde::Serialize;
use time::PrimitiveDateTime;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::classify;
use crate::config::REMINDER_TICK;
use crate::model::{MachineKind, Reservation, format_phone};
use crate::notify::{Notifier, PermissionReply};
use crate::reminder::{self, Permission};
use crate::store::{ReservationStore, Snapshot};
use crate::{AppError, AppResult};

pub struct Session {
    /// Written only by the projection task; read by handlers and the tick.
    entries: Arc<RwLock<Snapshot>>,
    permission: Arc<RwLock<Permission>>,
    notifier: Arc<dyn Notifier>,
    projection_task: JoinHandle<()>,
    tick_task: JoinHandle<()>,
}

impl Session {
    pub fn start(store: Arc<dyn ReservationStore>, notifier: Arc<dyn Notifier>) -> Session {
        let entries: Arc<RwLock<Snapshot>> = Arc::new(RwLock::new(None));
        let permission = Arc::new(RwLock::new(Permission::Unrequested));

        let mut snapshots = store.subscribe();
        let projection = entries.clone();
        let projection_task = tokio::spawn(async move {
            loop {
                let snapshot = snapshots.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    *projection.write().await = Some(snapshot);
                }
                if snapshots.changed().await.is_err() {
                    break;
                }
            }
        });

        let scanned = entries.clone();
        let granted = permission.clone();
        let tick_notifier = notifier.clone();
        let tick_task = tokio::spawn(async move {
            let mut tick = tokio::time::interval(REMINDER_TICK);
            loop {
                tick.tick().await;
                if *granted.read().await != Permission::Granted {
                    continue;
                }
                let entries = match &*scanned.read().await {
                    Some(entries) => entries.clone(),
                    None => continue,
                };
                let now = classify::now_local();
                for due in reminder::due_reminders(&entries, now) {
                    tracing::debug!(id = %due.id, end = %due.end_time, "reminder window open");
                    tick_notifier.notify(reminder::reminder_for(due));
                }
            }
        });

        Session {
            entries,
            permission,
            notifier,
            projection_task,
            tick_task,
        }
    }

    pub async fn loading(&self) -> bool {
        self.entries.read().await.is_none()
    }

    pub async fn permission(&self) -> Permission {
        *self.permission.read().await
    }

    /// Drives the permission state machine. Once granted, the platform is
    /// not asked again within this session; a denial can be retried. An
    /// unsupported platform surfaces once per request and the state stays
    /// unrequested, so reminders simply never fire.
    pub async fn enable_reminders(&self) -> AppResult<Permission> {
        if *self.permission.read().await == Permission::Granted {
            return Ok(Permission::Granted);
        }

        match self.notifier.request_permission().await {
            PermissionReply::Granted => {
                *self.permission.write().await = Permission::Granted;
                tracing::info!("reminders enabled");
                Ok(Permission::Granted)
            }
            PermissionReply::Denied => {
                *self.permission.write().await = Permission::Denied;
                tracing::info!("reminder permission denied");
                Ok(Permission::Denied)
            }
            PermissionReply::Unsupported => {
                tracing::warn!("notifications unsupported, reminders will not fire");
                Err(AppError::UnsupportedPlatform)
            }
        }
    }

    /// Everything the list surface renders for one machine category,
    /// recomputed from the projection on each call.
    pub async fn overview(&self, kind: MachineKind, now: PrimitiveDateTime) -> Overview {
        let permission = *self.permission.read().await;
        let entries = self.entries.read().await;

        let Some(entries) = entries.as_deref() else {
            return Overview {
                loading: true,
                permission,
                washer_count: 0,
                dryer_count: 0,
                active: Vec::new(),
                completed: Vec::new(),
            };
        };

        let split = classify::partition(entries, kind, now);
        Overview {
            loading: false,
            permission,
            washer_count: classify::active_count(entries, MachineKind::Washer, now),
            dryer_count: classify::active_count(entries, MachineKind::Dryer, now),
            active: split.active.into_iter().map(ReservationView::from).collect(),
            completed: split.completed.into_iter().map(ReservationView::from).collect(),
        }
    }

    pub fn shutdown(&self) {
        self.projection_task.abort();
        self.tick_task.abort();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub loading: bool,
    pub permission: Permission,
    pub washer_count: usize,
    pub dryer_count: usize,
    pub active: Vec<ReservationView>,
    pub completed: Vec<ReservationView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationView {
    #[serde(flatten)]
    pub reservation: Reservation,
    pub phone_display: String,
}

impl From<Reservation> for ReservationView {
    fn from(reservation: Reservation) -> Self {
        let phone_display = format_phone(&reservation.phone);
        Self {
            reservation,
            phone_display,
        }
    }
}
