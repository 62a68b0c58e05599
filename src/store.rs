//! Reservation store adapter. The store owns the canonical copy; everyone
//! else consumes full snapshots pushed through a watch channel, so a
//! subscriber always sees the latest list and never merges increments.

use async_trait::async_trait;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use tokio::sync::watch;
use uuid::Uuid;

use crate::model::{MachineKind, Reservation, ReservationDraft};
use crate::{AppError, AppResult};

/// `None` until the first snapshot lands; consumers treat that as loading.
pub type Snapshot = Option<Vec<Reservation>>;

#[async_trait]
pub trait ReservationStore: Send + Sync {
    async fn create(&self, draft: ReservationDraft) -> AppResult<Reservation>;

    /// Deleting an id with no row fails with `NotFound` and leaves the
    /// published snapshot untouched.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// The receiver's current value is the ordered list right now; every
    /// mutation by any client of this store publishes a replacement.
    /// Dropping the receiver cancels the subscription.
    fn subscribe(&self) -> watch::Receiver<Snapshot>;
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS reservations (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT NOT NULL,
    room TEXT NOT NULL,
    machine_type TEXT NOT NULL,
    machine_number INTEGER NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    notified INTEGER NOT NULL DEFAULT 0
)";

pub struct SqliteStore {
    pool: SqlitePool,
    snapshots: watch::Sender<Snapshot>,
}

impl SqliteStore {
    pub async fn open(pool: SqlitePool) -> AppResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;

        let store = Self {
            pool,
            snapshots: watch::channel(None).0,
        };
        store.publish().await?;
        Ok(store)
    }

    async fn publish(&self) -> AppResult<()> {
        let snapshot = self.list_all().await?;
        self.snapshots.send_replace(Some(snapshot));
        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Reservation>> {
        let rows: Vec<(String, String, String, String, String, u8, String, String, i64, bool)> =
            // rowid breaks ties between rows created within the same second
            sqlx::query_as(
                "SELECT id,name,phone,room,machine_type,machine_number,\
                 start_time,end_time,created_at,notified \
                 FROM reservations ORDER BY created_at DESC, rowid DESC",
            )
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter()
            .map(
                |(id, name, phone, room, kind, machine_number, start_time, end_time, created_at, notified)| {
                    Ok(Reservation {
                        id: Uuid::parse_str(&id).map_err(anyhow::Error::from)?,
                        name,
                        phone,
                        room,
                        machine_type: MachineKind::parse(&kind).unwrap_or(MachineKind::Washer),
                        machine_number,
                        start_time,
                        end_time,
                        created_at,
                        notified,
                    })
                },
            )
            .collect()
    }
}

#[async_trait]
impl ReservationStore for SqliteStore {
    async fn create(&self, draft: ReservationDraft) -> AppResult<Reservation> {
        let reservation = Reservation {
            id: Uuid::now_v7(),
            name: draft.name,
            phone: draft.phone,
            room: draft.room,
            machine_type: draft.machine_type,
            machine_number: draft.machine_number,
            start_time: draft.start_time,
            end_time: draft.end_time,
            created_at: OffsetDateTime::now_utc().unix_timestamp(),
            notified: false,
        };

        sqlx::query(
            "INSERT INTO reservations \
             (id,name,phone,room,machine_type,machine_number,start_time,end_time,created_at,notified) \
             VALUES (?,?,?,?,?,?,?,?,?,?)",
        )
        .bind(reservation.id.to_string())
        .bind(&reservation.name)
        .bind(&reservation.phone)
        .bind(&reservation.room)
        .bind(reservation.machine_type.as_str())
        .bind(reservation.machine_number)
        .bind(&reservation.start_time)
        .bind(&reservation.end_time)
        .bind(reservation.created_at)
        .bind(reservation.notified)
        .execute(&self.pool)
        .await?;

        self.publish().await?;
        Ok(reservation)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id=?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("reservation"));
        }

        self.publish().await?;
        Ok(())
    }

    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }
}
