use std::time::Duration;

/// How often the reminder engine re-evaluates the projection.
pub const REMINDER_TICK: Duration = Duration::from_secs(30);

/// A reminder fires when a slot ends within this lead, exclusive at both
/// ends of the window: strictly more than zero, strictly less than the lead.
pub const REMINDER_LEAD: time::Duration = time::Duration::minutes(5);

/// Completed reservations shown per category, newest first.
pub const COMPLETED_DISPLAY_CAP: usize = 10;

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: dotenv::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://spincycle.db?mode=rwc".to_owned()),
            bind_addr: dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned()),
        }
    }
}
