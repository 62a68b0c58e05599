//! Notification boundary: ask for permission once, then deliver
//! fire-and-forget alerts with no confirmation of receipt.

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Dedupe tag for the displaying platform.
    pub tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionReply {
    Granted,
    Denied,
    Unsupported,
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn request_permission(&self) -> PermissionReply;

    /// Best effort; a notification nobody sees is not an error.
    fn notify(&self, notification: Notification);
}

/// Fans notifications out to every connected live-update socket.
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn request_permission(&self) -> PermissionReply {
        PermissionReply::Granted
    }

    fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}
