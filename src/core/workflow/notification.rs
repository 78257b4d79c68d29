//! Self-expiring notifications
//!
//! Each notification carries its own deadline. Expired entries are pruned
//! whenever the active list is read, so nothing needs a background timer.

use crate::config::WorkflowConfig;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    VideoCall,
    Referral,
    PrescriptionPrinted,
    Completed,
}

/// An informational message shown to the doctor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// Medicine names, only for printed prescriptions
    pub medicines: Vec<String>,
    pub expires_at: Instant,
}

/// Holds the notifications that have not yet expired
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    print_ttl: Duration,
    next_id: u64,
    items: Vec<Notification>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::from_config(&WorkflowConfig::default())
    }
}

impl NotificationCenter {
    pub fn new(ttl: Duration, print_ttl: Duration) -> Self {
        Self {
            ttl,
            print_ttl,
            next_id: 1,
            items: Vec::new(),
        }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self::new(
            Duration::from_millis(config.notification_ttl_ms),
            Duration::from_millis(config.print_notification_ttl_ms),
        )
    }

    /// Lifetime applied to notifications of `kind`
    pub fn ttl_for(&self, kind: NotificationKind) -> Duration {
        match kind {
            NotificationKind::PrescriptionPrinted => self.print_ttl,
            _ => self.ttl,
        }
    }

    /// Posts a notification and returns its id
    pub fn post(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        medicines: Vec<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        let message = message.into();
        tracing::info!(notification_id = id, kind = ?kind, message = %message, "Notification posted");

        self.items.push(Notification {
            id,
            kind,
            message,
            medicines,
            expires_at: Instant::now() + self.ttl_for(kind),
        });
        id
    }

    /// Notifications still alive, oldest first
    pub fn active(&mut self) -> &[Notification] {
        let now = Instant::now();
        self.items.retain(|n| n.expires_at > now);
        &self.items
    }

    /// Most recent live notification
    pub fn latest(&mut self) -> Option<&Notification> {
        self.active().last()
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }
}
