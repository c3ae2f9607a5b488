//! Notification channel: short-lived messages shown on the next rendered page.
//!
//! # Data Flow
//! ```text
//! Handler finishes an operation
//!     → store.push(category, message)
//!     → [redirect hop: queue travels in the signed cookie]
//!     → next rendering handler calls store.drain()
//!     → notifications interpolated into the layout, queue cleared
//! ```
//!
//! # Design Decisions
//! - Handlers only see the `NotificationStore` trait
//! - The queue lives with the client, so sessions cannot see each other's messages

pub mod cookie;

use serde::{Deserialize, Serialize};

pub use cookie::{signing_key, CookieName, FlashCookie};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Error,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Category::Success),
            "error" => Some(Category::Error),
            _ => None,
        }
    }
}

/// A queued, categorized message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub category: Category,
    pub message: String,
}

impl Notification {
    pub fn new(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
        }
    }
}

/// Per-session queue of pending notifications.
pub trait NotificationStore {
    /// Append to the pending queue.
    fn push(&mut self, category: Category, message: impl Into<String>);

    /// Return every pending notification and clear the queue.
    fn drain(&mut self) -> Vec<Notification>;

    fn success(&mut self, message: impl Into<String>) {
        self.push(Category::Success, message);
    }

    fn error(&mut self, message: impl Into<String>) {
        self.push(Category::Error, message);
    }
}

/// In-process store, one per session.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifications {
    pending: Vec<Notification>,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[Notification] {
        &self.pending
    }
}

impl NotificationStore for MemoryNotifications {
    fn push(&mut self, category: Category, message: impl Into<String>) {
        self.pending.push(Notification::new(category, message));
    }

    fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
