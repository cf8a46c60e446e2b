//! Locally generated notifications
//!
//! Notifications are created by the client itself after actions such as
//! applying to or withdrawing from a project. The backend never sends them.
//! The list is persisted under [`NOTIFICATIONS_KEY`] and has no expiry.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::events::{AppEvent, EventBus};
use crate::session::KeyValueStore;

/// Storage key of the notification list
pub const NOTIFICATIONS_KEY: &str = "skillbridge_notifications";

/// Relative time label given to new notifications
pub const JUST_NOW: &str = "Just now";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub message: String,
    pub time: String,
    pub unread: bool,
}

/// Persisted notification list, newest first.
pub struct NotificationCenter {
    store: Arc<dyn KeyValueStore>,
    events: EventBus,
    items: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    /// Load the persisted list. An unreadable entry starts an empty list.
    pub fn load(store: Arc<dyn KeyValueStore>, events: EventBus) -> Self {
        let items = match store.get(NOTIFICATIONS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable notification list: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        Self {
            store,
            events,
            items: Mutex::new(items),
        }
    }

    pub fn list(&self) -> Vec<Notification> {
        self.items().clone()
    }

    pub fn unread_count(&self) -> usize {
        self.items().iter().filter(|n| n.unread).count()
    }

    /// Prepend a new unread notification and return it.
    pub fn add(&self, message: impl Into<String>) -> Result<Notification> {
        let mut items = self.items();

        // Millisecond ids collide when two actions land in the same tick
        let mut id = Utc::now().timestamp_millis();
        if let Some(max) = items.iter().map(|n| n.id).max() {
            id = id.max(max + 1);
        }

        let notification = Notification {
            id,
            message: message.into(),
            time: JUST_NOW.to_string(),
            unread: true,
        };
        items.insert(0, notification.clone());
        self.persist(&items)?;
        Ok(notification)
    }

    /// Reading a notification dismisses it. Returns false for unknown ids.
    pub fn mark_as_read(&self, id: i64) -> Result<bool> {
        let mut items = self.items();
        let before = items.len();
        items.retain(|n| n.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.persist(&items)?;
        Ok(true)
    }

    /// Dismiss everything. Safe to call on an empty list.
    pub fn mark_all_as_read(&self) -> Result<()> {
        let mut items = self.items();
        items.clear();
        self.persist(&items)
    }

    fn items(&self) -> MutexGuard<'_, Vec<Notification>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, items: &[Notification]) -> Result<()> {
        let json =
            serde_json::to_string(items).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.store.set(NOTIFICATIONS_KEY, &json)?;
        self.events.publish(AppEvent::NotificationsChanged);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryStore;

    fn center() -> (NotificationCenter, Arc<dyn KeyValueStore>) {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        (
            NotificationCenter::load(Arc::clone(&store), EventBus::new()),
            store,
        )
    }

    #[test]
    fn test_starts_empty() {
        let (center, _) = center();
        assert!(center.list().is_empty());
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn test_add_prepends_unread() {
        let (center, _) = center();
        let first = center.add("Applied to \"Chat bot\"").unwrap();
        let second = center.add("Withdrew from \"ETL\"").unwrap();

        let list = center.list();
        assert_eq!(list[0], second);
        assert_eq!(list[1], first);
        assert!(second.id > first.id);
        assert_eq!(second.time, JUST_NOW);
        assert!(second.unread);
        assert_eq!(center.unread_count(), 2);
    }

    #[test]
    fn test_mark_as_read_removes_one() {
        let (center, _) = center();
        let keep = center.add("a").unwrap();
        let gone = center.add("b").unwrap();

        assert!(center.mark_as_read(gone.id).unwrap());
        assert_eq!(center.list(), vec![keep]);
        assert!(!center.mark_as_read(gone.id).unwrap());
    }

    #[test]
    fn test_mark_all_as_read_is_idempotent() {
        let (center, _) = center();
        center.add("a").unwrap();
        center.add("b").unwrap();

        center.mark_all_as_read().unwrap();
        assert!(center.list().is_empty());
        center.mark_all_as_read().unwrap();
        assert!(center.list().is_empty());
    }

    #[test]
    fn test_persists_across_loads() {
        let (center, store) = center();
        let added = center.add("persisted").unwrap();

        let reloaded = NotificationCenter::load(store, EventBus::new());
        assert_eq!(reloaded.list(), vec![added]);
    }

    #[test]
    fn test_reads_existing_list_and_tolerates_corruption() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        store
            .set(
                NOTIFICATIONS_KEY,
                r#"[{"id": 1, "message": "New project available", "time": "3 days ago", "unread": true}]"#,
            )
            .unwrap();
        let center = NotificationCenter::load(Arc::clone(&store), EventBus::new());
        assert_eq!(center.list()[0].time, "3 days ago");

        store.set(NOTIFICATIONS_KEY, "not json").unwrap();
        let center = NotificationCenter::load(store, EventBus::new());
        assert!(center.list().is_empty());
    }

    #[test]
    fn test_mutations_publish_event() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let events = EventBus::new();
        let mut sub = events.subscribe();
        let center = NotificationCenter::load(store, events);

        center.add("a").unwrap();
        assert_eq!(sub.try_next(), Some(AppEvent::NotificationsChanged));
    }
}
