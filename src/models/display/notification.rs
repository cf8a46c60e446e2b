//! Notification display model

use serde::Serialize;
use tabled::Tabled;

use crate::notifications::Notification;

/// Notification display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NotificationDisplay {
    #[tabled(rename = "ID")]
    pub id: i64,

    #[tabled(rename = "MESSAGE")]
    pub message: String,

    #[tabled(rename = "TIME")]
    pub time: String,

    #[tabled(rename = "UNREAD")]
    pub unread: String,
}

impl From<&Notification> for NotificationDisplay {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            message: n.message.clone(),
            time: n.time.clone(),
            unread: super::check(n.unread),
        }
    }
}
