//! In-process event channel between views
//!
//! Views that mutate shared server state publish an [`AppEvent`]; views that
//! display that state hold a [`Subscription`] and refetch when it fires.

use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped
const CHANNEL_CAPACITY: usize = 64;

/// Something other views may need to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// A project application was created or withdrawn
    ApplicationsChanged,
    /// The local session was cleared; the login route should be shown
    SessionEnded,
    /// The notification list changed
    NotificationsChanged,
}

/// Publish/subscribe hub. Clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Send to every current subscriber. Returns how many received it.
    pub fn publish(&self, event: AppEvent) -> usize {
        log::debug!("Publishing {:?}", event);
        // No subscribers is not an error
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// Receiving end held by a view.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<AppEvent>,
}

impl Subscription {
    /// Wait for the next event. `None` once every publisher is gone.
    pub async fn next(&mut self) -> Option<AppEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::debug!("Subscriber lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take an already-delivered event without waiting.
    pub fn try_next(&mut self) -> Option<AppEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    /// Consume everything pending and report whether `event` was among it.
    pub fn drain_contains(&mut self, event: AppEvent) -> bool {
        let mut seen = false;
        while let Some(next) = self.try_next() {
            seen |= next == event;
        }
        seen
    }
}
