//! Change-event fan-out to connected viewers.
//!
//! The hub is process-wide; each subscriber binds to one session (or
//! stays global and receives every session's events). Publishing never
//! blocks on a viewer: each subscriber has a bounded buffer, a full
//! buffer counts a drop, and a subscriber that keeps falling behind is
//! disconnected instead of applying backpressure to the publisher.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use metrics::counter;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

use super::events::Notification;

/// Per-subscriber outbound buffer capacity.
pub const SUBSCRIBER_BUFFER: usize = 32;

/// Lifetime message drops before a slow subscriber is disconnected.
const MAX_LIFETIME_DROPS: u64 = 64;

/// One connected viewer's sending side.
pub struct Subscriber {
    /// Subscriber id (unique per connection).
    pub id: String,
    session: parking_lot::RwLock<Option<String>>,
    /// `None` once closed. The connection task holds its own handle to
    /// this subscriber, so closure must drop the sender itself rather
    /// than rely on the hub's reference going away.
    tx: parking_lot::Mutex<Option<mpsc::Sender<Arc<String>>>>,
    drops: AtomicU64,
}

impl Subscriber {
    /// Wrap a connection's outbound channel. The subscriber starts
    /// global (receives every session) until it binds to one session.
    pub fn new(id: String, tx: mpsc::Sender<Arc<String>>) -> Self {
        Self {
            id,
            session: parking_lot::RwLock::new(None),
            tx: parking_lot::Mutex::new(Some(tx)),
            drops: AtomicU64::new(0),
        }
    }

    /// Bind the subscriber to a single session's events.
    pub fn bind_session(&self, session_id: &str) {
        *self.session.write() = Some(session_id.to_string());
    }

    /// Return to receiving every session's events.
    pub fn bind_global(&self) {
        *self.session.write() = None;
    }

    /// The bound session, if any.
    pub fn session_id(&self) -> Option<String> {
        self.session.read().clone()
    }

    /// Queue a serialized message; a full buffer counts a drop. Sends to
    /// a closed subscriber are discarded without counting.
    fn send(&self, message: Arc<String>) -> bool {
        let tx = self.tx.lock();
        let Some(tx) = tx.as_ref() else {
            return true;
        };
        if tx.try_send(message).is_err() {
            let _ = self.drops.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Drop the outbound sender so the connection's write loop observes
    /// channel closure and tears the socket down.
    pub fn close(&self) {
        drop(self.tx.lock().take());
    }

    /// Lifetime drop count for this subscriber.
    pub fn drop_count(&self) -> u64 {
        self.drops.load(Ordering::Relaxed)
    }
}

/// Fan-out point for change notifications.
pub struct BroadcastHub {
    /// Subscribers indexed by subscriber id.
    subscribers: RwLock<HashMap<String, Arc<Subscriber>>>,
    /// Atomic count so count queries skip the read lock.
    active_count: AtomicUsize,
}

impl BroadcastHub {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            active_count: AtomicUsize::new(0),
        }
    }

    /// Register a subscriber. Safe concurrently with publishing. A
    /// replaced subscriber with the same id is closed.
    pub async fn register(&self, subscriber: Arc<Subscriber>) {
        let mut subs = self.subscribers.write().await;
        match subs.insert(subscriber.id.clone(), subscriber) {
            Some(old) => old.close(),
            None => {
                let _ = self.active_count.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Remove a subscriber by id and close its channel.
    pub async fn unregister(&self, subscriber_id: &str) {
        let mut subs = self.subscribers.write().await;
        if let Some(sub) = subs.remove(subscriber_id) {
            sub.close();
            let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Deliver a notification to the session's subscribers and to global
    /// subscribers, evicting any subscriber over the drop threshold.
    pub async fn publish(&self, notification: &Notification) {
        let json = match serde_json::to_string(notification) {
            Ok(j) => Arc::new(j),
            Err(e) => {
                warn!(error = %e, "failed to serialize notification");
                return;
            }
        };
        let session_id = notification.session_id.as_str();
        let mut to_evict = Vec::new();
        {
            let subs = self.subscribers.read().await;
            let mut recipients = 0u32;
            for sub in subs.values() {
                let bound = sub.session_id();
                if bound.as_deref().is_some_and(|s| s != session_id) {
                    continue;
                }
                recipients += 1;
                if !sub.send(Arc::clone(&json)) {
                    counter!("broadcast_drops_total").increment(1);
                    let drops = sub.drop_count();
                    if drops >= MAX_LIFETIME_DROPS {
                        warn!(subscriber_id = %sub.id, drops, "disconnecting slow viewer");
                        to_evict.push(sub.id.clone());
                    } else {
                        warn!(
                            subscriber_id = %sub.id,
                            total_drops = drops,
                            "viewer buffer full, message dropped"
                        );
                    }
                }
            }
            debug!(session_id, recipients, "published notification");
        }
        if !to_evict.is_empty() {
            let mut subs = self.subscribers.write().await;
            for id in &to_evict {
                if let Some(sub) = subs.remove(id) {
                    // Closing the channel is what actually disconnects the
                    // viewer; removal alone would leave the socket open.
                    sub.close();
                    let _ = self.active_count.fetch_sub(1, Ordering::Relaxed);
                }
            }
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

impl Default for BroadcastHub {
    fn default() -> Self {
        Self::new()
    }
}
