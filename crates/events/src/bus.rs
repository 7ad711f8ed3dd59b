//! Broadcast-based event bus.
//!
//! Handlers publish [`PlatformEvent`]s fire-and-forget; the notification
//! dispatcher (and anything else that cares) holds a subscription. One
//! `Arc<EventBus>` lives in the shared application state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use fansync_core::types::DbId;

// ---------------------------------------------------------------------------
// Event type names
// ---------------------------------------------------------------------------

/// Emitted after a schedule row is inserted.
pub const SCHEDULE_CREATED: &str = "schedule.created";

/// Emitted after a schedule row is updated.
pub const SCHEDULE_UPDATED: &str = "schedule.updated";

/// Emitted after a schedule row is deleted. The payload carries a snapshot of
/// the recipients taken before the favorite rows were removed.
pub const SCHEDULE_DELETED: &str = "schedule.deleted";

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened on the platform, addressed by a dot-separated
/// `event_type` string.
///
/// Start from [`PlatformEvent::new`] and chain the `with_*` methods for the
/// optional parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Event name, e.g. [`SCHEDULE_CREATED`].
    pub event_type: String,

    /// Kind of the entity this event is about, e.g. `"schedule"`.
    pub source_entity_type: Option<String>,

    /// Row id of that entity.
    pub source_entity_id: Option<DbId>,

    /// User whose action produced the event, when there is one.
    pub actor_user_id: Option<DbId>,

    /// Event-specific data as JSON. Defaults to `{}`.
    pub payload: serde_json::Value,

    /// UTC time the event was built, not when it was delivered.
    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Build a bare event of the given type, stamped with the current time.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            actor_user_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Record which entity the event is about.
    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    /// Record the user who caused the event.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Replace the payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Channel depth used by [`EventBus::default`].
const DEFAULT_DEPTH: usize = 1024;

/// Publish/subscribe hub over a [`broadcast`] channel.
///
/// Every subscriber gets its own cursor into the stream, so each one sees
/// every event published after it subscribed. Publishing never blocks; when
/// the buffer wraps, the slowest subscribers lose the oldest events and see
/// a `Lagged` error on their next receive.
pub struct EventBus {
    tx: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Build a bus whose buffer holds up to `capacity` undelivered events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Hand `event` to every live subscriber.
    ///
    /// An event published while nobody is subscribed is simply discarded;
    /// the send error carries no other meaning here.
    pub fn publish(&self, event: PlatformEvent) {
        let _ = self.tx.send(event);
    }

    /// Open a new subscription starting at the current end of the stream.
    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
