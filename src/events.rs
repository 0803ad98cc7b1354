//! Engine notifications.
//!
//! Sinks receive every event after the operation that produced it has
//! committed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::info;

use crate::drops::PauseReason;
use crate::pass::{OwnerId, PassId, PassRecord};

/// Something that happened inside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PassEvent {
    Minted {
        record: PassRecord,
        /// RFC 3339.
        minted_at: String,
    },
    Transferred {
        id: PassId,
        from: OwnerId,
        to: OwnerId,
    },
    DropPaused {
        phase: u32,
        reason: PauseReason,
    },
    DropResumed {
        phase: u32,
    },
}

impl PassEvent {
    pub fn minted(record: PassRecord) -> Self {
        PassEvent::Minted {
            record,
            minted_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Snake-case event name, as used in the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            PassEvent::Minted { .. } => "minted",
            PassEvent::Transferred { .. } => "transferred",
            PassEvent::DropPaused { .. } => "drop_paused",
            PassEvent::DropResumed { .. } => "drop_resumed",
        }
    }
}

/// Receiver of engine events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: &PassEvent);
}

/// Writes each event as a structured tracing record.
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn publish(&self, event: &PassEvent) {
        match event {
            PassEvent::Minted { record, minted_at } => info!(
                id = record.id,
                owner = %record.owner,
                status = %record.status,
                edition = %record.edition,
                wonder = %record.wonder,
                pattern = %record.pattern,
                minted_at = %minted_at,
                "WunderPass minted"
            ),
            PassEvent::Transferred { id, from, to } => {
                info!(id, %from, %to, "WunderPass transferred")
            }
            PassEvent::DropPaused { phase, reason } => {
                info!(phase, ?reason, "Drop paused")
            }
            PassEvent::DropResumed { phase } => info!(phase, "Drop resumed"),
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PassEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything received so far.
    pub fn events(&self) -> Vec<PassEvent> {
        self.guard().clone()
    }

    /// Remove and return everything received so far.
    pub fn drain(&self) -> Vec<PassEvent> {
        std::mem::take(&mut *self.guard())
    }

    /// Number of events received so far.
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// True if nothing has been received yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic elsewhere while holding the lock leaves the Vec intact.
    fn guard(&self) -> MutexGuard<'_, Vec<PassEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for MemorySink {
    fn publish(&self, event: &PassEvent) {
        self.guard().push(event.clone());
    }
}
