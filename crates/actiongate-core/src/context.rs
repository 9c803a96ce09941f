//! Per-request scratch state: request id and correlation (event) id.

use std::fmt;

use uuid::Uuid;

/// Correlation id derived deterministically from the inbound path: the
/// last two non-empty path segments joined with `:` (one segment yields
/// that segment alone; an empty path yields `"root"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventId(String);

impl EventId {
    pub fn from_path(path: &str) -> Self {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self("root".to_string());
        }
        let tail = segments.split_off(segments.len().saturating_sub(2));
        Self(tail.join(":"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mutable per-request context, created on request entry and discarded on
/// response completion. Never shared across requests; threaded explicitly
/// through the gate rather than living in ambient state.
#[derive(Debug)]
pub struct RequestContext {
    request_id: Uuid,
    event_id: Option<EventId>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            event_id: None,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Stamp the event id. First write wins: the gate stamps exactly once
    /// per request, and a second attempt is ignored. Returns whether the
    /// write took effect.
    pub fn stamp_event_id(&mut self, event_id: EventId) -> bool {
        if self.event_id.is_some() {
            return false;
        }
        self.event_id = Some(event_id);
        true
    }

    pub fn event_id(&self) -> Option<&EventId> {
        self.event_id.as_ref()
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
