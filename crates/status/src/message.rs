use tracing::trace;

/// Classification of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

impl MessageKind {
    /// Style class attached to the message area for this kind.
    pub fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
            MessageKind::Info => "info",
        }
    }
}

/// A message currently shown in the message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
}

/// The message area: at most one message at a time, replaced on each show.
///
/// Ids are monotonic so a caller can tell whether the message it showed is
/// still the one on screen. Timers live with the caller.
#[derive(Debug, Clone)]
pub struct MessageArea {
    current: Option<StatusMessage>,
    next_id: u64,
}

impl MessageArea {
    /// Creates an empty message area.
    pub fn new() -> Self {
        Self {
            current: None,
            next_id: 0,
        }
    }

    /// Replaces the current message. Returns the assigned id.
    pub fn show(&mut self, kind: MessageKind, text: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        let text = text.into();
        trace!(id, kind = kind.class(), %text, "status message");
        self.current = Some(StatusMessage { id, kind, text });
        id
    }

    /// The message on screen, if any.
    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    /// Text on screen, empty when nothing is shown.
    pub fn text(&self) -> &str {
        self.current.as_ref().map_or("", |m| m.text.as_str())
    }

    /// Clears the area unconditionally.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Clears the area only if it still shows exactly `text`.
    /// Returns `true` if something was cleared.
    pub fn clear_if_showing(&mut self, text: &str) -> bool {
        if self.text() == text && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Whether nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

impl Default for MessageArea {
    fn default() -> Self {
        Self::new()
    }
}
