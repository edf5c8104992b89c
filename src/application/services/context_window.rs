use crate::domain::ChatMessage;

pub const DEFAULT_CONTEXT_WINDOW: usize = 10;

/// How many of the most recent messages are replayed to the model on each turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextWindow {
    max_messages: usize,
}

impl ContextWindow {
    /// Sizes below one are clamped so the current message always fits.
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages: max_messages.max(1),
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    pub fn select<'a>(&self, messages: &'a [ChatMessage]) -> &'a [ChatMessage] {
        let start = messages.len().saturating_sub(self.max_messages);
        &messages[start..]
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_WINDOW)
    }
}
