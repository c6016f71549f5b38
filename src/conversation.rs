//! Conversation state for one channel, query, or server buffer.
//!
//! A `Conversation` accumulates [`Message`]s under two complementary views:
//! an unbounded drain-once buffer (consumed by the UI in FIFO order) and a
//! bounded scroll-back history of the most recent [`HISTORY_SIZE`] entries.
//! It also tracks a UI attention status with guarded transitions and holds a
//! non-owning handle to the list view currently showing it.
//!
//! Nothing here is synchronized; callers invoking these methods from more
//! than one thread must serialize access themselves.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::error::ModelError;
use crate::message::Message;

/// Number of messages kept in the scroll-back history.
pub const HISTORY_SIZE: usize = 30;

/// What kind of buffer a conversation represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationKind {
    Channel,
    Query,
    Server,
}

/// UI attention state of a conversation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConversationStatus {
    /// Nothing pending.
    #[default]
    Default,
    /// Currently open in the UI.
    Selected,
    /// Unread messages.
    Message,
    /// Unread messages mentioning the user.
    Highlight,
}

/// Handle to the UI list view showing a conversation.
///
/// The conversation stores the handle so the event layer can reach the view;
/// it never calls it itself and never manages the view's lifetime.
pub trait MessageListAdapter {
    /// Ask the view to re-read the conversation's messages.
    fn notify_messages_changed(&self);
}

/// One channel, query, or server buffer.
pub struct Conversation {
    name: String,
    kind: ConversationKind,
    /// Drain-once queue, newest at the front, polled from the back.
    buffer: VecDeque<Message>,
    /// Bounded scroll-back, newest at the back.
    history: VecDeque<Message>,
    status: ConversationStatus,
    adapter: Option<Weak<dyn MessageListAdapter>>,
}

impl Conversation {
    /// Create a channel conversation. The name is lowercased.
    pub fn channel(name: &str) -> Self {
        Self::new(name, ConversationKind::Channel)
    }

    /// Create a query (private message) conversation.
    pub fn query(name: &str) -> Self {
        Self::new(name, ConversationKind::Query)
    }

    /// Create the server-messages conversation.
    pub fn server(name: &str) -> Self {
        Self::new(name, ConversationKind::Server)
    }

    fn new(name: &str, kind: ConversationKind) -> Self {
        Self {
            name: name.to_lowercase(),
            kind,
            buffer: VecDeque::new(),
            history: VecDeque::new(),
            status: ConversationStatus::default(),
            adapter: None,
        }
    }

    /// Lowercased name of the conversation (channel, nick, or server).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ConversationKind {
        self.kind
    }

    /// Add a message to both the buffer and the history, evicting the oldest
    /// history entry past [`HISTORY_SIZE`].
    pub fn add_message(&mut self, message: Message) {
        self.buffer.push_front(message.clone());
        self.history.push_back(message);

        if self.history.len() > HISTORY_SIZE {
            self.history.pop_front();
        }
    }

    /// Remove and return the oldest buffered message.
    pub fn poll_buffered_message(&mut self) -> Result<Message, ModelError> {
        self.buffer.pop_back().ok_or(ModelError::EmptyBuffer)
    }

    pub fn has_buffered_messages(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Empty the buffer. History is untouched.
    pub fn clear_buffer(&mut self) {
        trace!(conversation = %self.name, dropped = self.buffer.len(), "clearing buffer");
        self.buffer.clear();
    }

    /// The drain-once buffer, newest first.
    pub fn buffer(&self) -> &VecDeque<Message> {
        &self.buffer
    }

    /// The bounded history, oldest first.
    pub fn history(&self) -> &VecDeque<Message> {
        &self.history
    }

    /// Message at the given history position, oldest first.
    pub fn history_message(&self, index: usize) -> Result<&Message, ModelError> {
        self.history.get(index).ok_or(ModelError::IndexOutOfRange {
            index,
            len: self.history.len(),
        })
    }

    /// Request a status transition.
    ///
    /// Selected and Highlight take precedence over lower-priority updates:
    /// a selected conversation only leaves that state by deselection, and a
    /// highlighted one only by selection. Anything else is silently ignored
    /// so an incoming message cannot downgrade an open or mentioned
    /// conversation.
    pub fn set_status(&mut self, status: ConversationStatus) {
        if self.status == ConversationStatus::Selected && status != ConversationStatus::Default {
            trace!(conversation = %self.name, ?status, "ignoring transition while selected");
            return;
        }

        if self.status == ConversationStatus::Highlight && status != ConversationStatus::Selected {
            trace!(conversation = %self.name, ?status, "ignoring transition while highlighted");
            return;
        }

        self.status = status;
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    /// Store a non-owning handle to the list view showing this conversation.
    pub fn set_adapter(&mut self, adapter: Weak<dyn MessageListAdapter>) {
        self.adapter = Some(adapter);
    }

    /// The list view handle, if set and still alive.
    pub fn adapter(&self) -> Option<Arc<dyn MessageListAdapter>> {
        self.adapter.as_ref().and_then(Weak::upgrade)
    }
}
