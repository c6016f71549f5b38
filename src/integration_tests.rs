//! Integration tests for irc-model
//!
//! These tests exercise full workflows across conversation state, message
//! rendering, and display settings the way the event and UI layers drive
//! them together.

use std::collections::HashMap;

use crate::conversation::{Conversation, ConversationKind, ConversationStatus, HISTORY_SIZE};
use crate::message::{IconId, IconResolver, Message, MessageColor};
use crate::settings::DisplaySettings;

use chrono::{Local, TimeZone};

/// Glyphs for the icon ids the event layer uses.
struct EventIcons;

impl IconResolver for EventIcons {
    fn glyph(&self, icon: IconId) -> Option<char> {
        match icon {
            IconId(1) => Some('\u{2192}'), // join
            IconId(2) => Some('\u{2190}'), // part
            _ => None,
        }
    }
}

/// An incoming event fills a background conversation's buffer; the UI drains
/// it in order and renders each message once.
#[test]
fn test_receive_then_drain_and_render() {
    let mut conv = Conversation::channel("#Rust");
    assert_eq!(conv.name(), "#rust");

    let ts = Local.with_ymd_and_hms(2024, 6, 1, 15, 5, 0).unwrap();

    let mut joined = Message::with_timestamp("alice joined", ts);
    joined.set_icon(IconId(1));
    joined.set_color(MessageColor::Green);
    conv.add_message(joined);

    let chat = Message::with_timestamp("hello everyone", ts);
    conv.add_message(chat);

    conv.set_status(ConversationStatus::Message);
    assert_eq!(conv.status(), ConversationStatus::Message);

    // UI side: drain and render.
    let settings = DisplaySettings::default();
    let mut lines = Vec::new();
    while conv.has_buffered_messages() {
        let mut msg = conv.poll_buffered_message().unwrap();
        lines.push(msg.render(&settings, &EventIcons).plain_text());
    }

    assert_eq!(
        lines,
        vec!["\u{2192} [15:05] alice joined", "[15:05] hello everyone"]
    );

    // Both messages stay browsable in history.
    assert_eq!(conv.history().len(), 2);
    assert_eq!(conv.history_message(0).unwrap().text(), "alice joined");
}

/// Status precedence across a select/receive/highlight/deselect cycle.
#[test]
fn test_status_precedence_over_session() {
    let mut conv = Conversation::query("Alice");

    // User opens the conversation.
    conv.set_status(ConversationStatus::Selected);

    // Messages arriving while it is open must not downgrade it.
    conv.set_status(ConversationStatus::Message);
    conv.set_status(ConversationStatus::Highlight);
    assert_eq!(conv.status(), ConversationStatus::Selected);

    // User switches away, then gets mentioned.
    conv.set_status(ConversationStatus::Default);
    conv.set_status(ConversationStatus::Highlight);

    // A plain unread marker must not clear the highlight.
    conv.set_status(ConversationStatus::Message);
    assert_eq!(conv.status(), ConversationStatus::Highlight);

    // Re-opening the conversation does.
    conv.set_status(ConversationStatus::Selected);
    assert_eq!(conv.status(), ConversationStatus::Selected);
}

/// A busy channel: buffer cleared on open, history capped for scroll-back.
#[test]
fn test_busy_channel_buffer_and_history() {
    let mut conv = Conversation::channel("#flood");

    for i in 0..100 {
        conv.add_message(Message::new(format!("line {}", i)));
    }

    // The UI opens the conversation and discards the backlog.
    conv.clear_buffer();
    assert!(!conv.has_buffered_messages());

    // Scroll-back still shows the most recent HISTORY_SIZE lines.
    assert_eq!(conv.history().len(), HISTORY_SIZE);
    assert_eq!(conv.history_message(0).unwrap().text(), "line 70");
    assert_eq!(
        conv.history_message(HISTORY_SIZE - 1).unwrap().text(),
        "line 99"
    );
}

/// A conversation list keyed by name, the way the client state holds it.
#[test]
fn test_conversation_list_by_name() {
    let mut conversations: HashMap<String, Conversation> = HashMap::new();

    for conv in [
        Conversation::server("irc.libera.chat"),
        Conversation::channel("#rust"),
        Conversation::query("alice"),
    ] {
        conversations.insert(conv.name().to_string(), conv);
    }

    assert_eq!(conversations.len(), 3);
    assert_eq!(
        conversations["#rust"].kind(),
        ConversationKind::Channel
    );
    assert_eq!(conversations["alice"].kind(), ConversationKind::Query);

    conversations
        .get_mut("#rust")
        .unwrap()
        .add_message(Message::new("hi"));
    assert!(conversations["#rust"].has_buffered_messages());
    assert!(!conversations["alice"].has_buffered_messages());
}

/// Settings changes between renders: span content is frozen by the cache,
/// widget-level font size is not.
#[test]
fn test_settings_change_between_renders() {
    let ts = Local.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    let mut msg = Message::with_timestamp("cached forever", ts);

    let initial = DisplaySettings::default();
    let first = msg.render(&initial, &EventIcons).clone();
    assert_eq!(first.plain_text(), "[09:30] cached forever");

    let changed = DisplaySettings {
        show_timestamp: false,
        font_size: 20.0,
        ..initial
    };
    let second = msg.render(&changed, &EventIcons).clone();
    assert_eq!(first, second);

    let job = msg.render_layout_job(&changed, &EventIcons);
    assert_eq!(job.text, "[09:30] cached forever");
    assert_eq!(
        job.sections[0].format.font_id,
        egui::FontId::monospace(20.0)
    );
}
