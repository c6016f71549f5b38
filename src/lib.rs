//! Data model for an IRC client UI.
//!
//! Holds the state behind the client's conversation list: per-conversation
//! message buffers and scroll-back history, attention status, and messages
//! that render themselves into styled, display-ready text. The protocol
//! layer pushes messages in; the UI layer drains buffers, browses history,
//! and asks messages for their rendered form.

pub mod conversation;
pub mod error;
pub mod message;
pub mod settings;

#[cfg(test)]
mod integration_tests;
