//! Quickplay lobby client.
//!
//! This module keeps the console attached to the backend's lobby endpoint:
//! - [`message`] - JSON envelope protocol and payload types
//! - [`state`] - Client-local lobby view and message history
//! - [`client`] - WebSocket connection with backoff reconnect

pub mod message;

mod client;
mod state;

// Re-export public types and functions
pub use client::{base_delay, lobby_url, reconnect_delay, LobbyConnection, LobbyEvent};
pub use message::{
    chat_message, join_lobby_request, leave_lobby_request, Envelope, ErrResponsePayload,
    JoinLobbyPayload, JoinedLobbyPayload, Lobby, LobbyMember, MsgType, UserMessage,
};
pub use state::LobbyView;
