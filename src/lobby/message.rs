//! Quickplay lobby wire protocol.
//!
//! Every frame is a JSON envelope `{ "msg_type": <int>, "payload": {...} }`,
//! used in both directions. The integer discriminants are fixed by the
//! backend and must not be renumbered.

use crate::config;
use crate::models::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Known message discriminants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MsgType {
    JoinLobbyRequest,
    LeaveLobbyRequest,
    JoinLobbySuccess,
    SendMsgRequest,
    ErrResponse,
}

impl MsgType {
    /// Wire code for this discriminant.
    pub fn code(self) -> i32 {
        match self {
            MsgType::JoinLobbyRequest => 0,
            MsgType::LeaveLobbyRequest => 1,
            MsgType::JoinLobbySuccess => 2,
            MsgType::SendMsgRequest => 3,
            MsgType::ErrResponse => 4,
        }
    }

    /// Map a wire code back to a discriminant. Unknown codes yield None
    /// and are logged and dropped by the dispatcher.
    pub fn from_code(code: i32) -> Option<MsgType> {
        match code {
            0 => Some(MsgType::JoinLobbyRequest),
            1 => Some(MsgType::LeaveLobbyRequest),
            2 => Some(MsgType::JoinLobbySuccess),
            3 => Some(MsgType::SendMsgRequest),
            4 => Some(MsgType::ErrResponse),
            _ => None,
        }
    }
}

/// Type-tagged JSON envelope carried on the socket in both directions.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Envelope {
    pub msg_type: i32,
    pub payload: serde_json::Value,
}

impl Envelope {
    /// Wrap a payload under the given discriminant.
    pub fn new(msg_type: MsgType, payload: impl Serialize) -> Result<Envelope, Box<dyn Error>> {
        Ok(Envelope {
            msg_type: msg_type.code(),
            payload: serde_json::to_value(payload)
                .map_err(|e| format!("Error serializing payload: {e}"))?,
        })
    }
}

/// A chat or system line in the lobby, also the outbound chat payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserMessage {
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl UserMessage {
    /// A message stamped with the current time.
    pub fn now(message: &str) -> UserMessage {
        UserMessage {
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// A connected lobby member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LobbyMember {
    #[serde(default)]
    pub leader: bool,
    pub user: UserProfile,
}

/// Lobby state as broadcast by the server. An empty `lobby_id` means
/// "no lobby".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Lobby {
    pub lobby_id: String,
    #[serde(default)]
    pub clients: Vec<LobbyMember>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JoinLobbyPayload {
    pub lobby_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JoinedLobbyPayload {
    pub lobby: Lobby,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrResponsePayload {
    pub error: String,
}

/// Build a join request for a lobby id, rejecting malformed ids before
/// they reach the wire.
pub fn join_lobby_request(lobby_id: &str) -> Result<Envelope, Box<dyn Error>> {
    if lobby_id.len() != config::LOBBY_ID_LEN {
        return Err(format!("Invalid lobby id: {lobby_id}").into());
    }
    Envelope::new(
        MsgType::JoinLobbyRequest,
        JoinLobbyPayload {
            lobby_id: lobby_id.to_string(),
        },
    )
}

/// Build a leave request for the current lobby.
pub fn leave_lobby_request(lobby_id: &str) -> Result<Envelope, Box<dyn Error>> {
    Envelope::new(
        MsgType::LeaveLobbyRequest,
        JoinLobbyPayload {
            lobby_id: lobby_id.to_string(),
        },
    )
}

/// Build an outbound chat message stamped with the current time.
pub fn chat_message(text: &str) -> Result<Envelope, Box<dyn Error>> {
    Envelope::new(MsgType::SendMsgRequest, UserMessage::now(text))
}
