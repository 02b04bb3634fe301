//! Client-local lobby view state.
//!
//! The server owns the lobby; the client only mirrors it. Join broadcasts
//! replace the whole lobby, chat frames append to a local history that is
//! read out most-recent-first for display.

use super::message::{
    Envelope, ErrResponsePayload, JoinedLobbyPayload, Lobby, MsgType, UserMessage,
};

/// Everything the lobby screen shows: the current lobby roster and the
/// accumulated chat/system history. Discarded when the view goes away.
#[derive(Debug, Default)]
pub struct LobbyView {
    pub lobby: Lobby,
    history: Vec<UserMessage>,
}

impl LobbyView {
    pub fn new() -> LobbyView {
        LobbyView::default()
    }

    /// Dispatch one inbound envelope, in delivery order.
    ///
    /// Join broadcasts replace the lobby wholesale (no merge), chat frames
    /// append, error responses become system lines, anything unrecognized
    /// is logged and dropped.
    pub fn apply(&mut self, envelope: &Envelope) {
        match MsgType::from_code(envelope.msg_type) {
            Some(MsgType::JoinLobbySuccess) => {
                match serde_json::from_value::<JoinedLobbyPayload>(envelope.payload.clone()) {
                    Ok(joined) => {
                        log::info!(
                            "Joined lobby {} with {} clients",
                            joined.lobby.lobby_id,
                            joined.lobby.clients.len()
                        );
                        self.lobby = joined.lobby;
                    }
                    Err(e) => log::warn!("Dropping malformed join payload: {e}"),
                }
            }
            Some(MsgType::SendMsgRequest) => {
                match serde_json::from_value::<UserMessage>(envelope.payload.clone()) {
                    Ok(msg) => self.history.push(msg),
                    Err(e) => log::warn!("Dropping malformed chat payload: {e}"),
                }
            }
            Some(MsgType::ErrResponse) => {
                match serde_json::from_value::<ErrResponsePayload>(envelope.payload.clone()) {
                    Ok(err) => self.log_event(&err.error),
                    Err(e) => log::warn!("Dropping malformed error payload: {e}"),
                }
            }
            Some(other) => {
                // Request-direction frames are never expected inbound
                log::debug!("Ignoring inbound request frame: {other:?}");
            }
            None => {
                log::warn!("Dropping unknown msg_type {}", envelope.msg_type);
            }
        }
    }

    /// Append a locally generated system line (open/close/error events).
    pub fn log_event(&mut self, text: &str) {
        self.history.push(UserMessage::now(text));
    }

    /// Number of accumulated history lines.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The most recently appended line, if any.
    pub fn latest(&self) -> Option<&UserMessage> {
        self.history.last()
    }

    /// History for display, most recent first. The stored order stays
    /// delivery order; only the read-out is reversed.
    pub fn render_history(&self) -> Vec<&UserMessage> {
        self.history.iter().rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lobby::message::{chat_message, LobbyMember};
    use crate::models::UserProfile;

    fn join_envelope(lobby_id: &str, names: &[&str]) -> Envelope {
        let lobby = Lobby {
            lobby_id: lobby_id.to_string(),
            clients: names
                .iter()
                .enumerate()
                .map(|(i, name)| LobbyMember {
                    leader: i == 0,
                    user: UserProfile::new(&format!("7656119{i}"), name),
                })
                .collect(),
        };
        Envelope::new(MsgType::JoinLobbySuccess, JoinedLobbyPayload { lobby }).unwrap()
    }

    #[test]
    fn test_join_replaces_lobby_wholesale() {
        let mut view = LobbyView::new();
        view.apply(&join_envelope("aaa111", &["alice", "bob"]));
        assert_eq!(view.lobby.lobby_id, "aaa111");
        assert_eq!(view.lobby.clients.len(), 2);

        view.apply(&join_envelope("bbb222", &["carol"]));
        assert_eq!(view.lobby.lobby_id, "bbb222");
        assert_eq!(view.lobby.clients.len(), 1, "Second join must not merge");
        assert_eq!(view.lobby.clients[0].user.name, "carol");
    }

    #[test]
    fn test_chat_messages_append_in_delivery_order() {
        let mut view = LobbyView::new();
        for text in ["one", "two", "three"] {
            view.apply(&chat_message(text).unwrap());
        }
        assert_eq!(view.history_len(), 3);
        assert_eq!(view.latest().unwrap().message, "three");

        let rendered: Vec<&str> = view
            .render_history()
            .iter()
            .map(|m| m.message.as_str())
            .collect();
        assert_eq!(rendered, vec!["three", "two", "one"]);
        // render does not reorder the stored history
        assert_eq!(view.latest().unwrap().message, "three");
    }

    #[test]
    fn test_unknown_msg_type_is_dropped() {
        let mut view = LobbyView::new();
        view.apply(&Envelope {
            msg_type: 42,
            payload: serde_json::json!({"anything": true}),
        });
        assert_eq!(view.history_len(), 0);
        assert_eq!(view.lobby, Lobby::default());
    }

    #[test]
    fn test_err_response_becomes_system_line() {
        let mut view = LobbyView::new();
        let env = Envelope::new(
            MsgType::ErrResponse,
            ErrResponsePayload {
                error: "Invalid lobby id".to_string(),
            },
        )
        .unwrap();
        view.apply(&env);
        assert_eq!(view.latest().unwrap().message, "Invalid lobby id");
    }

    #[test]
    fn test_malformed_payload_does_not_clobber_state() {
        let mut view = LobbyView::new();
        view.apply(&join_envelope("aaa111", &["alice"]));
        view.apply(&Envelope {
            msg_type: MsgType::JoinLobbySuccess.code(),
            payload: serde_json::json!("not an object"),
        });
        assert_eq!(view.lobby.lobby_id, "aaa111", "Bad payload must be dropped");
    }
}
