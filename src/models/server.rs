//! Game server roster entry as returned by the server query endpoint.

use serde::{Deserialize, Serialize};

/// A single game server row for the quickplay browser table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlimServer {
    /// Server id assigned by the backend.
    pub server_id: u32,
    /// Display name of the server.
    pub name: String,
    /// host:port the game client connects to.
    pub addr: String,
    /// Map currently being played.
    pub map: String,
    /// Current player count.
    pub players: u32,
    /// Player capacity.
    pub max_players: u32,
    /// Distance from the requesting user in km (0 when unknown).
    #[serde(default)]
    pub distance: f64,
    /// Game type tags used by the quickplay filters.
    #[serde(default)]
    pub game_types: Vec<String>,
}

impl SlimServer {
    /// A server is full when no player slot remains.
    pub fn is_full(&self) -> bool {
        self.players >= self.max_players
    }
}

impl Default for SlimServer {
    fn default() -> Self {
        SlimServer {
            server_id: 0,
            name: "".to_string(),
            addr: "".to_string(),
            map: "".to_string(),
            players: 0,
            max_players: 24,
            distance: 0.0,
            game_types: vec![],
        }
    }
}
