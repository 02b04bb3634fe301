//! User profile model shared with the backend.

use serde::{Deserialize, Serialize};

/// Slim user profile as embedded in lobby and ban payloads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Steam id rendered as a string (64-bit ids overflow JSON numbers).
    pub steam_id: String,
    /// Persona name at time of connection.
    pub name: String,
    /// Avatar hash, when the profile has one.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserProfile {
    pub fn new(steam_id: &str, name: &str) -> UserProfile {
        UserProfile {
            steam_id: steam_id.to_string(),
            name: name.to_string(),
            avatar: None,
        }
    }
}

impl std::fmt::Display for UserProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.steam_id)
    }
}
