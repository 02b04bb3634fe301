//! Runtime configuration.
//!
//! Constants fixed by the backend protocol plus the environment lookups
//! for the deployment-specific bits (.env is loaded in main via dotenv).

/// Lobby ids handed out by the backend are always this long.
pub const LOBBY_ID_LEN: usize = 6;

/// WebSocket path of the quickplay lobby endpoint.
pub const WS_PATH: &str = "/ws/quickplay";

/// How many pending flash notifications to keep before dropping the oldest.
pub const FLASH_CAPACITY: usize = 5;

/// First reconnect delay in milliseconds.
pub const RECONNECT_BASE_MS: u64 = 500;

/// Ceiling for the reconnect delay in milliseconds.
pub const RECONNECT_CAP_MS: u64 = 30_000;

/// Reconnect attempts before giving up on the lobby.
pub const RECONNECT_MAX_ATTEMPTS: u32 = 10;

/// Base URL of the backend API.
pub fn api_base_url() -> String {
    std::env::var("GBANS_API_URL").unwrap_or_else(|_| "http://localhost:6006".to_string())
}

/// Bearer token for the backend API and the lobby socket.
pub fn api_token() -> String {
    std::env::var("GBANS_TOKEN").unwrap_or_default()
}
