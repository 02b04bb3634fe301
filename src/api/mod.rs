//! Backend HTTP API interaction.
//!
//! This module handles all traffic to the gbans REST API:
//! - [`client`] - Authenticated JSON client and list envelope parsing
//! - [`cache`] - Caching of fetched rosters
//! - [`slot`] - Stale response protection for view state

mod cache;
mod client;
mod slot;

// Re-export public types and functions
pub use cache::{load_servers, read_server_cache};
pub use client::{parse_list, ApiClient, ListResponse, ServerData};
pub use slot::FetchSlot;
