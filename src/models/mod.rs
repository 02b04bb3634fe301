//! Domain models for the moderation console.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 network range with CIDR notation support
//! - [`SlimServer`] - Game server roster entry
//! - [`UserProfile`] - Slim user profile embedded in lobby payloads

mod ipv4;
mod profile;
mod server;

// Re-export public types
pub use ipv4::{
    broadcast_addr, compute_host_count, get_cidr_mask, network_addr, Ipv4, MAX_LENGTH,
};
pub use profile::UserProfile;
pub use server::SlimServer;
