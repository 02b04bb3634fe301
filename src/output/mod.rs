//! Output formatting.
//!
//! This module handles rendering fetched data for the console:
//! - [`csv`] - CSV export
//! - [`terminal`] - Terminal tables with colors

mod csv;
mod terminal;

pub use csv::{server_print, servers_to_csv};
pub use terminal::{format_field, print_flashes, print_lobby_line, print_servers};
