//! Terminal output utilities.
//!
//! Formatting helpers plus the server table and flash rendering.

use crate::flash::{FlashBus, FlashLevel};
use crate::lobby::UserMessage;
use crate::models::SlimServer;
use colored::Colorize;
use itertools::Itertools;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Print the server browser table.
pub fn print_servers(servers: &[SlimServer]) {
    println!(
        "{:<32} {:<22} {:<24} {:>7} {:>9}  {}",
        "name".bold(),
        "addr".bold(),
        "map".bold(),
        "players".bold(),
        "distance".bold(),
        "tags".bold()
    );
    for s in servers {
        let players = format!("{}/{}", s.players, s.max_players);
        let players = if s.is_full() {
            players.red().to_string()
        } else {
            players.green().to_string()
        };
        println!(
            "{:<32} {:<22} {:<24} {:>7} {:>7}km  {}",
            s.name,
            s.addr,
            s.map,
            players,
            s.distance.round() as i64,
            s.game_types.iter().join(", ")
        );
    }
}

/// Print and drain all pending flash notifications.
pub fn print_flashes(bus: &mut FlashBus) {
    for flash in bus.drain() {
        let label = match flash.level {
            FlashLevel::Success => "success".green(),
            FlashLevel::Info => "info".blue(),
            FlashLevel::Warn => "warn".yellow(),
            FlashLevel::Error => "error".red(),
        };
        println!("[{label}] {}", flash.message);
    }
}

/// Print one lobby history line.
pub fn print_lobby_line(msg: &UserMessage) {
    println!(
        "{} {}",
        msg.created_at.format("%H:%M:%S").to_string().dimmed(),
        msg.message
    );
}
