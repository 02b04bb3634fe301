//! CSV export of the server table.
//!
//! Every field is emitted as a quoted, right-aligned column via
//! [`format_field`] so the raw file stays readable in a terminal.

use super::terminal::format_field;
use crate::api::ServerData;
use std::error::Error;

/// Render the server roster as CSV lines, header first.
pub fn servers_to_csv(data: &ServerData) -> Vec<String> {
    let mut lines = Vec::with_capacity(data.data.len() + 1);
    lines.push(format!(
        "{name},{addr},{map},{players},{max_players},{distance},{game_types}",
        name = format_field("name", 26),
        addr = format_field("addr", 20),
        map = format_field("map", 24),
        players = format_field("players", 9),
        max_players = format_field("max_players", 13),
        distance = format_field("distance", 10),
        game_types = format_field("game_types", 12),
    ));
    for s in &data.data {
        lines.push(format!(
            "{name},{addr},{map},{players},{max_players},{distance},{game_types}",
            name = format_field(&s.name, 26),
            addr = format_field(&s.addr, 20),
            map = format_field(&s.map, 24),
            players = format_field(s.players, 9),
            max_players = format_field(s.max_players, 13),
            distance = format_field(s.distance, 10),
            game_types = format_field(s.game_types.join(" "), 12),
        ));
    }
    lines
}

/// Print the server roster as CSV to stdout.
pub fn server_print(data: &ServerData) -> Result<(), Box<dyn Error>> {
    log::info!("# Got server count = {} == {}", data.count, data.data.len());
    for line in servers_to_csv(data) {
        println!("{line}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SlimServer;

    fn sample() -> ServerData {
        ServerData {
            data: vec![SlimServer {
                name: "us, west".to_string(),
                addr: "10.0.0.1:27015".to_string(),
                map: "pl_upward".to_string(),
                players: 3,
                max_players: 24,
                ..Default::default()
            }],
            count: 1,
        }
    }

    #[test]
    fn test_servers_to_csv_header_and_rows() {
        let lines = servers_to_csv(&sample());
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"name\""), "Header: {}", lines[0]);
        assert!(lines[1].contains("\"pl_upward\""), "Row: {}", lines[1]);
    }

    #[test]
    fn test_every_field_is_quoted() {
        let lines = servers_to_csv(&sample());
        for field in lines[1].split("\",") {
            let field = field.trim_start();
            assert!(
                field.starts_with('"'),
                "Field not quoted in row: {}",
                lines[1]
            );
        }
    }

    #[test]
    fn test_comma_in_name_stays_inside_one_quoted_field() {
        let lines = servers_to_csv(&sample());
        assert!(
            lines[1].contains("\"us, west\""),
            "Name with comma must stay quoted: {}",
            lines[1]
        );
    }
}
