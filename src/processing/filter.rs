//! Quickplay server browser filters.
//!
//! Mirrors the filter controls above the server table: hide full
//! servers, player count bounds, and game type tags.

use crate::models::SlimServer;
use itertools::Itertools;

/// Filter settings for the server browser. Zero player bounds mean
/// "no bound", an empty game type list matches everything.
#[derive(Debug, Clone, Default)]
pub struct ServerFilters {
    pub not_full: bool,
    pub min_players: u32,
    pub max_players: u32,
    pub game_types: Vec<String>,
}

/// Apply the browser filters, returning the matching servers in input order.
pub fn filter_servers(servers: &[SlimServer], filters: &ServerFilters) -> Vec<SlimServer> {
    servers
        .iter()
        .filter(|s| !(filters.not_full && s.is_full()))
        .filter(|s| filters.min_players == 0 || s.players >= filters.min_players)
        .filter(|s| filters.max_players == 0 || s.players <= filters.max_players)
        .filter(|s| {
            filters.game_types.is_empty()
                || s.game_types.iter().any(|t| filters.game_types.contains(t))
        })
        .cloned()
        .collect_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(name: &str, players: u32, max_players: u32, tags: &[&str]) -> SlimServer {
        SlimServer {
            name: name.to_string(),
            players,
            max_players,
            game_types: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    fn servers() -> Vec<SlimServer> {
        vec![
            server("empty", 0, 24, &["pl"]),
            server("busy", 20, 24, &["koth"]),
            server("full", 24, 24, &["pl"]),
        ]
    }

    #[test]
    fn test_default_filters_match_everything() {
        let result = filter_servers(&servers(), &ServerFilters::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_not_full_drops_full_servers() {
        let filters = ServerFilters {
            not_full: true,
            ..Default::default()
        };
        let result = filter_servers(&servers(), &filters);
        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "busy"]);
    }

    #[test]
    fn test_player_bounds() {
        let filters = ServerFilters {
            min_players: 1,
            max_players: 23,
            ..Default::default()
        };
        let result = filter_servers(&servers(), &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "busy");
    }

    #[test]
    fn test_game_type_tags() {
        let filters = ServerFilters {
            game_types: vec!["pl".to_string()],
            ..Default::default()
        };
        let result = filter_servers(&servers(), &filters);
        let names: Vec<&str> = result.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["empty", "full"]);
    }
}
