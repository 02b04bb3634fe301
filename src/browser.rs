//! Server browser view state.
//!
//! Ties the roster fetch, the quickplay filters, and the table sort into
//! one place. Every refresh goes through a generation guard so a slow
//! response can never clobber a newer one.

use crate::api::{self, ApiClient, FetchSlot, ServerData};
use crate::models::SlimServer;
use crate::processing::{compare, filter_servers, stable_sort, Order, ServerFilters};
use std::error::Error;

pub struct ServerBrowser {
    roster: FetchSlot<ServerData>,
    pub filters: ServerFilters,
    pub order: Order,
}

impl ServerBrowser {
    pub fn new() -> ServerBrowser {
        ServerBrowser {
            roster: FetchSlot::new(),
            filters: ServerFilters::default(),
            order: Order::Asc,
        }
    }

    /// Start a refresh, superseding any still in flight. Returns the
    /// generation to pass to [`ServerBrowser::apply`].
    pub fn begin_refresh(&mut self) -> u64 {
        self.roster.begin()
    }

    /// Apply a finished refresh. Stale generations are discarded and
    /// leave the current roster untouched.
    pub fn apply(&mut self, generation: u64, data: ServerData) -> bool {
        self.roster.complete(generation, data)
    }

    /// Fetch the roster (or replay it from a cache file) and apply it.
    pub async fn refresh(
        &mut self,
        client: &ApiClient,
        cache_file: Option<&str>,
    ) -> Result<(), Box<dyn Error>> {
        let generation = self.begin_refresh();
        let data = api::load_servers(client, cache_file).await?;
        if !self.apply(generation, data) {
            log::debug!("Roster refresh superseded, keeping the newer data");
        }
        Ok(())
    }

    /// The last applied roster, if any refresh has landed yet.
    pub fn data(&self) -> Option<&ServerData> {
        self.roster.get()
    }

    /// Rows for display: filtered, then stable-sorted by server name.
    pub fn rows(&self) -> Vec<SlimServer> {
        match self.roster.get() {
            Some(data) => {
                let rows = filter_servers(&data.data, &self.filters);
                stable_sort(&rows, compare(self.order, |s: &SlimServer| s.name.clone()))
            }
            None => Vec::new(),
        }
    }
}

impl Default for ServerBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> ServerData {
        ServerData {
            data: names
                .iter()
                .map(|n| SlimServer {
                    name: n.to_string(),
                    addr: format!("{n}:27015"),
                    ..Default::default()
                })
                .collect(),
            count: names.len() as i64,
        }
    }

    #[test]
    fn test_rows_empty_before_first_refresh() {
        let browser = ServerBrowser::new();
        assert!(browser.data().is_none());
        assert!(browser.rows().is_empty());
    }

    #[test]
    fn test_stale_refresh_is_discarded() {
        let mut browser = ServerBrowser::new();
        let old = browser.begin_refresh();
        let new = browser.begin_refresh();
        assert!(browser.apply(new, roster(&["bravo", "alpha"])));
        // Older refresh resolves after the newer one already landed
        assert!(!browser.apply(old, roster(&["stale"])));
        let names: Vec<String> = browser.rows().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["alpha", "bravo"]);
    }

    #[test]
    fn test_rows_apply_filters_and_order() {
        let mut browser = ServerBrowser::new();
        let generation = browser.begin_refresh();
        let mut data = roster(&["delta", "alpha", "charlie"]);
        data.data[0].players = 24;
        assert!(browser.apply(generation, data));

        browser.filters.not_full = true;
        browser.order = Order::Desc;
        let names: Vec<String> = browser.rows().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["charlie", "alpha"]);
    }
}
