pub mod api;
pub mod browser;
pub mod config;
pub mod flash;
pub mod lobby;
pub mod models;
pub mod output;
pub mod processing;

use api::ServerData;
use models::SlimServer;
use processing::{compare, stable_sort, Order};
use std::collections::HashSet;
use std::error::Error;

/// Read a cached server roster and return it sorted by name.
pub fn get_sorted_servers(cache_file: &str) -> Result<ServerData, Box<dyn Error>> {
    let mut data = api::read_server_cache(cache_file)?;
    data.data = stable_sort(
        &data.data,
        compare(Order::Asc, |s: &SlimServer| s.name.clone()),
    );
    Ok(data)
}

// return error if duplicate server addresses found
pub fn check_for_duplicate_servers(data: &ServerData) -> Result<(), Box<dyn Error>> {
    let mut seen = HashSet::new();

    for s in data.data.iter() {
        if !seen.insert(s.addr.clone()) {
            return Err(format!("Duplicate found: {:?}", s).into());
        }
    }
    Ok(())
}
