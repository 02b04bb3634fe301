//! Cache management for server roster data.
//!
//! Lets the console replay a previously fetched roster (and lets tests run
//! entirely from fixture files) instead of hitting the backend each run.

use super::client::{ApiClient, ServerData};
use std::error::Error;
use std::path::Path;

/// Read server data from a cache file.
///
/// # Arguments
/// * `cache_file` - Path to the cache file, which must exist
///
/// # Returns
/// * `Ok(ServerData)` - The parsed roster
/// * `Err` - If the file is missing or does not parse
pub fn read_server_cache(cache_file: &str) -> Result<ServerData, Box<dyn Error>> {
    if !Path::new(cache_file).exists() {
        return Err(format!("Cache file does not exist: {cache_file}").into());
    }
    log::info!("Reading from cache file: {cache_file}");
    let json = std::fs::read_to_string(cache_file)
        .map_err(|e| format!("Error reading cache file {cache_file}: {e}"))?;
    let data =
        serde_json::from_str(&json).map_err(|e| format!("Error parsing cache JSON: {e}"))?;
    Ok(data)
}

/// Load the server roster from cache, fetching from the backend on a miss.
///
/// # Arguments
/// * `api` - Client used when the cache misses
/// * `cache_file` - Optional path to a specific cache file. If None, uses default dated naming.
pub async fn load_servers(
    api: &ApiClient,
    cache_file: Option<&str>,
) -> Result<ServerData, Box<dyn Error>> {
    let now = chrono::Utc::now();

    let cache_file = match cache_file {
        Some(file) => {
            log::info!("Using provided cache file: {file}");
            return read_server_cache(file);
        }
        None => format!("server_cache_{}.json", now.format("%Y-%m-%d")),
    };

    let data = match read_server_cache(&cache_file) {
        Ok(data) => data,
        Err(_) => {
            log::warn!("Cache file not found: {cache_file}");
            let data = api.fetch_servers().await?;
            log::info!("Fetched {} servers from API", data.data.len());

            let json =
                serde_json::to_string(&data).map_err(|e| format!("Error serializing JSON: {e}"))?;
            log::warn!("Writing data to cache file: {cache_file}");
            std::fs::write(&cache_file, json)
                .map_err(|e| format!("Error writing cache file {cache_file}: {e}"))?;
            data
        }
    };

    Ok(data)
}
