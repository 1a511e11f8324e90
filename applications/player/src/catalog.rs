/// Episode catalog files
///
/// A catalog is JSON: either a bare array of episodes or an object with an
/// `episodes` array. Field names follow the feed format (`thumbnail`,
/// `duration`, `url`) or the camelCase names.
use crate::error::{PlayerError, Result};
use podcastr_playback::Episode;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    List(Vec<Episode>),
    Feed { episodes: Vec<Episode> },
}

/// Read and parse a catalog, rejecting empty ones
pub fn load_catalog(path: &Path) -> Result<Vec<Episode>> {
    let contents = std::fs::read_to_string(path)?;
    let episodes = parse_catalog(&contents)?;

    debug!("Loaded {} episodes from {}", episodes.len(), path.display());
    Ok(episodes)
}

/// Parse catalog JSON
pub fn parse_catalog(contents: &str) -> Result<Vec<Episode>> {
    let episodes = match serde_json::from_str::<CatalogFile>(contents)? {
        CatalogFile::List(episodes) | CatalogFile::Feed { episodes } => episodes,
    };

    if episodes.is_empty() {
        return Err(PlayerError::Catalog("catalog has no episodes".to_string()));
    }

    Ok(episodes)
}
