use crate::index::types::Item;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Accepted top-level layouts of an item file
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemFile {
    List(Vec<Item>),
    Wrapped { recipes: Vec<Item> },
}

/// Load the item collection from a JSON file.
///
/// The file is either an array of items or an object with a `recipes` array.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read item file {}", path.display()))?;
    parse_items(&content).with_context(|| format!("Invalid item file {}", path.display()))
}

/// Parse an item collection from JSON text
pub fn parse_items(content: &str) -> Result<Vec<Item>> {
    let file: ItemFile = serde_json::from_str(content).context("Failed to parse items")?;
    Ok(match file {
        ItemFile::List(items) => items,
        ItemFile::Wrapped { recipes } => recipes,
    })
}
