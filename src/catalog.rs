use std::path::Path;

use anyhow::Context;
use mealweek_shared::RecipeCatalog;

/// Read and validate a JSON recipe file.
#[tracing::instrument]
pub fn load_catalog(path: &Path) -> anyhow::Result<RecipeCatalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read recipe catalog {}", path.display()))?;

    let catalog = RecipeCatalog::from_json(&json)
        .with_context(|| format!("invalid recipe catalog {}", path.display()))?;

    tracing::info!(recipes = catalog.len(), "Recipe catalog loaded");

    Ok(catalog)
}
