use std::collections::BTreeMap;

use serde::Deserialize;

use crate::recipe::{Recipe, RecipeRecord};
use crate::{Error, Result, malformed};

/// Read-only set of recipes available for planning, ordered by id.
#[derive(Clone, Debug, Default)]
pub struct RecipeCatalog {
    recipes: BTreeMap<String, Recipe>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { recipes: Vec<RecipeRecord> },
    Bare(Vec<RecipeRecord>),
}

impl RecipeCatalog {
    /// Builds a catalog from already-typed recipes, rejecting duplicate ids
    /// and recipes that would not survive the record validation.
    pub fn new(recipes: impl IntoIterator<Item = Recipe>) -> Result<Self> {
        let mut catalog = BTreeMap::new();

        for recipe in recipes {
            if recipe.id.trim().is_empty() {
                malformed!("<unknown>", "id must not be blank");
            }

            if !recipe.servings.is_finite() || recipe.servings <= 0.0 {
                malformed!(recipe.id, "servings must be positive, got {}", recipe.servings);
            }

            if catalog.contains_key(&recipe.id) {
                malformed!(recipe.id, "duplicate recipe id");
            }

            catalog.insert(recipe.id.to_owned(), recipe);
        }

        Ok(Self { recipes: catalog })
    }

    pub fn from_records(records: Vec<RecipeRecord>) -> Result<Self> {
        let recipes = records
            .into_iter()
            .map(Recipe::try_from)
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self::new(recipes)?;

        tracing::debug!(recipes = catalog.len(), "Recipe catalog validated");

        Ok(catalog)
    }

    /// Accepts either `{"recipes": [...]}` or a bare JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let records = match serde_json::from_str::<CatalogDocument>(json)? {
            CatalogDocument::Wrapped { recipes } => recipes,
            CatalogDocument::Bare(recipes) => recipes,
        };

        Self::from_records(records)
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    pub fn require(&self, id: &str) -> Result<&Recipe> {
        self.get(id)
            .ok_or_else(|| Error::RecipeNotFound(id.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.values()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
