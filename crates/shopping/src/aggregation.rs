use std::collections::HashMap;

use mealweek_shared::mealplan::WeeklyPlan;
use mealweek_shared::{RecipeCatalog, Result};

use crate::categorization::{CategorizationService, Category};
use crate::exclusion::ExclusionFilter;
use crate::list::{ItemKey, Quantity, ShoppingList, ShoppingListItem};
use crate::units::normalize_unit;

struct Entry {
    total: Option<f64>,
    category: Category,
    recipe_ids: Vec<String>,
}

/// Shopping List Builder
///
/// Stateless service that scales every planned meal's ingredients to the
/// planned portions, merges them by (name, unit) and sorts the result by
/// category then name. Building twice from the same plan gives the same list.
#[derive(Debug, Clone, Default)]
pub struct ShoppingListBuilder {
    exclusions: ExclusionFilter,
}

impl ShoppingListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionFilter) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Case-folded, whitespace-trimmed item name.
    pub fn normalize_name(name: &str) -> String {
        name.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    #[tracing::instrument(skip_all, fields(meals = plan.meals().count()))]
    pub fn build(&self, plan: &WeeklyPlan, catalog: &RecipeCatalog) -> Result<ShoppingList> {
        let mut groups: HashMap<ItemKey, Entry> = HashMap::new();
        let mut excluded = 0;

        for meal in plan.meals() {
            let recipe = catalog.require(&meal.recipe_id)?;
            let scale = meal.portions / recipe.servings;

            for ingredient in recipe.ingredients.iter() {
                let name = Self::normalize_name(&ingredient.item);

                if name.is_empty() {
                    tracing::warn!(recipe_id = %recipe.id, "Skipping ingredient with blank name");
                    continue;
                }

                if self.exclusions.is_excluded(&name) {
                    excluded += 1;
                    continue;
                }

                let key = ItemKey {
                    name,
                    unit: normalize_unit(ingredient.unit.as_deref()),
                };

                let entry = groups.entry(key).or_insert_with_key(|key| Entry {
                    total: None,
                    category: CategorizationService::resolve(
                        ingredient.category.as_deref(),
                        &key.name,
                    ),
                    recipe_ids: vec![],
                });

                // An absent quantity never erases a numeric total.
                if let Some(quantity) = ingredient.quantity {
                    *entry.total.get_or_insert(0.0) += quantity * scale;
                }

                if !entry.recipe_ids.contains(&recipe.id) {
                    entry.recipe_ids.push(recipe.id.to_owned());
                }
            }
        }

        let mut items: Vec<ShoppingListItem> = groups
            .into_iter()
            .map(|(key, entry)| ShoppingListItem {
                name: key.name,
                unit: key.unit,
                quantity: entry.total.map_or(Quantity::Unspecified, Quantity::Amount),
                category: entry.category,
                recipe_ids: entry.recipe_ids,
            })
            .collect();

        items.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.unit.cmp(&b.unit))
        });

        tracing::info!(items = items.len(), excluded, "Shopping list built");

        Ok(ShoppingList { items })
    }
}

/// Builds the shopping list for `plan` without exclusions.
pub fn build(plan: &WeeklyPlan, catalog: &RecipeCatalog) -> Result<ShoppingList> {
    ShoppingListBuilder::new().build(plan, catalog)
}
