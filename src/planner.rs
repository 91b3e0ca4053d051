use mealweek_mealplan::{NutritionAggregator, NutritionReport, apply_cook_once, generate};
use mealweek_shared::RecipeCatalog;
use mealweek_shared::mealplan::WeeklyPlan;
use mealweek_shopping::{ExclusionFilter, ShoppingList, ShoppingListBuilder};
use rand::Rng;
use serde::Serialize;

use crate::config::Config;

/// Everything produced for one week.
#[derive(Serialize, Debug, Clone)]
pub struct WeekOutput {
    pub plan: WeeklyPlan,
    pub nutrition: NutritionReport,
    pub shopping_list: ShoppingList,
}

/// Generate the plan, apply cook-once reuse when enabled, then derive the
/// nutrition report and the shopping list from the final plan.
#[tracing::instrument(skip_all, fields(recipes = catalog.len(), cook_once = config.cook_once.enabled))]
pub fn plan_week<R: Rng + ?Sized>(
    config: &Config,
    catalog: &RecipeCatalog,
    rng: &mut R,
) -> anyhow::Result<WeekOutput> {
    let mut plan = generate(catalog, &config.household, rng)?;

    if config.cook_once.enabled {
        plan = apply_cook_once(&plan, catalog, &config.cook_once.options())?;
    }

    let nutrition = NutritionAggregator::report(&plan, catalog)?;

    let exclusions = ExclusionFilter::new(&config.shopping.excluded_items)?;
    let shopping_list = ShoppingListBuilder::new()
        .with_exclusions(exclusions)
        .build(&plan, catalog)?;

    for advisory in plan.advisories.iter() {
        tracing::warn!(%advisory, "Plan advisory");
    }

    Ok(WeekOutput {
        plan,
        nutrition,
        shopping_list,
    })
}
