use std::collections::HashSet;

use mealweek::catalog::load_catalog;
use mealweek::config::Config;
use mealweek::plan_week;
use mealweek::report::{render_plan, render_shopping_list};
use mealweek_shared::mealplan::MealSource;
use mealweek_shared::recipe::Nutrition;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_sample_week() -> anyhow::Result<()> {
    let config = Config::load(None)?;
    let catalog = load_catalog(&config.catalog.path)?;

    let output = plan_week(&config, &catalog, &mut StdRng::seed_from_u64(7))?;

    let ids: HashSet<_> = output.plan.meals().map(|m| m.recipe_id.as_str()).collect();
    assert_eq!(ids.len(), 7);
    assert!(output.plan.advisories.is_empty());
    assert!(output.nutrition.exceeded_days.is_empty());

    let mut summed = Nutrition::default();
    for totals in output.nutrition.daily.values() {
        summed += totals;
    }
    assert!(summed.approx_eq(&output.nutrition.weekly, 1e-6));

    assert!(!output.shopping_list.is_empty());
    assert!(
        output
            .shopping_list
            .iter()
            .all(|item| item.name != "water" && item.name != "salt")
    );

    Ok(())
}

#[test]
fn test_same_seed_same_week() -> anyhow::Result<()> {
    let config = Config::load(None)?;
    let catalog = load_catalog(&config.catalog.path)?;

    let first = plan_week(&config, &catalog, &mut StdRng::seed_from_u64(42))?;
    let second = plan_week(&config, &catalog, &mut StdRng::seed_from_u64(42))?;

    assert_eq!(first.plan, second.plan);
    assert_eq!(
        render_plan(&first.plan, &catalog),
        render_plan(&second.plan, &catalog)
    );
    assert_eq!(
        render_shopping_list(&first.shopping_list),
        render_shopping_list(&second.shopping_list)
    );

    Ok(())
}

#[test]
fn test_cook_once_week_reuses_a_dinner() -> anyhow::Result<()> {
    let mut config = Config::load(None)?;
    config.cook_once.enabled = true;
    let catalog = load_catalog(&config.catalog.path)?;

    let output = plan_week(&config, &catalog, &mut StdRng::seed_from_u64(3))?;

    assert_eq!(output.plan.meals().count(), 7);

    let leftover = output
        .plan
        .meals()
        .find(|m| matches!(m.source, MealSource::Leftover { .. }))
        .expect("at least one dinner should be a leftover");
    let MealSource::Leftover { from } = leftover.source else {
        unreachable!()
    };
    let source = output
        .plan
        .get(from.day, from.meal_type)
        .and_then(|slot| slot.meal())
        .expect("leftover source is planned");
    assert_eq!(source.recipe_id, leftover.recipe_id);
    assert!(source.source.is_fresh());

    Ok(())
}
