use anyhow::Result;

use crate::catalog::load_catalog;

/// Summarize the catalog against the household settings without planning.
pub fn check(config: crate::config::Config) -> Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;
    config.household.validate()?;

    println!("recipes: {}", catalog.len());

    for meal_type in config.household.meal_types.iter() {
        let tagged = catalog
            .iter()
            .filter(|recipe| recipe.is_tagged_for(*meal_type))
            .count();
        println!("  {:<9} {tagged} tagged", meal_type.to_string());
    }

    let skipped = config
        .household
        .slots()
        .filter(|slot| config.household.is_skipped(slot))
        .count();
    let to_fill = config.household.slot_count() - skipped;
    println!("slots to fill: {to_fill} ({skipped} skipped)");

    if config.household.repeat_policy == mealweek_shared::household::RepeatPolicy::NoRepeat
        && catalog.len() < to_fill
    {
        tracing::warn!(
            recipes = catalog.len(),
            slots = to_fill,
            "Catalog smaller than the week, recipes will repeat"
        );
    }

    Ok(())
}
