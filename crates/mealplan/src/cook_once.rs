use mealweek_shared::household::{Day, MealSlot, MealType};
use mealweek_shared::mealplan::{Advisory, MealSource, PlannedMeal, Slot, WeeklyPlan};
use mealweek_shared::{RecipeCatalog, Result};
use serde::{Deserialize, Serialize};

use crate::nutrition::NutritionAggregator;

/// Leftovers are never scheduled further out than this, whatever the recipe
/// says about storage.
pub const MAX_LEFTOVER_DAYS: u8 = 2;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CookOnceOptions {
    /// Portions packed for the adults' lunch.
    pub adult_portions: f64,
    /// Cap on derived meals (packed lunches plus leftovers) per cooked dinner.
    pub max_derived: usize,
}

impl Default for CookOnceOptions {
    fn default() -> Self {
        Self {
            adult_portions: 2.0,
            max_derived: 2,
        }
    }
}

/// Reuses cooked dinners across the week.
///
/// For every fresh dinner, in plan order:
/// - a recipe that packs well fills an empty or skipped lunch on the next
///   calendar day when both days are weekdays;
/// - a recipe that reheats well replaces the next fresh dinner (or fills an
///   empty one) within `min(stores_days, 2)` days, jumping over slots that
///   already hold a derived meal.
///
/// Derived meals never seed further derived meals. Only days already present
/// in the plan receive derived meals. Calorie limit advisories are rebuilt from
/// the resulting meals.
#[tracing::instrument(skip_all, fields(days = plan.days.len()))]
pub fn apply_cook_once(
    plan: &WeeklyPlan,
    catalog: &RecipeCatalog,
    options: &CookOnceOptions,
) -> Result<WeeklyPlan> {
    let mut result = plan.clone();

    let sources: Vec<PlannedMeal> = plan
        .meals()
        .filter(|m| m.meal_type == MealType::Dinner && m.source.is_fresh())
        .cloned()
        .collect();

    let mut derived_total = 0;

    for meal in sources.iter() {
        let still_fresh = result
            .get(meal.day, MealType::Dinner)
            .and_then(Slot::meal)
            .is_some_and(|m| m.source.is_fresh());

        if !still_fresh {
            continue;
        }

        let recipe = catalog.require(&meal.recipe_id)?;
        let from = meal.slot();
        let mut derived = 0;

        if derived < options.max_derived
            && recipe.packs_well_as_lunch
            && meal.day.is_weekday()
            && let Some(next_day) = meal.day.after(1)
            && next_day.is_weekday()
            && is_open(&result, next_day, MealType::Lunch)
            && place(
                &mut result,
                PlannedMeal {
                    day: next_day,
                    meal_type: MealType::Lunch,
                    recipe_id: recipe.id.to_owned(),
                    portions: options.adult_portions,
                    source: MealSource::PackedLunch { from },
                },
            )
        {
            tracing::debug!(%from, day = %next_day, recipe_id = %recipe.id, "Packed lunch added");
            derived += 1;
        }

        if derived < options.max_derived && recipe.reheats_well && recipe.stores_days >= 1 {
            let window = recipe.stores_days.min(MAX_LEFTOVER_DAYS) as usize;

            for offset in 1..=window {
                let Some(target_day) = meal.day.after(offset) else {
                    break;
                };

                let derived_here = result
                    .get(target_day, MealType::Dinner)
                    .and_then(Slot::meal)
                    .is_some_and(|m| !m.source.is_fresh());

                if derived_here {
                    continue;
                }

                let leftover = PlannedMeal {
                    day: target_day,
                    meal_type: MealType::Dinner,
                    recipe_id: recipe.id.to_owned(),
                    portions: meal.portions,
                    source: MealSource::Leftover { from },
                };

                if place(&mut result, leftover) {
                    tracing::debug!(%from, day = %target_day, recipe_id = %recipe.id, "Leftover dinner added");
                    derived += 1;
                    break;
                }
            }
        }

        derived_total += derived;
    }

    refresh_calorie_advisories(&mut result, catalog)?;

    tracing::info!(derived = derived_total, "Cook-once meals applied");

    Ok(result)
}

/// Replaces every `CalorieLimitExceeded` advisory with one per day whose
/// current total is over the limit, in plan day order.
fn refresh_calorie_advisories(plan: &mut WeeklyPlan, catalog: &RecipeCatalog) -> Result<()> {
    plan.advisories
        .retain(|a| !matches!(a, Advisory::CalorieLimitExceeded { .. }));

    let Some(limit) = plan.daily_calorie_limit else {
        return Ok(());
    };

    let daily = NutritionAggregator::daily_totals(plan, catalog)?;
    let exceeded: Vec<Advisory> = plan
        .days
        .iter()
        .filter_map(|d| {
            let calories = daily.get(&d.day)?.calories;

            (calories > limit).then_some(Advisory::CalorieLimitExceeded {
                day: d.day,
                calories,
                limit,
            })
        })
        .collect();

    plan.advisories.extend(exceeded);

    Ok(())
}

/// True when the slot has nothing planned: skipped or not configured.
fn is_open(plan: &WeeklyPlan, day: Day, meal_type: MealType) -> bool {
    plan.get(day, meal_type).is_none_or(Slot::is_skipped)
}

/// Writes `meal` into its slot. Returns false when the plan has no such day.
fn place(plan: &mut WeeklyPlan, meal: PlannedMeal) -> bool {
    let slot = MealSlot::new(meal.day, meal.meal_type);

    let Some(day_plan) = plan.days.iter_mut().find(|d| d.day == slot.day) else {
        return false;
    };

    day_plan.slots.insert(slot.meal_type, Slot::Planned(meal));

    true
}
