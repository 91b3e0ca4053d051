use std::collections::BTreeMap;

use mealweek_shared::household::{HouseholdConfig, MealSlot, RepeatPolicy};
use mealweek_shared::mealplan::{Advisory, DayPlan, MealSource, PlannedMeal, Slot, WeeklyPlan};
use mealweek_shared::recipe::{Nutrition, Recipe};
use mealweek_shared::{Error, RecipeCatalog, Result};
use rand::Rng;

use crate::nutrition::NutritionAggregator;
use crate::rotation::RotationState;

/// Below this share of the daily limit, every fitting candidate is equally likely.
pub const COMFORT_THRESHOLD: f64 = 0.5;

/// Exponent applied to calorie weights once the day's total reaches the limit.
const MAX_STEEPNESS: f64 = 6.0;

/// Keeps over-budget-but-fitting candidates selectable.
const WEIGHT_FLOOR: f64 = 0.05;

pub struct PlanGenerator<'a> {
    catalog: &'a RecipeCatalog,
    config: &'a HouseholdConfig,
}

enum Pick<'a> {
    Fits(&'a Recipe),
    Fallback(&'a Recipe),
    Reused(&'a Recipe),
}

impl<'a> PlanGenerator<'a> {
    pub fn new(catalog: &'a RecipeCatalog, config: &'a HouseholdConfig) -> Self {
        Self { catalog, config }
    }

    #[tracing::instrument(skip_all, fields(recipes = self.catalog.len(), slots = self.config.slot_count()))]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<WeeklyPlan> {
        if self.catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        self.config.validate()?;

        tracing::info!("Generating weekly plan");

        let mut rotation = RotationState::new();
        let mut plan = WeeklyPlan {
            days: Vec::with_capacity(self.config.days.len()),
            daily_calorie_limit: self.config.daily_calorie_limit,
            advisories: vec![],
        };

        for day in self.config.days.iter() {
            let mut running = Nutrition::default();
            let mut slots = BTreeMap::new();

            for meal_type in self.config.meal_types.iter() {
                let slot = MealSlot::new(*day, *meal_type);

                if self.config.is_skipped(&slot) {
                    tracing::debug!(%slot, "Slot skipped");
                    slots.insert(*meal_type, Slot::Skipped);
                    continue;
                }

                let portions = self.config.portions_for(*meal_type);
                let recipe = match self.pick(slot, portions, running.calories, &mut rotation, rng)? {
                    Pick::Fits(recipe) => recipe,
                    Pick::Fallback(recipe) => {
                        tracing::warn!(
                            %slot,
                            recipe_id = %recipe.id,
                            "No recipe fits the calorie budget, using the lowest-calorie one"
                        );
                        recipe
                    }
                    Pick::Reused(recipe) => {
                        tracing::warn!(
                            %slot,
                            recipe_id = %recipe.id,
                            "Catalog exhausted, reusing least recently used recipe"
                        );
                        plan.advisories.push(Advisory::RepeatRelaxed {
                            slot,
                            recipe_id: recipe.id.to_owned(),
                        });
                        recipe
                    }
                };

                rotation.mark_recipe_used(&recipe.id);
                running += &NutritionAggregator::meal_contribution(recipe, portions);

                tracing::debug!(%slot, recipe_id = %recipe.id, portions, "Slot planned");

                slots.insert(
                    *meal_type,
                    Slot::Planned(PlannedMeal {
                        day: *day,
                        meal_type: *meal_type,
                        recipe_id: recipe.id.to_owned(),
                        portions,
                        source: MealSource::Fresh,
                    }),
                );
            }

            if let Some(limit) = self.config.daily_calorie_limit
                && running.calories > limit
            {
                plan.advisories.push(Advisory::CalorieLimitExceeded {
                    day: *day,
                    calories: running.calories,
                    limit,
                });
            }

            plan.days.push(DayPlan { day: *day, slots });
        }

        tracing::info!(
            planned = plan.meals().count(),
            advisories = plan.advisories.len(),
            "Weekly plan generated"
        );

        Ok(plan)
    }

    fn pick<R: Rng + ?Sized>(
        &self,
        slot: MealSlot,
        portions: f64,
        running_calories: f64,
        rotation: &mut RotationState,
        rng: &mut R,
    ) -> Result<Pick<'a>> {
        let catalog = self.catalog;

        let unused: Vec<&'a Recipe> = match self.config.repeat_policy {
            RepeatPolicy::AllowRepeats => catalog.iter().collect(),
            RepeatPolicy::NoRepeat => catalog
                .iter()
                .filter(|r| !rotation.is_recipe_used(&r.id))
                .collect(),
        };

        if unused.is_empty() {
            let Some(id) = rotation.reuse_least_recent() else {
                return Err(Error::EmptyCatalog);
            };

            return Ok(Pick::Reused(catalog.require(&id)?));
        }

        let tagged: Vec<&'a Recipe> = unused
            .iter()
            .copied()
            .filter(|r| r.is_tagged_for(slot.meal_type))
            .collect();
        let has_tagged = !tagged.is_empty();
        let preferred = if has_tagged { tagged } else { unused.clone() };

        let Some(limit) = self.config.daily_calorie_limit else {
            return Ok(Pick::Fits(uniform(&preferred, rng)));
        };

        let mut budget = limit - running_calories;
        if let Some(share) = self.config.calorie_share(slot.meal_type) {
            budget = budget.min(share);
        }

        let fits = |r: &&Recipe| {
            let calories = r.calories() * portions;
            calories == 0.0 || calories <= budget
        };

        let mut fitting: Vec<&'a Recipe> = preferred.iter().copied().filter(fits).collect();

        if fitting.is_empty() && has_tagged {
            tracing::debug!(%slot, "No tagged recipe fits, widening to untagged recipes");
            fitting = unused
                .iter()
                .copied()
                .filter(|r| r.is_generic())
                .filter(fits)
                .collect();
        }

        if fitting.is_empty() {
            let lowest = unused
                .iter()
                .copied()
                .min_by(|a, b| {
                    a.calories()
                        .total_cmp(&b.calories())
                        .then_with(|| a.id.cmp(&b.id))
                })
                .ok_or(Error::EmptyCatalog)?;

            return Ok(Pick::Fallback(lowest));
        }

        let pressure = running_calories / limit;
        if pressure < COMFORT_THRESHOLD || budget <= 0.0 {
            return Ok(Pick::Fits(uniform(&fitting, rng)));
        }

        let steepness = (pressure.min(1.0) - COMFORT_THRESHOLD) / (1.0 - COMFORT_THRESHOLD)
            * MAX_STEEPNESS;
        let weights: Vec<f64> = fitting
            .iter()
            .map(|r| {
                let headroom = (1.0 - r.calories() * portions / budget).max(0.0);
                (headroom + WEIGHT_FLOOR).powf(steepness)
            })
            .collect();

        Ok(Pick::Fits(weighted(&fitting, &weights, rng)))
    }
}

/// Fills every configured slot of the week. Same catalog, config and rng
/// seed always produce the same plan.
pub fn generate<R: Rng + ?Sized>(
    catalog: &RecipeCatalog,
    config: &HouseholdConfig,
    rng: &mut R,
) -> Result<WeeklyPlan> {
    PlanGenerator::new(catalog, config).generate(rng)
}

fn uniform<'a, R: Rng + ?Sized>(candidates: &[&'a Recipe], rng: &mut R) -> &'a Recipe {
    candidates[rng.random_range(0..candidates.len())]
}

fn weighted<'a, R: Rng + ?Sized>(
    candidates: &[&'a Recipe],
    weights: &[f64],
    rng: &mut R,
) -> &'a Recipe {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return uniform(candidates, rng);
    }

    let mut target = rng.random::<f64>() * total;
    for (recipe, weight) in candidates.iter().zip(weights.iter()) {
        if target < *weight {
            return recipe;
        }
        target -= weight;
    }

    candidates[candidates.len() - 1]
}
