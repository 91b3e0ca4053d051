use std::collections::BTreeMap;

use mealweek_shared::household::Day;
use mealweek_shared::mealplan::{PlannedMeal, WeeklyPlan};
use mealweek_shared::recipe::{Nutrition, Recipe};
use mealweek_shared::{RecipeCatalog, Result};
use serde::Serialize;

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct NutritionReport {
    pub daily: BTreeMap<Day, Nutrition>,
    pub weekly: Nutrition,
    pub average_daily: Nutrition,
    pub daily_calorie_limit: Option<f64>,
    /// Days whose household-scaled calories are over the limit.
    pub exceeded_days: Vec<Day>,
}

/// Sums per-serving nutrition over a plan. Never mutates its inputs.
pub struct NutritionAggregator;

impl NutritionAggregator {
    pub fn meal_contribution(recipe: &Recipe, portions: f64) -> Nutrition {
        recipe.nutrition.scaled(portions)
    }

    fn planned_meal(meal: &PlannedMeal, catalog: &RecipeCatalog) -> Result<Nutrition> {
        let recipe = catalog.require(&meal.recipe_id)?;

        Ok(Self::meal_contribution(recipe, meal.portions))
    }

    /// Totals per plan day. Days with only skipped slots are present with
    /// zero totals.
    pub fn daily_totals(
        plan: &WeeklyPlan,
        catalog: &RecipeCatalog,
    ) -> Result<BTreeMap<Day, Nutrition>> {
        let mut totals = BTreeMap::new();

        for day_plan in plan.days.iter() {
            let total: &mut Nutrition = totals.entry(day_plan.day).or_default();

            for meal in day_plan.slots.values().filter_map(|s| s.meal()) {
                *total += &Self::planned_meal(meal, catalog)?;
            }
        }

        Ok(totals)
    }

    pub fn weekly_totals(plan: &WeeklyPlan, catalog: &RecipeCatalog) -> Result<Nutrition> {
        let mut total = Nutrition::default();

        for meal in plan.meals() {
            total += &Self::planned_meal(meal, catalog)?;
        }

        Ok(total)
    }

    pub fn average_daily(plan: &WeeklyPlan, catalog: &RecipeCatalog) -> Result<Nutrition> {
        if plan.days.is_empty() {
            return Ok(Nutrition::default());
        }

        let weekly = Self::weekly_totals(plan, catalog)?;

        Ok(weekly.scaled(1.0 / plan.days.len() as f64))
    }

    #[tracing::instrument(skip_all, fields(days = plan.days.len()))]
    pub fn report(plan: &WeeklyPlan, catalog: &RecipeCatalog) -> Result<NutritionReport> {
        let daily = Self::daily_totals(plan, catalog)?;
        let weekly = Self::weekly_totals(plan, catalog)?;
        let average_daily = Self::average_daily(plan, catalog)?;

        let exceeded_days = match plan.daily_calorie_limit {
            Some(limit) => daily
                .iter()
                .filter(|(_, n)| n.calories > limit)
                .map(|(day, _)| *day)
                .collect(),
            None => vec![],
        };

        Ok(NutritionReport {
            daily,
            weekly,
            average_daily,
            daily_calorie_limit: plan.daily_calorie_limit,
            exceeded_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mealweek_shared::Error;
    use mealweek_shared::household::MealType;
    use mealweek_shared::mealplan::{DayPlan, MealSource, Slot};

    use super::*;

    fn recipe(id: &str, calories: f64, protein: f64) -> Recipe {
        Recipe {
            id: id.to_owned(),
            name: id.to_owned(),
            servings: 4.0,
            nutrition: Nutrition {
                calories,
                protein,
                extended: BTreeMap::from([("fiber".to_owned(), 2.0)]),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn meal(day: Day, meal_type: MealType, recipe_id: &str, portions: f64) -> Slot {
        Slot::Planned(PlannedMeal {
            day,
            meal_type,
            recipe_id: recipe_id.to_owned(),
            portions,
            source: MealSource::Fresh,
        })
    }

    fn plan() -> WeeklyPlan {
        WeeklyPlan {
            days: vec![
                DayPlan {
                    day: Day::Monday,
                    slots: BTreeMap::from([
                        (MealType::Lunch, meal(Day::Monday, MealType::Lunch, "a", 2.0)),
                        (MealType::Dinner, meal(Day::Monday, MealType::Dinner, "b", 2.0)),
                    ]),
                },
                DayPlan {
                    day: Day::Tuesday,
                    slots: BTreeMap::from([
                        (MealType::Lunch, Slot::Skipped),
                        (MealType::Dinner, meal(Day::Tuesday, MealType::Dinner, "a", 3.0)),
                    ]),
                },
            ],
            daily_calorie_limit: Some(1000.0),
            advisories: vec![],
        }
    }

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::new(vec![recipe("a", 200.0, 10.0), recipe("b", 400.0, 20.0)]).unwrap()
    }

    #[test]
    fn test_daily_totals_scale_by_portions() {
        let daily = NutritionAggregator::daily_totals(&plan(), &catalog()).unwrap();

        assert_eq!(daily[&Day::Monday].calories, 1200.0);
        assert_eq!(daily[&Day::Monday].protein, 60.0);
        assert_eq!(daily[&Day::Tuesday].calories, 600.0);
        assert_eq!(daily[&Day::Tuesday].extended["fiber"], 6.0);
    }

    #[test]
    fn test_weekly_equals_sum_of_daily() {
        let daily = NutritionAggregator::daily_totals(&plan(), &catalog()).unwrap();
        let weekly = NutritionAggregator::weekly_totals(&plan(), &catalog()).unwrap();

        let mut sum = Nutrition::default();
        for total in daily.values() {
            sum += total;
        }

        assert!(weekly.approx_eq(&sum, 1e-9));
    }

    #[test]
    fn test_report_flags_days_over_limit() {
        let report = NutritionAggregator::report(&plan(), &catalog()).unwrap();

        assert_eq!(report.exceeded_days, vec![Day::Monday]);
        assert_eq!(report.average_daily.calories, 900.0);
    }

    #[test]
    fn test_unknown_recipe_is_reported() {
        let catalog = RecipeCatalog::new(vec![recipe("a", 200.0, 10.0)]).unwrap();
        let err = NutritionAggregator::weekly_totals(&plan(), &catalog).unwrap_err();

        assert!(matches!(err, Error::RecipeNotFound(ref id) if id == "b"));
    }

    #[test]
    fn test_all_skipped_day_is_zero() {
        let plan = WeeklyPlan {
            days: vec![DayPlan {
                day: Day::Friday,
                slots: BTreeMap::from([(MealType::Dinner, Slot::Skipped)]),
            }],
            ..Default::default()
        };

        let daily = NutritionAggregator::daily_totals(&plan, &catalog()).unwrap();
        assert_eq!(daily[&Day::Friday], Nutrition::default());
    }
}
