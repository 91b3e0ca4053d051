use std::fmt;

use mealweek_mealplan::NutritionReport;
use mealweek_shared::RecipeCatalog;
use mealweek_shared::mealplan::{MealSource, Slot, WeeklyPlan};
use mealweek_shared::recipe::Nutrition;
use mealweek_shopping::ShoppingList;

/// Day-by-day plan with recipe names resolved from the catalog.
pub struct PlanView<'a> {
    pub plan: &'a WeeklyPlan,
    pub catalog: &'a RecipeCatalog,
}

impl fmt::Display for PlanView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for day_plan in self.plan.days.iter() {
            writeln!(f, "{}", day_plan.day)?;

            for (meal_type, slot) in day_plan.slots.iter() {
                write!(f, "  {:<9} ", meal_type.to_string())?;

                let meal = match slot {
                    Slot::Skipped => {
                        writeln!(f, "-")?;
                        continue;
                    }
                    Slot::Planned(meal) => meal,
                };

                let name = self
                    .catalog
                    .get(&meal.recipe_id)
                    .map(|r| r.name.as_str())
                    .unwrap_or(meal.recipe_id.as_str());

                write!(f, "{name} x{}", meal.portions)?;

                match meal.source {
                    MealSource::Fresh => writeln!(f)?,
                    MealSource::Leftover { from } => writeln!(f, " (leftover from {from})")?,
                    MealSource::PackedLunch { from } => writeln!(f, " (packed from {from})")?,
                }
            }
        }

        if !self.plan.advisories.is_empty() {
            writeln!(f, "\nAdvisories")?;
            for advisory in self.plan.advisories.iter() {
                writeln!(f, "  {advisory}")?;
            }
        }

        Ok(())
    }
}

pub struct NutritionView<'a>(pub &'a NutritionReport);

impl fmt::Display for NutritionView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;

        writeln!(f, "Nutrition (kcal / protein / carbs / fat)")?;
        for (day, totals) in report.daily.iter() {
            nutrition_row(f, &day.to_string(), totals)?;
            if report.exceeded_days.contains(day) {
                write!(f, "  over limit")?;
            }
            writeln!(f)?;
        }

        nutrition_row(f, "week", &report.weekly)?;
        writeln!(f)?;
        nutrition_row(f, "average", &report.average_daily)?;
        writeln!(f)?;

        if let Some(limit) = report.daily_calorie_limit {
            writeln!(f, "  daily limit {limit:.0} kcal")?;
        }

        Ok(())
    }
}

fn nutrition_row(f: &mut fmt::Formatter<'_>, label: &str, totals: &Nutrition) -> fmt::Result {
    write!(
        f,
        "  {label:<9} {:>7.0} / {:>5.0}g / {:>5.0}g / {:>5.0}g",
        totals.calories, totals.protein, totals.carbs, totals.fat
    )
}

/// Shopping list as a checklist grouped under category headers.
pub struct ChecklistView<'a>(pub &'a ShoppingList);

impl fmt::Display for ChecklistView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (category, items) in self.0.by_category() {
            writeln!(f, "{category}")?;
            for item in items {
                writeln!(f, "  [ ] {item}")?;
            }
        }

        Ok(())
    }
}

pub fn render_plan(plan: &WeeklyPlan, catalog: &RecipeCatalog) -> String {
    PlanView { plan, catalog }.to_string()
}

pub fn render_nutrition(report: &NutritionReport) -> String {
    NutritionView(report).to_string()
}

pub fn render_shopping_list(list: &ShoppingList) -> String {
    ChecklistView(list).to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use mealweek_shared::household::{Day, MealSlot, MealType};
    use mealweek_shared::mealplan::{Advisory, DayPlan, PlannedMeal};
    use mealweek_shared::recipe::Recipe;
    use mealweek_shopping::{Category, Quantity, ShoppingListItem};

    use super::*;

    #[test]
    fn test_render_plan() {
        let catalog = RecipeCatalog::new(vec![Recipe {
            id: "chili".to_owned(),
            name: "Beef chili".to_owned(),
            servings: 4.0,
            ..Default::default()
        }])
        .unwrap();
        let plan = WeeklyPlan {
            days: vec![DayPlan {
                day: Day::Monday,
                slots: BTreeMap::from([
                    (MealType::Lunch, Slot::Skipped),
                    (
                        MealType::Dinner,
                        Slot::Planned(PlannedMeal {
                            day: Day::Monday,
                            meal_type: MealType::Dinner,
                            recipe_id: "chili".to_owned(),
                            portions: 2.75,
                            source: MealSource::Leftover {
                                from: MealSlot::new(Day::Sunday, MealType::Dinner),
                            },
                        }),
                    ),
                ]),
            }],
            daily_calorie_limit: Some(1800.0),
            advisories: vec![Advisory::CalorieLimitExceeded {
                day: Day::Monday,
                calories: 2000.0,
                limit: 1800.0,
            }],
        };

        let text = render_plan(&plan, &catalog);

        assert!(text.contains("Monday"));
        assert!(text.contains("lunch     -"));
        assert!(text.contains("Beef chili x2.75 (leftover from Sunday dinner)"));
        assert!(text.contains("limit exceeded on Monday (2000 kcal > 1800 kcal)"));
    }

    #[test]
    fn test_render_shopping_list() {
        let list = ShoppingList {
            items: vec![ShoppingListItem {
                name: "beef".to_owned(),
                unit: Some("g".to_owned()),
                quantity: Quantity::Amount(300.0),
                category: Category::Meat,
                recipe_ids: vec!["a".to_owned()],
            }],
        };

        assert_eq!(render_shopping_list(&list), "meat\n  [ ] beef 300 g\n");
    }

    #[test]
    fn test_render_nutrition_flags_days_over_limit() {
        let monday = Nutrition {
            calories: 2000.0,
            protein: 90.0,
            ..Default::default()
        };
        let report = NutritionReport {
            daily: BTreeMap::from([(Day::Monday, monday.clone()), (Day::Tuesday, Nutrition::default())]),
            weekly: monday.clone(),
            average_daily: monday.scaled(0.5),
            daily_calorie_limit: Some(1800.0),
            exceeded_days: vec![Day::Monday],
        };

        let text = render_nutrition(&report);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "  Monday       2000 /    90g /     0g /     0g  over limit");
        assert_eq!(lines[2], "  Tuesday         0 /     0g /     0g /     0g");
        assert!(lines[4].starts_with("  average      1000 /    45g"));
        assert_eq!(lines[5], "  daily limit 1800 kcal");
    }
}
