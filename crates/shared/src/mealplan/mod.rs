use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::household::{Day, MealSlot, MealType};

/// Where the food on the plate comes from.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MealSource {
    #[default]
    Fresh,
    Leftover { from: MealSlot },
    PackedLunch { from: MealSlot },
}

impl MealSource {
    pub fn is_fresh(&self) -> bool {
        matches!(self, MealSource::Fresh)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct PlannedMeal {
    pub day: Day,
    pub meal_type: MealType,
    pub recipe_id: String,
    pub portions: f64,
    pub source: MealSource,
}

impl PlannedMeal {
    pub fn slot(&self) -> MealSlot {
        MealSlot::new(self.day, self.meal_type)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Planned(PlannedMeal),
    Skipped,
}

impl Slot {
    pub fn meal(&self) -> Option<&PlannedMeal> {
        match self {
            Slot::Planned(meal) => Some(meal),
            Slot::Skipped => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Slot::Skipped)
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayPlan {
    pub day: Day,
    pub slots: BTreeMap<MealType, Slot>,
}

/// Non-fatal notes produced while planning.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    CalorieLimitExceeded { day: Day, calories: f64, limit: f64 },
    RepeatRelaxed { slot: MealSlot, recipe_id: String },
}

impl std::fmt::Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::CalorieLimitExceeded {
                day,
                calories,
                limit,
            } => write!(
                f,
                "limit exceeded on {day} ({calories:.0} kcal > {limit:.0} kcal)"
            ),
            Advisory::RepeatRelaxed { slot, recipe_id } => {
                write!(f, "recipe {recipe_id} repeated on {slot}, catalog exhausted")
            }
        }
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
    pub daily_calorie_limit: Option<f64>,
    pub advisories: Vec<Advisory>,
}

impl WeeklyPlan {
    pub fn get(&self, day: Day, meal_type: MealType) -> Option<&Slot> {
        self.days
            .iter()
            .find(|d| d.day == day)
            .and_then(|d| d.slots.get(&meal_type))
    }

    pub fn get_mut(&mut self, day: Day, meal_type: MealType) -> Option<&mut Slot> {
        self.days
            .iter_mut()
            .find(|d| d.day == day)
            .and_then(|d| d.slots.get_mut(&meal_type))
    }

    pub fn meals(&self) -> impl Iterator<Item = &PlannedMeal> {
        self.days
            .iter()
            .flat_map(|d| d.slots.values())
            .filter_map(Slot::meal)
    }

    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }

    pub fn has_repeats(&self) -> bool {
        let mut seen = HashSet::new();
        self.meals().any(|m| !seen.insert(m.recipe_id.as_str()))
    }

    pub fn exceeded_days(&self) -> Vec<Day> {
        self.advisories
            .iter()
            .filter_map(|a| match a {
                Advisory::CalorieLimitExceeded { day, .. } => Some(*day),
                _ => None,
            })
            .collect()
    }

    pub fn repeats_relaxed(&self) -> bool {
        self.advisories
            .iter()
            .any(|a| matches!(a, Advisory::RepeatRelaxed { .. }))
    }
}
