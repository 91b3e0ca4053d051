use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::{Result, invalid_config};

pub const DEFAULT_PORTION_MULTIPLIER: f64 = 2.75;

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(ascii_case_insensitive)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub fn is_weekday(&self) -> bool {
        !matches!(self, Day::Saturday | Day::Sunday)
    }

    /// Calendar day `days` after this one, within the same Monday-Sunday week.
    pub fn after(&self, days: usize) -> Option<Day> {
        let index = Day::VARIANTS.iter().position(|d| d == self)?;
        Day::VARIANTS.get(index + days).copied()
    }
}

#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RepeatPolicy {
    #[default]
    NoRepeat,
    AllowRepeats,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealSlot {
    pub day: Day,
    pub meal_type: MealType,
}

impl MealSlot {
    pub fn new(day: Day, meal_type: MealType) -> Self {
        Self { day, meal_type }
    }
}

impl std::fmt::Display for MealSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.day, self.meal_type)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HouseholdConfig {
    /// Servings cooked per meal for the whole household.
    pub portion_multiplier: f64,
    /// Calorie ceiling for one day, compared against household-scaled totals.
    pub daily_calorie_limit: Option<f64>,
    pub meal_types: BTreeSet<MealType>,
    pub days: Vec<Day>,
    pub repeat_policy: RepeatPolicy,
    /// Per-meal-type portion override, e.g. smaller breakfasts.
    pub meal_portions: BTreeMap<MealType, f64>,
    /// Relative weights splitting the daily limit across a day's meal types.
    pub meal_calorie_splits: BTreeMap<MealType, f64>,
    pub skipped_slots: BTreeSet<MealSlot>,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            portion_multiplier: DEFAULT_PORTION_MULTIPLIER,
            daily_calorie_limit: None,
            meal_types: BTreeSet::from([MealType::Dinner]),
            days: Day::VARIANTS.to_vec(),
            repeat_policy: RepeatPolicy::default(),
            meal_portions: BTreeMap::new(),
            meal_calorie_splits: BTreeMap::new(),
            skipped_slots: BTreeSet::new(),
        }
    }
}

impl HouseholdConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.portion_multiplier.is_finite() || self.portion_multiplier <= 0.0 {
            invalid_config!(
                "portion multiplier must be positive, got {}",
                self.portion_multiplier
            );
        }

        if self.meal_types.is_empty() {
            invalid_config!("at least one meal type is required");
        }

        if self.days.is_empty() {
            invalid_config!("at least one day is required");
        }

        let mut seen = HashSet::new();
        for day in self.days.iter() {
            if !seen.insert(day) {
                invalid_config!("day {} is listed more than once", day);
            }
        }

        if let Some(limit) = self.daily_calorie_limit
            && (!limit.is_finite() || limit <= 0.0)
        {
            invalid_config!("daily calorie limit must be positive, got {}", limit);
        }

        for (meal_type, portions) in self.meal_portions.iter() {
            if !portions.is_finite() || *portions <= 0.0 {
                invalid_config!("portions for {} must be positive, got {}", meal_type, portions);
            }
        }

        for (meal_type, weight) in self.meal_calorie_splits.iter() {
            if !weight.is_finite() || *weight <= 0.0 {
                invalid_config!("calorie split for {} must be positive, got {}", meal_type, weight);
            }
        }

        Ok(())
    }

    pub fn portions_for(&self, meal_type: MealType) -> f64 {
        self.meal_portions
            .get(&meal_type)
            .copied()
            .unwrap_or(self.portion_multiplier)
    }

    pub fn is_skipped(&self, slot: &MealSlot) -> bool {
        self.skipped_slots.contains(slot)
    }

    /// Every configured slot: days in configured order, meal types in
    /// breakfast, lunch, dinner, snack order.
    pub fn slots(&self) -> impl Iterator<Item = MealSlot> + '_ {
        self.days.iter().flat_map(|day| {
            self.meal_types
                .iter()
                .map(move |meal_type| MealSlot::new(*day, *meal_type))
        })
    }

    pub fn slot_count(&self) -> usize {
        self.days.len() * self.meal_types.len()
    }

    /// Share of the daily limit reserved for one `meal_type` meal.
    ///
    /// Returns `None` without a limit or when no splits are configured, in
    /// which case the whole remaining daily budget applies.
    pub fn calorie_share(&self, meal_type: MealType) -> Option<f64> {
        let limit = self.daily_calorie_limit?;
        if self.meal_calorie_splits.is_empty() {
            return None;
        }

        let weight_of = |m: &MealType| self.meal_calorie_splits.get(m).copied().unwrap_or(1.0);
        let total: f64 = self.meal_types.iter().map(weight_of).sum();

        Some(weight_of(&meal_type) / total * limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_config_is_valid() {
        let config = HouseholdConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.portion_multiplier, 2.75);
        assert_eq!(config.slot_count(), 7);
        assert_eq!(config.slots().count(), 7);
    }

    #[test]
    fn test_validation_non_positive_portions() {
        let config = HouseholdConfig {
            portion_multiplier: 0.0,
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_no_meal_types() {
        let config = HouseholdConfig {
            meal_types: BTreeSet::new(),
            ..Default::default()
        };

        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validation_duplicate_day() {
        let config = HouseholdConfig {
            days: vec![Day::Monday, Day::Tuesday, Day::Monday],
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Monday"));
    }

    #[test]
    fn test_validation_empty_days() {
        let config = HouseholdConfig {
            days: vec![],
            ..Default::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_slots_follow_day_order_then_meal_order() {
        let config = HouseholdConfig {
            days: vec![Day::Sunday, Day::Monday],
            meal_types: BTreeSet::from([MealType::Dinner, MealType::Breakfast]),
            ..Default::default()
        };

        let slots: Vec<_> = config.slots().collect();
        assert_eq!(
            slots,
            vec![
                MealSlot::new(Day::Sunday, MealType::Breakfast),
                MealSlot::new(Day::Sunday, MealType::Dinner),
                MealSlot::new(Day::Monday, MealType::Breakfast),
                MealSlot::new(Day::Monday, MealType::Dinner),
            ]
        );
    }

    #[test]
    fn test_portions_override_per_meal_type() {
        let config = HouseholdConfig {
            meal_portions: BTreeMap::from([(MealType::Lunch, 2.0)]),
            ..Default::default()
        };

        assert_eq!(config.portions_for(MealType::Lunch), 2.0);
        assert_eq!(config.portions_for(MealType::Dinner), 2.75);
    }

    #[test]
    fn test_calorie_share_splits_by_weight() {
        let config = HouseholdConfig {
            daily_calorie_limit: Some(1500.0),
            meal_types: BTreeSet::from([MealType::Lunch, MealType::Dinner]),
            meal_calorie_splits: BTreeMap::from([
                (MealType::Lunch, 0.35),
                (MealType::Dinner, 0.40),
            ]),
            ..Default::default()
        };

        let lunch = config.calorie_share(MealType::Lunch).unwrap();
        let dinner = config.calorie_share(MealType::Dinner).unwrap();
        assert!((lunch - 700.0).abs() < 1e-9);
        assert!((dinner - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_share_without_splits() {
        let config = HouseholdConfig {
            daily_calorie_limit: Some(1500.0),
            ..Default::default()
        };

        assert_eq!(config.calorie_share(MealType::Dinner), None);
    }

    #[test]
    fn test_day_after() {
        assert_eq!(Day::Monday.after(1), Some(Day::Tuesday));
        assert_eq!(Day::Saturday.after(1), Some(Day::Sunday));
        assert_eq!(Day::Sunday.after(1), None);
        assert!("friday".parse::<Day>().is_ok());
    }
}
