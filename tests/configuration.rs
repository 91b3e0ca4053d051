//! Tests for configuration system

use std::collections::BTreeSet;

use mealweek::config::Config;
use mealweek_shared::household::{MealType, RepeatPolicy};

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.household.portion_multiplier, 2.75);
    assert_eq!(config.household.daily_calorie_limit, Some(2400.0));
    assert_eq!(config.household.meal_types, BTreeSet::from([MealType::Dinner]));
    assert_eq!(config.household.days.len(), 7);
    assert_eq!(config.household.repeat_policy, RepeatPolicy::NoRepeat);
    assert_eq!(config.catalog.path.to_str(), Some("data/recipes.json"));
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.cook_once.enabled);
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::load(None).expect("Failed to load config");

    assert!(config.validate().is_ok());
    assert_eq!(config.household.slot_count(), 7);
}
