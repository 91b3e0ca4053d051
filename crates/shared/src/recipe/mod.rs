use std::collections::{BTreeMap, BTreeSet};
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};
use strum::VariantArray;
use validator::Validate;

use crate::household::MealType;
use crate::{Error, malformed};

/// Per-serving nutrition values.
///
/// The four core macros are always present. Anything else the recipe source
/// knows about (fiber, sodium, vitamins...) travels in `extended`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default, flatten)]
    pub extended: BTreeMap<String, f64>,
}

impl Nutrition {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            extended: self
                .extended
                .iter()
                .map(|(k, v)| (k.to_owned(), v * factor))
                .collect(),
        }
    }

    /// Compares every field within `tolerance`. A nutrient missing on one
    /// side counts as zero.
    pub fn approx_eq(&self, other: &Nutrition, tolerance: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= tolerance;

        let keys: BTreeSet<&String> = self.extended.keys().chain(other.extended.keys()).collect();

        close(self.calories, other.calories)
            && close(self.protein, other.protein)
            && close(self.carbs, other.carbs)
            && close(self.fat, other.fat)
            && keys.into_iter().all(|k| {
                close(
                    self.extended.get(k).copied().unwrap_or_default(),
                    other.extended.get(k).copied().unwrap_or_default(),
                )
            })
    }
}

impl AddAssign<&Nutrition> for Nutrition {
    fn add_assign(&mut self, rhs: &Nutrition) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fat += rhs.fat;

        for (name, value) in rhs.extended.iter() {
            *self.extended.entry(name.to_owned()).or_insert(0.0) += value;
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Ingredient {
    #[serde(default, alias = "name")]
    pub item: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, quantity: impl Into<Option<f64>>) -> Self {
        Self {
            item: item.into(),
            quantity: quantity.into(),
            ..Default::default()
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub servings: f64,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub nutrition: Nutrition,
    pub tags: BTreeSet<String>,
    pub ingredients: Vec<Ingredient>,
    pub reheats_well: bool,
    pub stores_days: u8,
    pub packs_well_as_lunch: bool,
}

impl Recipe {
    pub fn calories(&self) -> f64 {
        self.nutrition.calories
    }

    pub fn is_tagged_for(&self, meal_type: MealType) -> bool {
        self.tags.contains(meal_type.as_ref())
    }

    /// A recipe with no meal-type tag can stand in for any slot.
    pub fn is_generic(&self) -> bool {
        !MealType::VARIANTS.iter().any(|m| self.is_tagged_for(*m))
    }
}

/// Loosely-typed recipe as it comes out of a JSON recipe store.
///
/// Nutrition is accepted either as flat `*_per_serving` fields or inside a
/// `nutrition_per_serving` object; null nutrient values are dropped.
#[derive(Deserialize, Validate, Clone, Debug, Default)]
pub struct RecipeRecord {
    #[validate(
        required(message = "id is required"),
        length(min = 1, message = "id must not be empty")
    )]
    pub id: Option<String>,

    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name must not be empty")
    )]
    pub name: Option<String>,

    #[serde(alias = "base_servings")]
    #[validate(
        required(message = "servings is required"),
        range(exclusive_min = 0.0, message = "servings must be positive")
    )]
    pub servings: Option<f64>,

    #[serde(default)]
    pub prep_time_minutes: u32,
    #[serde(default)]
    pub cook_time_minutes: u32,

    pub calories_per_serving: Option<f64>,
    pub protein_per_serving: Option<f64>,
    pub carbs_per_serving: Option<f64>,
    pub fat_per_serving: Option<f64>,
    #[serde(default)]
    pub nutrition_per_serving: BTreeMap<String, Option<f64>>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[validate(required(message = "ingredients are required"))]
    pub ingredients: Option<Vec<Ingredient>>,

    #[serde(default)]
    pub reheats_well: bool,
    #[serde(default)]
    pub stores_days: u8,
    #[serde(default)]
    pub packs_well_as_lunch: bool,
}

impl TryFrom<RecipeRecord> for Recipe {
    type Error = Error;

    fn try_from(record: RecipeRecord) -> Result<Self, Self::Error> {
        let label = record
            .id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .unwrap_or("<unknown>")
            .to_owned();

        if let Err(errors) = record.validate() {
            malformed!(label, "{errors}");
        }

        let id = record.id.unwrap_or_default().trim().to_owned();
        let name = record.name.unwrap_or_default().trim().to_owned();
        let servings = record.servings.unwrap_or_default();

        if id.is_empty() {
            malformed!(label, "id must not be blank");
        }

        if name.is_empty() {
            malformed!(label, "name must not be blank");
        }

        if !servings.is_finite() {
            malformed!(label, "servings must be a finite number");
        }

        let ingredients = record.ingredients.unwrap_or_default();
        for ingredient in ingredients.iter() {
            if let Some(quantity) = ingredient.quantity
                && (!quantity.is_finite() || quantity < 0.0)
            {
                malformed!(
                    label,
                    "ingredient '{}' has invalid quantity {}",
                    ingredient.item,
                    quantity
                );
            }
        }

        let mut extended: BTreeMap<String, f64> = record
            .nutrition_per_serving
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();

        let mut core = |flat: Option<f64>, key: &str| {
            let nested = extended.remove(key);
            flat.or(nested).unwrap_or_default()
        };

        let calories = core(record.calories_per_serving, "calories");
        let protein = core(record.protein_per_serving, "protein");
        let carbs = core(record.carbs_per_serving, "carbs");
        let fat = core(record.fat_per_serving, "fat");

        Ok(Recipe {
            id,
            name,
            servings,
            prep_time_minutes: record.prep_time_minutes,
            cook_time_minutes: record.cook_time_minutes,
            nutrition: Nutrition {
                calories,
                protein,
                carbs,
                fat,
                extended,
            },
            tags: record
                .tags
                .iter()
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
            ingredients,
            reheats_well: record.reheats_well,
            stores_days: record.stores_days,
            packs_well_as_lunch: record.packs_well_as_lunch,
        })
    }
}
