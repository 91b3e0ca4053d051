#![allow(dead_code)]

use mealweek_shared::RecipeCatalog;
use mealweek_shared::recipe::{Ingredient, Nutrition, Recipe};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn recipe(id: &str, servings: f64, calories: f64) -> Recipe {
    Recipe {
        id: id.to_owned(),
        name: format!("recipe {id}"),
        servings,
        nutrition: Nutrition {
            calories,
            protein: calories / 20.0,
            carbs: calories / 10.0,
            fat: calories / 40.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Recipe A and B from the beef scenario.
pub fn beef_catalog() -> anyhow::Result<RecipeCatalog> {
    let mut a = recipe("a", 1.0, 500.0);
    a.ingredients = vec![Ingredient::new("beef", 200.0).unit("g")];

    let mut b = recipe("b", 1.0, 300.0);
    b.ingredients = vec![Ingredient::new("beef", 100.0).unit("g")];

    Ok(RecipeCatalog::new(vec![a, b])?)
}

pub fn numbered_catalog(count: usize) -> anyhow::Result<RecipeCatalog> {
    let recipes = (0..count).map(|i| recipe(&format!("r{i:02}"), 4.0, 300.0 + (i as f64) * 25.0));

    Ok(RecipeCatalog::new(recipes)?)
}
