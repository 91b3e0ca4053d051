mod catalog;
mod error;
pub mod household;
pub mod mealplan;
pub mod recipe;

pub use catalog::*;
pub use error::*;
