mod cook_once;
mod generator;
mod nutrition;
mod rotation;

pub use cook_once::*;
pub use generator::*;
pub use nutrition::*;
pub use rotation::*;
