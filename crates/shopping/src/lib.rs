mod aggregation;
mod categorization;
mod exclusion;
mod list;
mod units;

pub use aggregation::*;
pub use categorization::*;
pub use exclusion::*;
pub use list::*;
pub use units::*;
