mod check;
mod plan;
mod shopping;

pub use check::check;
pub use plan::{OutputFormat, plan};
pub use shopping::shopping;

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Seeded generator when a seed is given so a week can be reproduced.
fn rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_os_rng)
}
