use anyhow::Result;

use crate::catalog::load_catalog;
use crate::report::render_shopping_list;

pub fn shopping(config: crate::config::Config, seed: Option<u64>) -> Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;
    let output = crate::plan_week(&config, &catalog, &mut super::rng(seed))?;

    if output.shopping_list.is_empty() {
        tracing::info!("Nothing to buy this week");
        return Ok(());
    }

    print!("{}", render_shopping_list(&output.shopping_list));

    Ok(())
}
