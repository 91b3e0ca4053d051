use anyhow::Result;
use clap::ValueEnum;

use crate::catalog::load_catalog;
use crate::report::{render_nutrition, render_plan, render_shopping_list};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn plan(config: crate::config::Config, seed: Option<u64>, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(&config.catalog.path)?;
    let output = crate::plan_week(&config, &catalog, &mut super::rng(seed))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Text => {
            println!("{}", render_plan(&output.plan, &catalog));
            println!("{}", render_nutrition(&output.nutrition));
            print!("{}", render_shopping_list(&output.shopping_list));
        }
    }

    Ok(())
}
