use mealweek_shared::{Error, Result};
use regex::Regex;

/// Staples nobody needs to buy (water, salt...), matched as whole words
/// anywhere in the item name, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    pattern: Option<Regex>,
}

impl ExclusionFilter {
    pub fn new<S: AsRef<str>>(items: &[S]) -> Result<Self> {
        let words: Vec<String> = items
            .iter()
            .map(|item| item.as_ref().trim())
            .filter(|item| !item.is_empty())
            .map(regex::escape)
            .collect();

        if words.is_empty() {
            return Ok(Self::default());
        }

        let pattern = Regex::new(&format!(r"(?i)\b(?:{})\b", words.join("|")))
            .map_err(|err| Error::InvalidConfig(format!("excluded items: {err}")))?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    pub fn is_excluded(&self, item: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(item))
    }
}
