use serde::Serialize;

use crate::categorization::Category;

/// Decimal places shown for a quantity. Totals keep full precision.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Aggregation key: case-folded trimmed item name plus canonical unit.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey {
    pub name: String,
    pub unit: Option<String>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Amount(f64),
    /// Only contributions without a quantity ("salt to taste").
    Unspecified,
}

impl Quantity {
    pub fn amount(&self) -> Option<f64> {
        match self {
            Quantity::Amount(amount) => Some(*amount),
            Quantity::Unspecified => None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ShoppingListItem {
    pub name: String,
    pub unit: Option<String>,
    pub quantity: Quantity,
    pub category: Category,
    /// Recipes that contributed, in first-contribution order.
    pub recipe_ids: Vec<String>,
}

impl ShoppingListItem {
    pub fn display_quantity(&self) -> Option<f64> {
        let factor = 10f64.powi(DISPLAY_DECIMALS);
        self.quantity
            .amount()
            .map(|amount| (amount * factor).round() / factor)
    }
}

impl std::fmt::Display for ShoppingListItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.display_quantity(), self.unit.as_deref()) {
            (Some(amount), Some(unit)) => write!(f, "{} {amount} {unit}", self.name),
            (Some(amount), None) => write!(f, "{} {amount}", self.name),
            (None, _) => write!(f, "{}", self.name),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn get(&self, name: &str, unit: Option<&str>) -> Option<&ShoppingListItem> {
        self.items
            .iter()
            .find(|item| item.name == name && item.unit.as_deref() == unit)
    }

    /// Items grouped by category, in list order. Empty categories are left out.
    pub fn by_category(&self) -> Vec<(Category, Vec<&ShoppingListItem>)> {
        let mut groups: Vec<(Category, Vec<&ShoppingListItem>)> = vec![];

        for item in self.items.iter() {
            if let Some((category, items)) = groups.last_mut()
                && *category == item.category
            {
                items.push(item);
                continue;
            }

            groups.push((item.category, vec![item]));
        }

        groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShoppingListItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
