use std::collections::HashMap;
use std::sync::LazyLock;

const UNIT_TABLE: &[(&str, &[&str])] = &[
    ("g", &["g", "gr", "grs", "gram", "grams", "gramme", "grammes"]),
    ("kg", &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"]),
    ("mg", &["mg", "milligram", "milligrams"]),
    ("ml", &["ml", "millilitre", "millilitres", "milliliter", "milliliters"]),
    ("l", &["l", "litre", "litres", "liter", "liters"]),
    ("tbsp", &["tbsp", "tbsps", "tbs", "tablespoon", "tablespoons"]),
    ("tsp", &["tsp", "tsps", "teaspoon", "teaspoons"]),
    ("cup", &["cup", "cups"]),
    ("oz", &["oz", "ounce", "ounces"]),
    ("lb", &["lb", "lbs", "pound", "pounds"]),
    ("clove", &["clove", "cloves"]),
    ("can", &["can", "cans", "tin", "tins"]),
    ("pinch", &["pinch", "pinches"]),
    ("piece", &["piece", "pieces", "pc", "pcs"]),
    ("slice", &["slice", "slices"]),
    ("bunch", &["bunch", "bunches"]),
];

/// Spelling variants folded onto one canonical unit. Quantities are never
/// converted between units.
static UNIT_SYNONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (canonical, variants) in UNIT_TABLE {
        for variant in variants.iter() {
            map.insert(*variant, *canonical);
        }
    }
    map
});

/// Units that only restate the recipe yield and carry no purchasable amount.
const NO_UNIT: [&str; 2] = ["serving", "servings"];

/// Fold a raw unit onto its canonical spelling.
///
/// Blank units and serving counts become `None`. Unknown units are kept,
/// trimmed and lowercased, so they never merge with a different unit.
pub fn normalize_unit(unit: Option<&str>) -> Option<String> {
    let unit = unit?.trim().trim_end_matches('.').to_lowercase();

    if unit.is_empty() || NO_UNIT.contains(&unit.as_str()) {
        return None;
    }

    Some(
        UNIT_SYNONYMS
            .get(unit.as_str())
            .map(|canonical| canonical.to_string())
            .unwrap_or(unit),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gram_variants_fold() {
        for raw in ["g", "G", "gram", "Grams ", "gr."] {
            assert_eq!(normalize_unit(Some(raw)).as_deref(), Some("g"), "{raw}");
        }
    }

    #[test]
    fn test_no_unit_is_never_invented() {
        assert_eq!(normalize_unit(None), None);
        assert_eq!(normalize_unit(Some("  ")), None);
        assert_eq!(normalize_unit(Some("servings")), None);
        assert_eq!(normalize_unit(Some("Serving")), None);
    }

    #[test]
    fn test_unknown_unit_is_kept() {
        assert_eq!(normalize_unit(Some(" Sprig ")).as_deref(), Some("sprig"));
    }

    #[test]
    fn test_units_are_not_converted() {
        assert_ne!(normalize_unit(Some("kg")), normalize_unit(Some("g")));
        assert_ne!(normalize_unit(Some("tbsp")), normalize_unit(Some("tsp")));
    }
}
