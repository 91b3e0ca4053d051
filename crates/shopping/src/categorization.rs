use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Aisle used to group the shopping list. Variant order is the list order.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Serialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Produce,
    Meat,
    Dairy,
    Pantry,
    Spices,
    Other,
    Uncategorized,
}

const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Produce,
        &[
            "tomato", "onion", "shallot", "garlic", "lettuce", "carrot", "celery", "pepper",
            "bell pepper", "cucumber", "zucchini", "courgette", "broccoli", "cauliflower",
            "spinach", "kale", "cabbage", "potato", "sweet potato", "mushroom", "green bean",
            "pea", "corn", "avocado", "eggplant", "aubergine", "squash", "pumpkin", "jalapeno",
            "ginger", "cilantro", "coriander leaf", "parsley", "basil", "mint", "scallion",
            "spring onion", "leek", "apple", "banana", "orange", "lemon", "lime", "berry",
            "strawberry", "blueberry", "raspberry", "grape", "mango", "pineapple", "pear",
        ],
    ),
    (
        Category::Meat,
        &[
            "chicken", "chicken breast", "chicken thigh", "turkey", "duck", "beef",
            "ground beef", "mince", "steak", "brisket", "pork", "bacon", "ham", "sausage",
            "chorizo", "lamb", "veal", "fish", "salmon", "tuna", "cod", "tilapia", "shrimp",
            "prawn", "lobster", "crab", "scallop",
        ],
    ),
    (
        Category::Dairy,
        &[
            "milk", "cream", "sour cream", "butter", "cheese", "cheddar", "mozzarella",
            "parmesan", "feta", "ricotta", "cream cheese", "yogurt", "yoghurt", "egg",
        ],
    ),
    (
        Category::Pantry,
        &[
            "flour", "rice", "pasta", "spaghetti", "noodle", "oat", "bread", "tortilla",
            "quinoa", "lentil", "chickpea", "bean", "black bean", "kidney bean", "sugar",
            "honey", "oil", "olive oil", "vinegar", "soy sauce", "stock", "broth",
            "tomato paste", "canned tomato", "coconut milk", "peanut butter", "nut", "almond",
            "walnut", "baking powder", "baking soda", "yeast",
        ],
    ),
    (
        Category::Spices,
        &[
            "salt", "black pepper", "peppercorn", "cumin", "paprika", "smoked paprika",
            "chili powder", "chilli flake", "cinnamon", "nutmeg", "turmeric", "oregano",
            "thyme", "rosemary", "bay leaf", "garlic powder", "onion powder", "curry powder",
            "garam masala", "coriander", "cayenne", "cardamom", "vanilla",
        ],
    ),
];

static KEYWORD_CATEGORIES: LazyLock<HashMap<&'static str, Category>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (category, keywords) in KEYWORDS {
        for keyword in keywords.iter() {
            map.insert(*keyword, *category);
        }
    }
    map
});

/// Longest phrase looked up when matching an item name.
const MAX_PHRASE_WORDS: usize = 3;

impl Category {
    /// Category named by a recipe. Unknown labels land in `Other`; blank
    /// labels are treated as absent.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }

        Some(label.parse().unwrap_or(Category::Other))
    }
}

/// Categorization Service
///
/// Stateless keyword lookup on the item name. Longer phrases win over single
/// words ("garlic powder" is a spice, "garlic" is produce). Among equally
/// long matches the rightmost one wins ("chicken stock" is pantry).
pub struct CategorizationService;

impl CategorizationService {
    pub fn categorize(item: &str) -> Category {
        let lowered = item.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        for len in (1..=MAX_PHRASE_WORDS.min(words.len())).rev() {
            for start in (0..=words.len() - len).rev() {
                let phrase = words[start..start + len].join(" ");

                if let Some(category) = Self::lookup(&phrase) {
                    return category;
                }
            }
        }

        Category::Uncategorized
    }

    /// Resolve an ingredient's category: explicit label first, then keywords.
    pub fn resolve(label: Option<&str>, item: &str) -> Category {
        label
            .and_then(Category::from_label)
            .unwrap_or_else(|| Self::categorize(item))
    }

    fn lookup(phrase: &str) -> Option<Category> {
        if let Some(category) = KEYWORD_CATEGORIES.get(phrase) {
            return Some(*category);
        }

        singular_forms(phrase)
            .into_iter()
            .find_map(|form| KEYWORD_CATEGORIES.get(form.as_str()).copied())
    }
}

fn singular_forms(phrase: &str) -> Vec<String> {
    let mut forms = Vec::new();

    if let Some(stem) = phrase.strip_suffix("ies") {
        forms.push(format!("{stem}y"));
    }
    if let Some(stem) = phrase.strip_suffix("es") {
        forms.push(stem.to_owned());
    }
    if let Some(stem) = phrase.strip_suffix('s')
        && !stem.ends_with('s')
    {
        forms.push(stem.to_owned());
    }

    forms
}
