//! # Ingredient Department Classifier
//!
//! Maps free-text ingredient names to grocery store departments using
//! keyword containment. Rules are evaluated in a fixed priority order and
//! the first matching rule wins, so an ambiguous name like "chicken broth"
//! always lands in the department checked first (Meat & Seafood).
//!
//! ## Usage
//!
//! ```rust
//! use mealplanner::classifier::classify;
//!
//! assert_eq!(classify("cherry tomatoes"), "Produce");
//! assert_eq!(classify("Greek yogurt"), "Dairy & Eggs");
//! assert_eq!(classify("mystery item"), "Other");
//! ```

use log::trace;

/// Department assigned when no rule matches
pub const OTHER_DEPARTMENT: &str = "Other";

/// Keyword rules in priority order. Order is part of the contract: the
/// first department whose keyword list matches wins.
const DEPARTMENT_RULES: &[(&str, &[&str])] = &[
    (
        "Produce",
        &[
            "apple", "banana", "orange", "lemon", "lime", "berr", "grape", "melon", "peach",
            "pear", "mango", "avocado", "tomato", "onion", "garlic", "potato", "carrot",
            "celery", "lettuce", "spinach", "kale", "cabbage", "broccoli", "cauliflower",
            "cucumber", "zucchini", "mushroom", "pepper", "ginger", "herb", "basil", "parsley",
            "cilantro", "mint", "scallion", "leek", "squash",
        ],
    ),
    (
        "Meat & Seafood",
        &[
            "chicken", "beef", "pork", "lamb", "turkey", "bacon", "sausage", "ham", "steak",
            "fish", "salmon", "tuna", "cod", "shrimp", "prawn", "crab", "mussel", "anchovy",
        ],
    ),
    (
        "Dairy & Eggs",
        &[
            "milk", "cheese", "butter", "yogurt", "cream", "egg", "mozzarella", "parmesan",
            "cheddar", "feta", "ricotta",
        ],
    ),
    (
        "Bakery",
        &[
            "bread", "bun", "roll", "bagel", "baguette", "tortilla", "pita", "croissant",
            "muffin",
        ],
    ),
    (
        "Pantry",
        &[
            "flour", "sugar", "rice", "pasta", "spaghetti", "noodle", "bean", "lentil",
            "chickpea", "oat", "cereal", "quinoa", "salt", "oil", "vinegar", "baking powder",
            "baking soda", "yeast", "honey", "syrup", "broth", "stock", "cumin", "paprika",
            "oregano", "cinnamon", "vanilla", "spice",
        ],
    ),
    ("Frozen", &["frozen", "popsicle"]),
    (
        "Beverages",
        &[
            "water", "juice", "coffee", "tea", "soda", "wine", "beer", "lemonade", "drink",
        ],
    ),
    (
        "Condiments",
        &[
            "ketchup", "mustard", "mayonnaise", "mayo", "soy sauce", "salsa", "dressing",
            "relish", "sriracha", "sauce", "jam",
        ],
    ),
    (
        "Snacks",
        &[
            "chip", "cracker", "cookie", "popcorn", "pretzel", "candy", "chocolate", "granola",
        ],
    ),
];

/// Classify an ingredient name into a department.
///
/// Matching is case-insensitive keyword containment. Empty input, unicode
/// input, and names with no registered keyword all fall through to
/// [`OTHER_DEPARTMENT`]; classification never fails.
pub fn classify(name: &str) -> &'static str {
    let lower = name.to_lowercase();

    for (department, keywords) in DEPARTMENT_RULES {
        if keywords.iter().any(|keyword| lower.contains(keyword)) {
            trace!("classified '{}' as {}", name, department);
            return department;
        }
    }

    trace!("no department rule matched '{}'", name);
    OTHER_DEPARTMENT
}

/// All departments a classification can produce, in rule priority order,
/// with the fallback department last.
pub fn departments() -> Vec<&'static str> {
    DEPARTMENT_RULES
        .iter()
        .map(|(department, _)| *department)
        .chain(std::iter::once(OTHER_DEPARTMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_produce() {
        assert_eq!(classify("tomato"), "Produce");
        assert_eq!(classify("Cherry Tomatoes"), "Produce");
        assert_eq!(classify("fresh basil"), "Produce");
        assert_eq!(classify("red onion"), "Produce");
    }

    #[test]
    fn test_meat_and_seafood() {
        assert_eq!(classify("chicken breast"), "Meat & Seafood");
        assert_eq!(classify("smoked salmon"), "Meat & Seafood");
        assert_eq!(classify("ground beef"), "Meat & Seafood");
    }

    #[test]
    fn test_dairy() {
        assert_eq!(classify("whole milk"), "Dairy & Eggs");
        assert_eq!(classify("unsalted butter"), "Dairy & Eggs");
        assert_eq!(classify("eggs"), "Dairy & Eggs");
    }

    #[test]
    fn test_priority_order_resolves_ambiguity() {
        // "chicken broth" matches both Meat & Seafood and Pantry;
        // Meat & Seafood is checked first and wins.
        assert_eq!(classify("chicken broth"), "Meat & Seafood");
        // "tomato sauce" matches Produce before Condiments.
        assert_eq!(classify("tomato sauce"), "Produce");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("CHICKEN"), "Meat & Seafood");
        assert_eq!(classify("Olive Oil"), "Pantry");
    }

    #[test]
    fn test_unmatched_falls_through_to_other() {
        assert_eq!(classify("xyzfoobar123"), "Other");
        assert_eq!(classify(""), "Other");
        assert_eq!(classify("日本酒の瓶"), "Other");
    }

    #[test]
    fn test_determinism() {
        for _ in 0..3 {
            assert_eq!(classify("chicken broth"), classify("chicken broth"));
        }
    }

    #[test]
    fn test_departments_listing() {
        let all = departments();
        assert_eq!(all.first(), Some(&"Produce"));
        assert_eq!(all.last(), Some(&"Other"));
        assert!(all.contains(&"Frozen"));
    }
}
