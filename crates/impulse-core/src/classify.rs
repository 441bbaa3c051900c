//! Free-text item classification
//!
//! Maps an item description to one [`Category`] by case-insensitive substring
//! match against a fixed keyword table. Categories are tried in declaration
//! order and the first hit wins, so "designer watch" is Electronics: "watch"
//! appears under both Electronics and Fashion, and Electronics is tried first.

use crate::models::Category;

/// Keyword table in tie-break order. `Other` has no keywords; it is the fallback.
pub const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Electronics,
        &[
            "phone",
            "laptop",
            "computer",
            "tablet",
            "headphones",
            "speaker",
            "tv",
            "camera",
            "watch",
            "ipad",
            "airpods",
            "gaming",
            "console",
        ],
    ),
    (
        Category::Fashion,
        &[
            "clothes",
            "shirt",
            "pants",
            "shoes",
            "dress",
            "jacket",
            "sneakers",
            "boots",
            "bag",
            "accessories",
            "jewelry",
            "watch",
        ],
    ),
    (
        Category::Food,
        &[
            "food",
            "restaurant",
            "pizza",
            "burger",
            "coffee",
            "snacks",
            "delivery",
            "takeout",
            "meal",
            "drinks",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie",
            "game",
            "subscription",
            "netflix",
            "spotify",
            "concert",
            "tickets",
            "streaming",
            "music",
            "book",
        ],
    ),
    (
        Category::Home,
        &[
            "furniture",
            "decor",
            "kitchen",
            "appliance",
            "bedding",
            "lamp",
            "chair",
            "table",
            "couch",
            "sofa",
        ],
    ),
    (
        Category::Beauty,
        &[
            "makeup",
            "skincare",
            "cosmetics",
            "perfume",
            "shampoo",
            "beauty",
            "hair",
            "nails",
        ],
    ),
    (
        Category::Fitness,
        &[
            "gym",
            "workout",
            "fitness",
            "sports",
            "equipment",
            "yoga",
            "running",
            "bike",
        ],
    ),
];

/// Classify an item description
///
/// Empty and unmatched descriptions both map to [`Category::Other`].
pub fn classify(description: &str) -> Category {
    if description.trim().is_empty() {
        return Category::Other;
    }

    let desc_lower = description.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| desc_lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// First keyword that matched, for explaining a classification
pub fn matched_keyword(description: &str) -> Option<(Category, &'static str)> {
    let desc_lower = description.to_lowercase();
    KEYWORDS.iter().find_map(|(category, keywords)| {
        keywords
            .iter()
            .find(|kw| desc_lower.contains(*kw))
            .map(|kw| (*category, *kw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_other() {
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("   "), Category::Other);
    }

    #[test]
    fn test_unmatched_is_other() {
        assert_eq!(classify("Garden hose"), Category::Other);
        assert_eq!(matched_keyword("Garden hose"), None);
        // Not in the Fashion list; "pants" is
        assert_eq!(classify("Slim jeans"), Category::Other);
        assert_eq!(classify("Cargo pants"), Category::Fashion);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("NEW IPHONE 15"), Category::Electronics);
        assert_eq!(classify("Summer Dress"), Category::Fashion);
        assert_eq!(classify("Late night PIZZA"), Category::Food);
    }

    #[test]
    fn test_each_category_reachable() {
        assert_eq!(classify("Laptop upgrade"), Category::Electronics);
        assert_eq!(classify("Leather jacket"), Category::Fashion);
        assert_eq!(classify("Restaurant dinner"), Category::Food);
        assert_eq!(classify("Netflix subscription"), Category::Entertainment);
        assert_eq!(classify("New couch"), Category::Home);
        assert_eq!(classify("Makeup palette"), Category::Beauty);
        assert_eq!(classify("Gym membership"), Category::Fitness);
    }

    #[test]
    fn test_tie_break_prefers_earlier_category() {
        // "watch" is listed under Electronics and Fashion
        for _ in 0..3 {
            assert_eq!(classify("designer watch"), Category::Electronics);
        }
        // "coffee" (Food) beats "table" (Home)
        assert_eq!(classify("Coffee table"), Category::Food);
        // "gaming" (Electronics) beats "game" (Entertainment)
        assert_eq!(classify("Gaming headphones"), Category::Electronics);
    }

    #[test]
    fn test_matched_keyword_reports_winner() {
        assert_eq!(
            matched_keyword("designer watch"),
            Some((Category::Electronics, "watch"))
        );
        assert_eq!(
            matched_keyword("Yoga mat"),
            Some((Category::Fitness, "yoga"))
        );
    }

    #[test]
    fn test_table_covers_all_but_other() {
        let declared: Vec<Category> = KEYWORDS.iter().map(|(c, _)| *c).collect();
        assert_eq!(declared, Category::ALL[..Category::COUNT - 1].to_vec());
    }
}
