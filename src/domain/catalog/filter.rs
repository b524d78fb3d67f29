use rust_decimal::Decimal;
use std::collections::BTreeSet;

use super::value_objects::{Category, Product};

// ============================================================================
// Filter/Search Engine
// ============================================================================
//
// Pure and deterministic: same catalog + same spec → same result, in
// catalog order. Category, price, rating and text predicates are ANDed.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Empty means no category restriction.
    pub categories: BTreeSet<Category>,
    /// Inclusive `(min, max)`.
    pub price_range: (Decimal, Decimal),
    /// 0 means no restriction.
    pub min_rating: f32,
    /// Whitespace-separated words, all of which must match.
    pub search_text: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            price_range: (Decimal::ZERO, Decimal::new(100_000, 0)),
            min_rating: 0.0,
            search_text: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn with_category(mut self, category: Category) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = (min, max);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_category(product)
            && self.matches_price(product)
            && product.rating >= self.min_rating
            && matches_search(&self.search_text, product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        let (min, max) = self.price_range;
        product.price >= min && product.price <= max
    }
}

/// Lower-cased name, description, brand, category and features.
fn haystack(product: &Product) -> String {
    let mut text = [
        product.name.as_str(),
        product.description.as_str(),
        product.brand.as_str(),
        product.category.as_str(),
    ]
    .join(" ");

    for feature in &product.features {
        text.push(' ');
        text.push_str(feature);
    }

    text.to_lowercase()
}

/// Every query word must appear as a substring. Blank query matches all.
pub fn matches_search(query: &str, product: &Product) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    let text = haystack(product);
    query.split_whitespace().all(|word| text.contains(word))
}

pub fn filter_products(products: &[Product], spec: &FilterSpec) -> Vec<Product> {
    products.iter().filter(|p| spec.matches(p)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::seed::seed_products;

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_default_spec_matches_everything() {
        let catalog = seed_products();
        assert_eq!(filter_products(&catalog, &FilterSpec::default()), catalog);
    }

    #[test]
    fn test_single_category_equals_category_subset() {
        let catalog = seed_products();
        let spec = FilterSpec::default().with_category(Category::Tools);

        let expected: Vec<Product> = catalog
            .iter()
            .filter(|p| p.category == Category::Tools)
            .cloned()
            .collect();

        assert_eq!(filter_products(&catalog, &spec), expected);
        assert_eq!(expected.len(), 3);
    }

    #[test]
    fn test_multiple_categories_are_ored() {
        let catalog = seed_products();
        let spec = FilterSpec::default()
            .with_category(Category::Safety)
            .with_category(Category::Plumbing);

        assert_eq!(
            names(&filter_products(&catalog, &spec)),
            vec!["Karam Safety Helmet", "Supreme PVC Pipe 1 inch"]
        );
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = seed_products();
        let spec = FilterSpec::default().with_price_range(Decimal::new(249, 0), Decimal::new(349, 0));

        assert_eq!(
            names(&filter_products(&catalog, &spec)),
            vec!["Havells Modular Switch Set", "Karam Safety Helmet"]
        );
    }

    #[test]
    fn test_min_rating_floor() {
        let catalog = seed_products();
        let spec = FilterSpec::default().with_min_rating(4.6);

        assert_eq!(
            names(&filter_products(&catalog, &spec)),
            vec!["Bosch Heavy Duty Drill", "Stanley Claw Hammer", "Bosch Laser Distance Meter"]
        );
    }

    #[test]
    fn test_search_is_order_independent() {
        let catalog = seed_products();

        let forward = filter_products(&catalog, &FilterSpec::default().with_search("bosch drill"));
        let reverse = filter_products(&catalog, &FilterSpec::default().with_search("drill bosch"));

        assert_eq!(names(&forward), vec!["Bosch Heavy Duty Drill"]);
        assert_eq!(forward, reverse);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = seed_products();
        let result = filter_products(&catalog, &FilterSpec::default().with_search("  HAVEL   switch "));
        assert_eq!(names(&result), vec!["Havells Modular Switch Set"]);
    }

    #[test]
    fn test_search_covers_features_brand_and_category() {
        let catalog = seed_products();

        let by_feature = filter_products(&catalog, &FilterSpec::default().with_search("ratchet"));
        assert_eq!(names(&by_feature), vec!["Karam Safety Helmet"]);

        let by_category = filter_products(&catalog, &FilterSpec::default().with_search("lighting"));
        assert_eq!(names(&by_category), vec!["Philips LED Bulb 9W"]);
    }

    #[test]
    fn test_search_requires_every_word() {
        let catalog = seed_products();
        let result = filter_products(&catalog, &FilterSpec::default().with_search("bosch hammer"));
        assert!(result.is_empty());
    }

    #[test]
    fn test_blank_search_matches_all() {
        let catalog = seed_products();
        let result = filter_products(&catalog, &FilterSpec::default().with_search("   \t "));
        assert_eq!(result.len(), catalog.len());
    }

    #[test]
    fn test_predicates_are_anded() {
        let catalog = seed_products();
        let spec = FilterSpec::default()
            .with_category(Category::Tools)
            .with_price_range(Decimal::ZERO, Decimal::new(5000, 0))
            .with_min_rating(4.0)
            .with_search("bosch");

        assert_eq!(names(&filter_products(&catalog, &spec)), vec!["Bosch Heavy Duty Drill"]);
    }
}
