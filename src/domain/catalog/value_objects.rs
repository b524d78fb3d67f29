use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::CatalogError;

// ============================================================================
// Catalog Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of store departments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electrical,
    Hardware,
    Tools,
    Safety,
    Plumbing,
    Lighting,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Electrical,
        Category::Hardware,
        Category::Tools,
        Category::Safety,
        Category::Plumbing,
        Category::Lighting,
    ];

    /// Lower-case tag, as stored and searched.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electrical => "electrical",
            Category::Hardware => "hardware",
            Category::Tools => "tools",
            Category::Safety => "safety",
            Category::Plumbing => "plumbing",
            Category::Lighting => "lighting",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

pub const MAX_RATING: f32 = 5.0;

/// A purchasable catalog item.
///
/// Deserialization goes through `validated`, so stored or imported JSON with
/// a negative price is refused and an out-of-range rating is clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawProduct")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub brand: String,
    pub price: Decimal,
    pub stock: u32,
    pub description: String,
    pub image: String,
    pub rating: f32,
    pub review_count: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Wire shape of `Product` before its invariants are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: ProductId,
    name: String,
    category: Category,
    brand: String,
    price: Decimal,
    stock: u32,
    description: String,
    image: String,
    rating: f32,
    review_count: u32,
    #[serde(default)]
    features: Vec<String>,
}

impl TryFrom<RawProduct> for Product {
    type Error = CatalogError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        Product {
            id: raw.id,
            name: raw.name,
            category: raw.category,
            brand: raw.brand,
            price: raw.price,
            stock: raw.stock,
            description: raw.description,
            image: raw.image,
            rating: raw.rating,
            review_count: raw.review_count,
            features: raw.features,
        }
        .validated()
    }
}

impl Product {
    /// Rejects a negative price. Everything else starts empty.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: Category,
        brand: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, CatalogError> {
        if price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(price));
        }

        Ok(Self {
            id,
            name: name.into(),
            category,
            brand: brand.into(),
            price,
            stock: 0,
            description: String::new(),
            image: String::new(),
            rating: 0.0,
            review_count: 0,
            features: Vec::new(),
        })
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Rating is clamped into `[0, 5]`; NaN becomes 0.
    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = clamp_rating(rating);
        self.review_count = review_count;
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Re-check a product built field by field: negative prices are
    /// rejected, the rating is clamped.
    pub fn validated(mut self) -> Result<Self, CatalogError> {
        if self.price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(self.price));
        }
        self.rating = clamp_rating(self.rating);
        Ok(self)
    }
}

pub fn clamp_rating(rating: f32) -> f32 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, MAX_RATING)
    }
}
