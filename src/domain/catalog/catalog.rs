use rust_decimal::Decimal;

use super::errors::CatalogError;
use super::seed::seed_products;
use super::value_objects::{clamp_rating, Category, Product, ProductId};
use crate::utils::ids;

// ============================================================================
// Catalog Store
// ============================================================================
//
// Holds the product list. Mutation is limited to add and remove; queries
// beyond direct reads go through `filter_products`.
//
// ============================================================================

pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1581244277943-fe4a9c777189?auto=format&fit=crop&q=80&w=500";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The demo catalog the storefront starts with.
    pub fn seeded() -> Self {
        Self::new(seed_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Appends after `Product::validated`. The caller owns the id;
    /// duplicates are not checked.
    pub fn add(&mut self, product: Product) -> Result<&Product, CatalogError> {
        let product = product.validated()?;
        tracing::info!(product_id = %product.id, name = %product.name, "Product added to catalog");
        let index = self.products.len();
        self.products.push(product);
        Ok(&self.products[index])
    }

    /// No-op when the id is absent.
    pub fn remove(&mut self, id: &ProductId) {
        let before = self.products.len();
        self.products.retain(|p| &p.id != id);

        if self.products.len() == before {
            tracing::debug!(product_id = %id, "Remove ignored, product not in catalog");
        } else {
            tracing::info!(product_id = %id, "Product removed from catalog");
        }
    }

    /// Products with stock strictly below `threshold`, in catalog order.
    pub fn low_stock(&self, threshold: u32) -> Vec<&Product> {
        self.products.iter().filter(|p| p.stock < threshold).collect()
    }
}

// ============================================================================
// Product Draft - the admin "add product" form
// ============================================================================

/// Partially filled product. `build` assigns a fresh id.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub category: Category,
    pub brand: String,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub description: String,
    pub image: String,
    pub rating: f32,
    pub features: Vec<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: None,
            category: Category::Electrical,
            brand: String::new(),
            price: None,
            stock: None,
            description: String::new(),
            image: DEFAULT_PRODUCT_IMAGE.to_string(),
            rating: 0.0,
            features: Vec::new(),
        }
    }
}

impl ProductDraft {
    /// Name and a positive price are required; stock defaults to zero.
    pub fn build(self) -> Result<Product, CatalogError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(CatalogError::MissingName)?;

        let price = match self.price {
            Some(p) if p > Decimal::ZERO => p,
            Some(p) if p < Decimal::ZERO => return Err(CatalogError::NegativePrice(p)),
            _ => return Err(CatalogError::MissingPrice),
        };

        Ok(Product {
            id: ProductId::new(ids::short_id()),
            name,
            category: self.category,
            brand: self.brand,
            price,
            stock: self.stock.unwrap_or(0),
            description: self.description,
            image: self.image,
            rating: clamp_rating(self.rating),
            review_count: 0,
            features: self.features,
        })
    }
}
