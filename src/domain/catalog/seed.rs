use rust_decimal::Decimal;

use super::value_objects::{Category, Product, ProductId};

// Demo inventory. Prices are in rupees.

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    category: Category,
    brand: &'static str,
    price: i64,
    stock: u32,
    description: &'static str,
    rating: f32,
    review_count: u32,
    features: &'static [&'static str],
}

const SEED: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Bosch Heavy Duty Drill",
        category: Category::Tools,
        brand: "Bosch",
        price: 4599,
        stock: 45,
        description: "600W impact drill for masonry, wood and steel.",
        rating: 4.6,
        review_count: 128,
        features: &["600W motor", "Variable speed", "Reverse rotation"],
    },
    SeedProduct {
        id: "2",
        name: "Havells Modular Switch Set",
        category: Category::Electrical,
        brand: "Havells",
        price: 349,
        stock: 150,
        description: "Pack of 6 one-way modular switches.",
        rating: 4.3,
        review_count: 86,
        features: &["6A rating", "Fire retardant polycarbonate"],
    },
    SeedProduct {
        id: "3",
        name: "Philips LED Bulb 9W",
        category: Category::Lighting,
        brand: "Philips",
        price: 129,
        stock: 320,
        description: "Cool daylight B22 LED bulb.",
        rating: 4.5,
        review_count: 412,
        features: &["B22 base", "6500K"],
    },
    SeedProduct {
        id: "4",
        name: "Stanley Claw Hammer",
        category: Category::Tools,
        brand: "Stanley",
        price: 699,
        stock: 12,
        description: "Fibreglass handle curved claw hammer, 450g.",
        rating: 4.7,
        review_count: 64,
        features: &["Anti-vibration grip"],
    },
    SeedProduct {
        id: "5",
        name: "Karam Safety Helmet",
        category: Category::Safety,
        brand: "Karam",
        price: 249,
        stock: 8,
        description: "ISI marked industrial safety helmet with ratchet.",
        rating: 4.1,
        review_count: 37,
        features: &["Ratchet adjustment", "Ventilated shell"],
    },
    SeedProduct {
        id: "6",
        name: "Supreme PVC Pipe 1 inch",
        category: Category::Plumbing,
        brand: "Supreme",
        price: 210,
        stock: 90,
        description: "3 metre schedule-40 PVC pipe.",
        rating: 3.9,
        review_count: 22,
        features: &[],
    },
    SeedProduct {
        id: "7",
        name: "Godrej Mortise Lock",
        category: Category::Hardware,
        brand: "Godrej",
        price: 1899,
        stock: 18,
        description: "Stainless steel mortise lock with three keys.",
        rating: 4.4,
        review_count: 51,
        features: &["Stainless steel", "3 keys"],
    },
    SeedProduct {
        id: "8",
        name: "Bosch Laser Distance Meter",
        category: Category::Tools,
        brand: "Bosch",
        price: 5499,
        stock: 25,
        description: "Measures up to 50 metres with millimetre precision.",
        rating: 4.8,
        review_count: 93,
        features: &["50m range", "Backlit display"],
    },
];

pub fn seed_products() -> Vec<Product> {
    SEED.iter()
        .map(|s| Product {
            id: ProductId::new(s.id),
            name: s.name.to_string(),
            category: s.category,
            brand: s.brand.to_string(),
            price: Decimal::new(s.price, 0),
            stock: s.stock,
            description: s.description.to_string(),
            image: super::catalog::DEFAULT_PRODUCT_IMAGE.to_string(),
            rating: s.rating,
            review_count: s.review_count,
            features: s.features.iter().map(|f| f.to_string()).collect(),
        })
        .collect()
}
