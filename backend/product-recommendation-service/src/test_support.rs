//! Small in-memory catalog shared by unit tests.
//!
//! - Primary partition: products `0..=11`, score `1 - 0.05 * |i - j|`.
//! - Secondary partition: products `12, 13, 14` (matrix rows addressed by ID).
//! - Cart catalog: products `101..=107`, score `1 - 0.1 * |i - j|`.
//! - Feature table: seven variants, several of which share IDs with the cart.

use crate::catalog::{
    CartCatalog, FeatureTable, PartitionCatalog, ProductTable, RecommendationContext,
    SimilarityMatrix,
};
use crate::models::{Product, VariantFeatures};

pub fn product(id: i64) -> Product {
    Product {
        id,
        category_name: None,
        sub_category_name: None,
    }
}

pub fn variant(variant_id: i64, category: &str, sub_category: &str) -> VariantFeatures {
    VariantFeatures {
        variant_id,
        category_name: Some(category.to_string()),
        sub_category_name: Some(sub_category.to_string()),
    }
}

fn distance_matrix(name: &str, size: usize, step: f32) -> SimilarityMatrix {
    let rows = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| 1.0 - step * (i as f32 - j as f32).abs())
                .collect()
        })
        .collect();
    SimilarityMatrix::from_rows(name, rows).unwrap()
}

pub fn sample_context() -> RecommendationContext {
    let primary = PartitionCatalog::new(
        ProductTable::new("product_data_1", (0..12).map(product).collect()).unwrap(),
        distance_matrix("data_1_similarity", 12, 0.05),
    )
    .unwrap();

    let mut secondary_rows = vec![vec![0.0; 3]; 12];
    secondary_rows.push(vec![1.0, 0.2, 0.7]);
    secondary_rows.push(vec![0.2, 1.0, 0.4]);
    secondary_rows.push(vec![0.7, 0.4, 1.0]);
    let secondary = PartitionCatalog::new(
        ProductTable::new("product_data_2", vec![product(12), product(13), product(14)]).unwrap(),
        SimilarityMatrix::from_rows("data_2_similarity", secondary_rows).unwrap(),
    )
    .unwrap();

    let cart = CartCatalog::new(
        ProductTable::new("data", (101..=107).map(product).collect()).unwrap(),
        distance_matrix("similarity_matrix", 7, 0.1),
    )
    .unwrap();

    let features = FeatureTable::new(vec![
        variant(101, "shoes", "running"),
        variant(501, "shoes", "running"),
        variant(102, "shoes", "running"),
        variant(103, "shoes", "trail"),
        variant(502, "shoes", "trail"),
        variant(503, "bags", "running"),
        variant(504, "bags", "tote"),
    ])
    .unwrap();

    RecommendationContext::new(primary, secondary, cart, features)
}
