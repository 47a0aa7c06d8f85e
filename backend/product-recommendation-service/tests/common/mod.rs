use product_recommendation_service::catalog::{
    CartCatalog, FeatureTable, PartitionCatalog, ProductTable, SimilarityMatrix,
};
use product_recommendation_service::config::RecommendationConfig;
use product_recommendation_service::models::{Product, VariantFeatures};
use product_recommendation_service::{RecommendationContext, RecommendationService};
use std::sync::Arc;

fn product(id: i64) -> Product {
    Product {
        id,
        category_name: None,
        sub_category_name: None,
    }
}

fn variant(variant_id: i64, category: &str, sub_category: &str) -> VariantFeatures {
    VariantFeatures {
        variant_id,
        category_name: Some(category.to_string()),
        sub_category_name: Some(sub_category.to_string()),
    }
}

fn matrix(name: &str, rows: Vec<Vec<f32>>) -> SimilarityMatrix {
    SimilarityMatrix::from_rows(name, rows).expect("valid matrix")
}

/// Catalog used by the HTTP tests.
///
/// Cart catalog `[101, 102, 103]` with matrix
/// `[[1, .9, .2], [.9, 1, .1], [.2, .1, 1]]`; partitions `{0, 1, 2}` and `{3, 4}`.
pub fn context() -> RecommendationContext {
    let primary = PartitionCatalog::new(
        ProductTable::new("product_data_1", vec![product(0), product(1), product(2)]).unwrap(),
        matrix(
            "data_1_similarity",
            vec![vec![1.0, 0.8, 0.3], vec![0.8, 1.0, 0.5], vec![0.3, 0.5, 1.0]],
        ),
    )
    .unwrap();

    let secondary = PartitionCatalog::new(
        ProductTable::new("product_data_2", vec![product(3), product(4)]).unwrap(),
        matrix(
            "data_2_similarity",
            vec![
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![0.0, 0.0],
                vec![1.0, 0.6],
                vec![0.6, 1.0],
            ],
        ),
    )
    .unwrap();

    let cart = CartCatalog::new(
        ProductTable::new("data", vec![product(101), product(102), product(103)]).unwrap(),
        matrix(
            "similarity_matrix",
            vec![vec![1.0, 0.9, 0.2], vec![0.9, 1.0, 0.1], vec![0.2, 0.1, 1.0]],
        ),
    )
    .unwrap();

    let features = FeatureTable::new(vec![
        variant(101, "shoes", "running"),
        variant(102, "shoes", "running"),
        variant(103, "shoes", "trail"),
        variant(201, "bags", "running"),
        variant(202, "bags", "tote"),
    ])
    .unwrap();

    RecommendationContext::new(primary, secondary, cart, features)
}

pub fn service(shuffle_seed: Option<u64>) -> Arc<RecommendationService> {
    let config = RecommendationConfig {
        shuffle_seed,
        ..RecommendationConfig::default()
    };
    Arc::new(RecommendationService::new(Arc::new(context()), config))
}
