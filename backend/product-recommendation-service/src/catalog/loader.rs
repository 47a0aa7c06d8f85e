use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info};

use super::{
    CartCatalog, FeatureTable, PartitionCatalog, ProductTable, RecommendationContext,
    SimilarityMatrix,
};
use crate::config::DataConfig;
use crate::error::CatalogError;
use crate::models::{Product, VariantFeatures};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_products(name: &str, path: &Path) -> Result<ProductTable, CatalogError> {
    let products: Vec<Product> = read_json(path)?;
    debug!(table = name, rows = products.len(), "Read product table");
    ProductTable::new(name, products)
}

fn read_matrix(name: &str, path: &Path) -> Result<SimilarityMatrix, CatalogError> {
    let rows: Vec<Vec<f32>> = read_json(path)?;
    let matrix = SimilarityMatrix::from_rows(name, rows)?;
    debug!(
        matrix = name,
        rows = matrix.nrows(),
        cols = matrix.ncols(),
        "Read similarity matrix"
    );
    Ok(matrix)
}

/// Loads every artifact named in `config` and checks their alignment.
pub fn load_context(config: &DataConfig) -> Result<RecommendationContext, CatalogError> {
    info!(data_dir = %config.data_dir.display(), "Loading recommendation artifacts");

    let primary = PartitionCatalog::new(
        read_products("product_data_1", &config.product_data_1_path())?,
        read_matrix("data_1_similarity", &config.data_1_similarity_path())?,
    )?;
    let secondary = PartitionCatalog::new(
        read_products("product_data_2", &config.product_data_2_path())?,
        read_matrix("data_2_similarity", &config.data_2_similarity_path())?,
    )?;
    let cart = CartCatalog::new(
        read_products("data", &config.cart_catalog_path())?,
        read_matrix("similarity_matrix", &config.cart_similarity_path())?,
    )?;

    let feature_rows: Vec<VariantFeatures> = read_json(&config.product_features_path())?;
    let features = FeatureTable::new(feature_rows)?;

    let context = RecommendationContext::new(primary, secondary, cart, features);
    context.log_summary();
    Ok(context)
}
