//! Immutable catalog snapshot.
//!
//! Everything here is built once at startup from the offline artifacts and then
//! shared read-only between request workers. Construction checks that every
//! table is aligned with its similarity matrix so the ranking code can index
//! without bounds surprises.

mod features;
pub mod loader;
mod matrix;

pub use features::{encode, EncodedFeatures};
pub use loader::load_context;
pub use matrix::SimilarityMatrix;

use std::collections::HashMap;
use tracing::info;

use crate::error::CatalogError;
use crate::models::{Product, VariantFeatures};

/// External ID → row position, plus the reverse mapping in row order.
#[derive(Debug, Clone, Default)]
pub struct IdIndex {
    ids: Vec<i64>,
    positions: HashMap<i64, usize>,
}

impl IdIndex {
    pub fn build(name: &str, ids: Vec<i64>) -> Result<Self, CatalogError> {
        let mut positions = HashMap::with_capacity(ids.len());
        for (row, &id) in ids.iter().enumerate() {
            if positions.insert(id, row).is_some() {
                return Err(CatalogError::DuplicateId {
                    name: name.to_string(),
                    id,
                });
            }
        }
        Ok(Self { ids, positions })
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.positions.get(&id).copied()
    }

    /// IDs in row order.
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ProductTable {
    name: String,
    index: IdIndex,
}

impl ProductTable {
    pub fn new(name: impl Into<String>, products: Vec<Product>) -> Result<Self, CatalogError> {
        let name = name.into();
        let index = IdIndex::build(&name, products.iter().map(|p| p.id).collect())?;
        Ok(Self { name, index })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &IdIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Which similar-items partition a product was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Primary,
    Secondary,
}

impl Partition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Primary => "data_1",
            Partition::Secondary => "data_2",
        }
    }
}

/// A similar-items sub-catalog and its ID-addressed similarity matrix.
#[derive(Debug, Clone)]
pub struct PartitionCatalog {
    table: ProductTable,
    similarity: SimilarityMatrix,
}

impl PartitionCatalog {
    pub fn new(table: ProductTable, similarity: SimilarityMatrix) -> Result<Self, CatalogError> {
        if similarity.ncols() != table.len() {
            return Err(CatalogError::ShapeMismatch {
                name: similarity.name().to_string(),
                detail: format!(
                    "{} columns but {} has {} rows",
                    similarity.ncols(),
                    table.name(),
                    table.len()
                ),
            });
        }

        // Rows are addressed by product ID, so every ID must name a row.
        if let Some(&bad) = table
            .index()
            .ids()
            .iter()
            .find(|&&id| id < 0 || id as usize >= similarity.nrows())
        {
            return Err(CatalogError::ShapeMismatch {
                name: similarity.name().to_string(),
                detail: format!(
                    "product id {} from {} has no row ({} rows)",
                    bad,
                    table.name(),
                    similarity.nrows()
                ),
            });
        }

        Ok(Self { table, similarity })
    }

    pub fn table(&self) -> &ProductTable {
        &self.table
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

/// Cart catalog with its square, row-aligned similarity matrix.
#[derive(Debug, Clone)]
pub struct CartCatalog {
    table: ProductTable,
    similarity: SimilarityMatrix,
}

impl CartCatalog {
    pub fn new(table: ProductTable, similarity: SimilarityMatrix) -> Result<Self, CatalogError> {
        if !similarity.is_square() || similarity.nrows() != table.len() {
            return Err(CatalogError::ShapeMismatch {
                name: similarity.name().to_string(),
                detail: format!(
                    "expected {n}x{n} for {}, got {}x{}",
                    table.name(),
                    similarity.nrows(),
                    similarity.ncols(),
                    n = table.len()
                ),
            });
        }
        Ok(Self { table, similarity })
    }

    pub fn table(&self) -> &ProductTable {
        &self.table
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

/// Variant feature table with its one-hot encoding and cosine matrix.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    index: IdIndex,
    columns: Vec<String>,
    cosine: SimilarityMatrix,
}

impl FeatureTable {
    pub fn new(rows: Vec<VariantFeatures>) -> Result<Self, CatalogError> {
        let index = IdIndex::build("product_features", rows.iter().map(|r| r.variant_id).collect())?;
        let EncodedFeatures { columns, matrix } = encode(&rows);
        let cosine = SimilarityMatrix::cosine("feature_cosine", &matrix);

        Ok(Self {
            index,
            columns,
            cosine,
        })
    }

    pub fn index(&self) -> &IdIndex {
        &self.index
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn cosine(&self) -> &SimilarityMatrix {
        &self.cosine
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// All catalog data a request can touch.
#[derive(Debug, Clone)]
pub struct RecommendationContext {
    pub primary: PartitionCatalog,
    pub secondary: PartitionCatalog,
    pub cart: CartCatalog,
    pub features: FeatureTable,
}

impl RecommendationContext {
    pub fn new(
        primary: PartitionCatalog,
        secondary: PartitionCatalog,
        cart: CartCatalog,
        features: FeatureTable,
    ) -> Self {
        Self {
            primary,
            secondary,
            cart,
            features,
        }
    }

    pub fn partition(&self, partition: Partition) -> &PartitionCatalog {
        match partition {
            Partition::Primary => &self.primary,
            Partition::Secondary => &self.secondary,
        }
    }

    pub fn log_summary(&self) {
        info!(
            data_1 = self.primary.table().len(),
            data_2 = self.secondary.table().len(),
            cart = self.cart.table().len(),
            variants = self.features.len(),
            feature_columns = self.features.columns().len(),
            "Catalog loaded"
        );
    }
}
