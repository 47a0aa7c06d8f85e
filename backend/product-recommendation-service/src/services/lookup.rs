use crate::catalog::{Partition, RecommendationContext};
use crate::error::{CatalogKind, LookupError};
use crate::models::{ProductId, VariantId};

/// Where a similar-items seed lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionMatch {
    pub partition: Partition,
    /// Row of the partition matrix holding this product's scores.
    pub matrix_row: usize,
}

/// Resolves external IDs to row positions. Nothing else in the crate does this translation.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityLookup<'a> {
    context: &'a RecommendationContext,
}

impl<'a> SimilarityLookup<'a> {
    pub fn new(context: &'a RecommendationContext) -> Self {
        Self { context }
    }

    /// Checks the primary partition first, then the secondary one.
    pub fn resolve_partition(&self, product_id: ProductId) -> Result<PartitionMatch, LookupError> {
        [Partition::Primary, Partition::Secondary]
            .into_iter()
            .find(|&partition| {
                self.context
                    .partition(partition)
                    .table()
                    .index()
                    .position(product_id)
                    .is_some()
            })
            .map(|partition| PartitionMatch {
                partition,
                // Partition construction guarantees non-negative IDs within the matrix.
                matrix_row: product_id as usize,
            })
            .ok_or_else(|| LookupError::not_found(CatalogKind::Partitions, product_id))
    }

    pub fn resolve_cart(&self, product_id: ProductId) -> Result<usize, LookupError> {
        self.context
            .cart
            .table()
            .index()
            .position(product_id)
            .ok_or_else(|| LookupError::not_found(CatalogKind::Cart, product_id))
    }

    pub fn resolve_variant(&self, variant_id: VariantId) -> Result<usize, LookupError> {
        self.context
            .features
            .index()
            .position(variant_id)
            .ok_or_else(|| LookupError::not_found(CatalogKind::Wishlist, variant_id))
    }
}
