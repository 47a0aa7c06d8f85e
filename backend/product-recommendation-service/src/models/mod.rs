use serde::{Deserialize, Serialize};

pub type ProductId = i64;
pub type VariantId = i64;

/// A catalog row as exported by the offline pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub sub_category_name: Option<String>,
}

/// Row of the variant feature table used for wishlist similarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantFeatures {
    pub variant_id: VariantId,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub sub_category_name: Option<String>,
}

/// Strategy label used in metrics and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    SimilarItems,
    CartOnly,
    WishlistOnly,
    CartAndWishlist,
    Combined,
    PriorityBlended,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::SimilarItems => "similar_items",
            Strategy::CartOnly => "cart_only",
            Strategy::WishlistOnly => "wishlist_only",
            Strategy::CartAndWishlist => "cart_and_wishlist",
            Strategy::Combined => "combined",
            Strategy::PriorityBlended => "priority_blended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarProducts {
    pub product_ids: Vec<ProductId>,
}

/// Envelope returned by `/similar/{id}`; the status lives in the body as well as in HTTP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarItemsResponse {
    pub status: String,
    pub response_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<SimilarProducts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SimilarItemsResponse {
    pub fn success(product_ids: Vec<ProductId>) -> Self {
        Self {
            status: "success".to_string(),
            response_code: 200,
            data: Some(SimilarProducts { product_ids }),
            message: None,
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: "error".to_string(),
            response_code: 404,
            data: None,
            message: Some("Product not found".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartWishlistResponse {
    pub cart_recommendations: Vec<ProductId>,
    pub wishlist_recommendations: Vec<VariantId>,
}
