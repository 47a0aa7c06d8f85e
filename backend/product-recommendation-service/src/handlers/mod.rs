use actix_web::{web, HttpResponse};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{ProductId, RecommendationsResponse, SimilarItemsResponse, VariantId};
use crate::services::{MissingSeed, RecommendationService};

pub struct RecommendationHandlerState {
    pub service: Arc<RecommendationService>,
}

impl RecommendationHandlerState {
    pub fn new(service: Arc<RecommendationService>) -> Self {
        Self { service }
    }

    /// Per-request random source; reseeded identically when a shuffle seed is configured.
    fn rng(&self) -> StdRng {
        match self.service.config().shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BlendQuery {
    pub n: Option<usize>,
}

pub async fn get_similar_items(
    path: web::Path<ProductId>,
    state: web::Data<RecommendationHandlerState>,
) -> HttpResponse {
    let product_id = path.into_inner();

    match state.service.similar_items(product_id) {
        Ok(product_ids) => HttpResponse::Ok().json(SimilarItemsResponse::success(product_ids)),
        Err(err) => {
            debug!(product_id, error = %err, "Similar items lookup missed");
            // Miss is reported in the envelope; transport status stays 200.
            HttpResponse::Ok().json(SimilarItemsResponse::not_found())
        }
    }
}

pub async fn get_cart_recommendations(
    path: web::Path<ProductId>,
    state: web::Data<RecommendationHandlerState>,
) -> Result<HttpResponse> {
    let product_id = path.into_inner();
    let limit = state.service.config().cart_limit;

    let recommendations = state
        .service
        .cart_only(product_id, limit, MissingSeed::Reject)
        .map_err(|err| {
            warn!(product_id, error = %err, "Cart recommendation rejected");
            AppError::from(err)
        })?;

    Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
}

pub async fn get_wishlist_recommendations(
    path: web::Path<VariantId>,
    state: web::Data<RecommendationHandlerState>,
) -> Result<HttpResponse> {
    let variant_id = path.into_inner();
    let limit = state.service.config().cart_limit;

    let recommendations = state
        .service
        .wishlist_only(variant_id, limit, MissingSeed::Reject)
        .map_err(|err| {
            warn!(variant_id, error = %err, "Wishlist recommendation rejected");
            AppError::from(err)
        })?;

    Ok(HttpResponse::Ok().json(RecommendationsResponse { recommendations }))
}

pub async fn get_cart_wishlist_recommendations(
    path: web::Path<VariantId>,
    state: web::Data<RecommendationHandlerState>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.service.cart_and_wishlist(path.into_inner()))
}

pub async fn get_combined_recommendations(
    path: web::Path<VariantId>,
    state: web::Data<RecommendationHandlerState>,
) -> HttpResponse {
    let recommendations = state.service.combined(path.into_inner());
    HttpResponse::Ok().json(RecommendationsResponse { recommendations })
}

/// Responds with a bare JSON array, not an object.
pub async fn get_priority_recommendations(
    path: web::Path<VariantId>,
    query: web::Query<BlendQuery>,
    state: web::Data<RecommendationHandlerState>,
) -> HttpResponse {
    let config = state.service.config();
    let n = query
        .n
        .unwrap_or(config.blended_default_limit)
        .min(config.blended_max_limit);

    let mut rng = state.rng();
    let recommendations = state
        .service
        .priority_blended(path.into_inner(), n, &mut rng);

    HttpResponse::Ok().json(recommendations)
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/similar/{prod_id}", web::get().to(get_similar_items))
        .route("/cart/{variant_id}", web::get().to(get_cart_recommendations))
        .route(
            "/wishlist/{variant_id}",
            web::get().to(get_wishlist_recommendations),
        )
        .route(
            "/cart_wishlist/{variant_id}",
            web::get().to(get_cart_wishlist_recommendations),
        )
        .route(
            "/combined/{variant_id}",
            web::get().to(get_combined_recommendations),
        )
        .route(
            "/recommendations/{variant_id}",
            web::get().to(get_priority_recommendations),
        );
}
