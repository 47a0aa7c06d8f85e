use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use super::lookup::SimilarityLookup;
use super::ranker::{rank, rank_wishlist};
use crate::catalog::RecommendationContext;
use crate::config::RecommendationConfig;
use crate::error::LookupError;
use crate::metrics::{self, Outcome};
use crate::models::{CartWishlistResponse, ProductId, Strategy, VariantId};

/// What a strategy does when its seed is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSeed {
    /// Surface the [`LookupError`] to the caller.
    Reject,
    /// Treat the seed as having no recommendations.
    Empty,
}

/// Recommendation strategies over one immutable catalog snapshot.
#[derive(Debug, Clone)]
pub struct RecommendationService {
    context: Arc<RecommendationContext>,
    config: RecommendationConfig,
}

impl RecommendationService {
    pub fn new(context: Arc<RecommendationContext>, config: RecommendationConfig) -> Self {
        Self { context, config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    fn lookup(&self) -> SimilarityLookup<'_> {
        SimilarityLookup::new(&self.context)
    }

    fn settle(
        strategy: Strategy,
        policy: MissingSeed,
        result: Result<Vec<i64>, LookupError>,
    ) -> Result<Vec<i64>, LookupError> {
        match result {
            Ok(items) => {
                metrics::record_strategy(strategy, Outcome::of(&items));
                Ok(items)
            }
            Err(err) => {
                metrics::record_strategy(strategy, Outcome::NotFound);
                debug!(
                    strategy = strategy.as_str(),
                    policy = ?policy,
                    error = %err,
                    "Seed not found"
                );
                match policy {
                    MissingSeed::Reject => Err(err),
                    MissingSeed::Empty => Ok(Vec::new()),
                }
            }
        }
    }

    /// Most similar products from the seed's own partition, seed excluded.
    pub fn similar_items(&self, product_id: ProductId) -> Result<Vec<ProductId>, LookupError> {
        let result = self.lookup().resolve_partition(product_id).map(|found| {
            let catalog = self.context.partition(found.partition);
            debug!(
                product_id,
                partition = found.partition.as_str(),
                "Ranking similar items"
            );
            rank(
                catalog.similarity(),
                &[found.matrix_row],
                catalog.table().index().ids(),
                &[product_id],
                self.config.similar_items_limit,
            )
        });
        Self::settle(Strategy::SimilarItems, MissingSeed::Reject, result)
    }

    /// Cart-matrix neighbours of a single product.
    pub fn cart_only(
        &self,
        product_id: ProductId,
        n: usize,
        policy: MissingSeed,
    ) -> Result<Vec<ProductId>, LookupError> {
        let result = self.lookup().resolve_cart(product_id).map(|row| {
            let cart = &self.context.cart;
            rank(
                cart.similarity(),
                &[row],
                cart.table().index().ids(),
                &[product_id],
                n,
            )
        });
        Self::settle(Strategy::CartOnly, policy, result)
    }

    /// Feature-similarity recommendations; at most two items.
    pub fn wishlist_only(
        &self,
        variant_id: VariantId,
        n: usize,
        policy: MissingSeed,
    ) -> Result<Vec<VariantId>, LookupError> {
        let result = self.lookup().resolve_variant(variant_id).map(|row| {
            let features = &self.context.features;
            rank_wishlist(features.cosine(), row, features.index().ids(), n)
        });
        Self::settle(Strategy::WishlistOnly, policy, result)
    }

    /// Both halves with unknown seeds swallowed; records no strategy outcome of its own.
    fn cart_wishlist_halves(&self, variant_id: VariantId) -> CartWishlistResponse {
        CartWishlistResponse {
            cart_recommendations: self
                .cart_only(variant_id, self.config.cart_limit, MissingSeed::Empty)
                .unwrap_or_default(),
            wishlist_recommendations: self
                .wishlist_only(variant_id, self.config.cart_limit, MissingSeed::Empty)
                .unwrap_or_default(),
        }
    }

    pub fn cart_and_wishlist(&self, variant_id: VariantId) -> CartWishlistResponse {
        let response = self.cart_wishlist_halves(variant_id);
        let outcome = if response.cart_recommendations.is_empty()
            && response.wishlist_recommendations.is_empty()
        {
            Outcome::Empty
        } else {
            Outcome::Hit
        };
        metrics::record_strategy(Strategy::CartAndWishlist, outcome);
        response
    }

    /// Cart list followed by wishlist list. IDs present in both halves appear twice.
    pub fn combined(&self, variant_id: VariantId) -> Vec<i64> {
        let CartWishlistResponse {
            mut cart_recommendations,
            wishlist_recommendations,
        } = self.cart_wishlist_halves(variant_id);
        cart_recommendations.extend(wishlist_recommendations);
        metrics::record_strategy(Strategy::Combined, Outcome::of(&cart_recommendations));
        cart_recommendations
    }

    /// Cart list reordered by wishlist agreement.
    ///
    /// Items in both lists come first, then the remaining cart items (both in
    /// cart rank order), then wishlist-only items in random order. Empty when
    /// the seed is not in the cart catalog.
    pub fn cart_wishlist_aware<R: Rng + ?Sized>(
        &self,
        variant_id: VariantId,
        wishlist: &[VariantId],
        n: usize,
        rng: &mut R,
    ) -> Vec<i64> {
        let cart = match self.cart_only(variant_id, n, MissingSeed::Reject) {
            Ok(cart) => cart,
            Err(_) => return Vec::new(),
        };

        let wishlisted: HashSet<i64> = wishlist.iter().copied().collect();
        let (mut ordered, cart_rest): (Vec<i64>, Vec<i64>) =
            cart.into_iter().partition(|id| wishlisted.contains(id));
        ordered.extend(cart_rest);

        let emitted: HashSet<i64> = ordered.iter().copied().collect();
        let mut wishlist_rest: Vec<i64> = Vec::new();
        for &id in wishlist {
            if !emitted.contains(&id) && !wishlist_rest.contains(&id) {
                wishlist_rest.push(id);
            }
        }
        wishlist_rest.shuffle(rng);
        ordered.extend(wishlist_rest);

        ordered.truncate(n);
        ordered
    }

    /// Shuffled blend of wishlist and cart-aware recommendations, at most `n` distinct IDs.
    pub fn priority_blended<R: Rng + ?Sized>(
        &self,
        variant_id: VariantId,
        n: usize,
        rng: &mut R,
    ) -> Vec<i64> {
        let wishlist = self
            .wishlist_only(variant_id, n, MissingSeed::Empty)
            .unwrap_or_default();
        let aware = self.cart_wishlist_aware(variant_id, &wishlist, n, rng);

        let mut blended: Vec<i64> = wishlist.into_iter().chain(aware).collect();
        blended.shuffle(rng);

        let mut seen = HashSet::with_capacity(blended.len());
        blended.retain(|id| seen.insert(*id));
        blended.truncate(n);

        debug!(variant_id, n, returned = blended.len(), "Priority blend computed");
        metrics::record_strategy(Strategy::PriorityBlended, Outcome::of(&blended));
        blended
    }
}
