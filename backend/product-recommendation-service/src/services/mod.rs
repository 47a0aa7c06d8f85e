pub mod lookup;
pub mod ranker;
pub mod strategies;

pub use lookup::{PartitionMatch, SimilarityLookup};
pub use ranker::{rank, rank_wishlist, WISHLIST_SLICE};
pub use strategies::{MissingSeed, RecommendationService};
