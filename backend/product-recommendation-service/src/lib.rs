pub mod catalog;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;

pub use catalog::RecommendationContext;
pub use config::Config;
pub use handlers::{register_routes, RecommendationHandlerState};
pub use services::{MissingSeed, RecommendationService};
