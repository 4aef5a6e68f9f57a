//! Server crate for the feed recommender.
//!
//! Contains the orchestrator that ties candidate sources and pipelines into
//! the warm and cold-start recommendation paths, plus the hot-reloading
//! data cache and the HTTP API in front of them.

pub mod api;
pub mod cache;
pub mod category;
pub mod config;
pub mod error;
pub mod orchestrator;

pub use cache::{DataCache, DataPaths};
pub use config::Config;
pub use error::RecommendationError;
pub use orchestrator::{
    ColdStartRecommender, FeedRecommender, MoodQuery, RecommendationEngine, FEED_LIMIT,
};
