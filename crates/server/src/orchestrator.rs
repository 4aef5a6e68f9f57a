//! # Recommendation Orchestrator
//!
//! Coordinates both recommendation paths:
//!
//! Warm path (`FeedRecommender`), for users with view history:
//! 1. Resolve the category id
//! 2. Build the user context from the view history
//! 3. Generate similarity candidates (top 5 per viewed post)
//! 4. Run the warm pipeline (dedupe rows, category, mood, rating, unique title)
//! 5. Return the first 10
//!
//! Cold-start path (`ColdStartRecommender`), for users without history:
//! 1. Parse the requested moods
//! 2. Generate mood candidates from the cold-start catalog
//! 3. Rank by rating and dedupe by title
//!
//! Both paths are synchronous and CPU-bound; async callers should run them
//! inside `spawn_blocking`.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use data_loader::{Catalog, ContentIndex, Item};
use pipeline::filters::{CategoryFilter, DuplicateRowFilter, MoodFilter, UniqueTitleFilter};
use pipeline::{FilterPipeline, RatingRanker};
use sources::user_context::build_user_context;
use sources::{Candidate, MoodSource, SimilaritySource, UserContext};

use crate::category::resolve_category;
use crate::error::RecommendationError;

/// Maximum number of posts in a warm feed
pub const FEED_LIMIT: usize = 10;

/// Moods requested by a caller.
///
/// Query strings carry moods as one comma-separated value while programmatic
/// callers usually already hold a list. Both normalize the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodQuery {
    Csv(String),
    List(Vec<String>),
}

impl MoodQuery {
    /// Trimmed, non-empty mood labels in request order
    pub fn into_moods(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            MoodQuery::Csv(text) => text.split(',').map(str::to_string).collect(),
            MoodQuery::List(moods) => moods,
        };
        raw.into_iter()
            .map(|mood| mood.trim().to_string())
            .filter(|mood| !mood.is_empty())
            .collect()
    }
}

impl From<&str> for MoodQuery {
    fn from(text: &str) -> Self {
        MoodQuery::Csv(text.to_string())
    }
}

impl From<String> for MoodQuery {
    fn from(text: String) -> Self {
        MoodQuery::Csv(text)
    }
}

impl From<Vec<String>> for MoodQuery {
    fn from(moods: Vec<String>) -> Self {
        MoodQuery::List(moods)
    }
}

/// Item-to-item feed for users with view history
pub struct FeedRecommender {
    content: Arc<ContentIndex>,
    similarity: SimilaritySource,
    pipeline: FilterPipeline,
}

impl FeedRecommender {
    pub fn new(content: Arc<ContentIndex>) -> Self {
        let similarity = SimilaritySource::new(content.clone());
        let pipeline = FilterPipeline::new()
            .add_filter(DuplicateRowFilter)
            .add_filter(CategoryFilter)
            .add_filter(MoodFilter)
            .add_filter(RatingRanker::new(content.catalog().has_rating_column()))
            .add_filter(UniqueTitleFilter);

        Self {
            content,
            similarity,
            pipeline,
        }
    }

    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    /// Up to [`FEED_LIMIT`] posts similar to what `username` has viewed.
    ///
    /// Unknown users and users with no matching candidates get an empty
    /// feed, not an error.
    pub fn recommend(
        &self,
        username: &str,
        category_id: Option<&str>,
        moods: Option<MoodQuery>,
    ) -> Result<Vec<Item>, RecommendationError> {
        let start_time = Instant::now();

        let category = resolve_category(category_id);
        let moods = moods.map(MoodQuery::into_moods).unwrap_or_default();

        let context = build_user_context(self.content.catalog(), username)
            .with_category(category.map(str::to_string))
            .with_moods(moods);

        if !context.has_history() {
            info!("No view history for '{}', returning empty feed", username);
            return Ok(Vec::new());
        }

        let candidates = self.similarity.get_candidates(&context);
        debug!(
            "Generated {} similarity candidates from {} viewed posts",
            candidates.len(),
            context.viewed_items.len()
        );

        let ranked = self.pipeline.apply(candidates, &context)?;
        let posts = take_items(ranked, Some(FEED_LIMIT));

        info!(
            "Recommended {} posts for '{}' (category: {:?}) in {:.2?}",
            posts.len(),
            username,
            category,
            start_time.elapsed()
        );
        Ok(posts)
    }
}

/// Mood-driven feed for users without history
pub struct ColdStartRecommender {
    catalog: Arc<Catalog>,
    moods: MoodSource,
    pipeline: FilterPipeline,
}

impl ColdStartRecommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let moods = MoodSource::new(catalog.clone());
        let pipeline = FilterPipeline::new()
            .add_filter(RatingRanker::new(catalog.has_rating_column()))
            .add_filter(UniqueTitleFilter);

        Self {
            catalog,
            moods,
            pipeline,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every cold-start post matching any requested mood, best rated first
    pub fn recommend_by_mood(
        &self,
        moods: impl Into<MoodQuery>,
    ) -> Result<Vec<Item>, RecommendationError> {
        let start_time = Instant::now();
        let moods = moods.into().into_moods();

        let candidates = self.moods.get_candidates(&moods);
        let context = UserContext::anonymous().with_moods(moods);
        let ranked = self.pipeline.apply(candidates, &context)?;
        let posts = take_items(ranked, None);

        info!(
            "Recommended {} cold-start posts for moods {:?} in {:.2?}",
            posts.len(),
            context.moods,
            start_time.elapsed()
        );
        Ok(posts)
    }
}

/// Both recommendation paths over one pair of loaded datasets
pub struct RecommendationEngine {
    feed: FeedRecommender,
    cold_start: ColdStartRecommender,
}

impl RecommendationEngine {
    pub fn new(content: Arc<ContentIndex>, cold_start: Arc<Catalog>) -> Self {
        Self {
            feed: FeedRecommender::new(content),
            cold_start: ColdStartRecommender::new(cold_start),
        }
    }

    pub fn feed(&self) -> &FeedRecommender {
        &self.feed
    }

    pub fn cold_start(&self) -> &ColdStartRecommender {
        &self.cold_start
    }

    /// See [`FeedRecommender::recommend`]
    pub fn recommend(
        &self,
        username: &str,
        category_id: Option<&str>,
        moods: Option<MoodQuery>,
    ) -> Result<Vec<Item>, RecommendationError> {
        self.feed.recommend(username, category_id, moods)
    }

    /// See [`ColdStartRecommender::recommend_by_mood`]
    pub fn recommend_by_mood(
        &self,
        moods: impl Into<MoodQuery>,
    ) -> Result<Vec<Item>, RecommendationError> {
        self.cold_start.recommend_by_mood(moods)
    }
}

fn take_items(candidates: Vec<Candidate>, limit: Option<usize>) -> Vec<Item> {
    let limit = limit.unwrap_or(candidates.len());
    candidates
        .into_iter()
        .take(limit)
        .map(|candidate| candidate.item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{CatalogSchema, SimilarityMatrix};
    use std::collections::HashSet;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Two posts viewed by u1; X's row ranks B first
    fn build_small_content() -> Arc<ContentIndex> {
        let mut catalog = Catalog::new(CatalogSchema::Content);
        catalog.push_item(
            Item::new("A")
                .with_username("u1")
                .with_category("Vible")
                .with_moods(["happy"])
                .with_rating(50.0),
        );
        catalog.push_item(
            Item::new("B")
                .with_username("u1")
                .with_category("Flic")
                .with_moods(["calm"])
                .with_rating(70.0),
        );
        catalog.push_item(
            Item::new("C")
                .with_username("u2")
                .with_category("Vible")
                .with_moods(["sad"])
                .with_rating(20.0),
        );

        let matrix = SimilarityMatrix::from_rows(vec![
            vec![1.0, 0.9, 0.1],
            vec![0.9, 1.0, 0.2],
            vec![0.1, 0.2, 1.0],
        ])
        .unwrap();
        Arc::new(ContentIndex::new(catalog, matrix).unwrap())
    }

    /// 30 posts viewed round-robin by 3 users, with some repeated titles
    fn build_large_content() -> Arc<ContentIndex> {
        let n: usize = 30;
        let mut catalog = Catalog::new(CatalogSchema::Content);
        for i in 0..n {
            catalog.push_item(
                Item::new(format!("Post {}", i % 20))
                    .with_username(format!("user{}", i % 3))
                    .with_category(if i % 2 == 0 { "Vible" } else { "SolTok" })
                    .with_moods([if i % 4 == 0 { "happy" } else { "calm" }])
                    .with_rating((i * 3) as f64),
            );
        }

        let rows: Vec<Vec<f64>> = (0..n)
            .map(|a| {
                (0..n)
                    .map(|b| if a == b { 1.0 } else { 1.0 / (1.0 + a.abs_diff(b) as f64) })
                    .collect()
            })
            .collect();
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Arc::new(ContentIndex::new(catalog, matrix).unwrap())
    }

    fn build_cold_start() -> Arc<Catalog> {
        let mut catalog = Catalog::new(CatalogSchema::ColdStart);
        catalog.push_item(Item::new("Sunny").with_moods(["happy"]).with_rating(60.0));
        catalog.push_item(Item::new("Rain").with_moods(["sad"]).with_rating(95.0));
        catalog.push_item(Item::new("Party").with_moods(["excited"]).with_rating(80.0));
        catalog.push_item(Item::new("Sunny").with_moods(["happy"]).with_rating(75.0));
        catalog.push_item(Item::new("Glow").with_moods(["very happy"]).with_rating(10.0));
        Arc::new(catalog)
    }

    fn titles(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.title.as_str()).collect()
    }

    // ============================================================================
    // MoodQuery
    // ============================================================================

    #[test]
    fn test_mood_query_splits_and_trims() {
        let moods = MoodQuery::from(" happy , ,excited,").into_moods();
        assert_eq!(moods, vec!["happy", "excited"]);
    }

    #[test]
    fn test_mood_query_list_is_trimmed() {
        let moods = MoodQuery::from(vec![" calm".to_string(), "".to_string()]).into_moods();
        assert_eq!(moods, vec!["calm"]);
    }

    // ============================================================================
    // Warm path
    // ============================================================================

    #[test]
    fn test_unknown_user_gets_empty_feed() {
        let recommender = FeedRecommender::new(build_small_content());
        let posts = recommender.recommend("nobody", None, None).unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn test_most_similar_post_comes_first() {
        let recommender = FeedRecommender::new(build_small_content());
        let posts = recommender.recommend("u1", None, None).unwrap();

        // Ranked by rating: B (70) > A (50) > C (20)
        assert_eq!(titles(&posts), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_feed_is_capped_and_unique() {
        let recommender = FeedRecommender::new(build_large_content());
        let posts = recommender.recommend("user0", None, None).unwrap();

        assert!(!posts.is_empty());
        assert!(posts.len() <= FEED_LIMIT);

        let unique: HashSet<&str> = titles(&posts).into_iter().collect();
        assert_eq!(unique.len(), posts.len());
    }

    #[test]
    fn test_feed_is_sorted_by_rating() {
        let recommender = FeedRecommender::new(build_large_content());
        let posts = recommender.recommend("user1", None, None).unwrap();

        let ratings: Vec<f64> = posts.iter().filter_map(|p| p.rating_percent).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_category_filter_by_id() {
        let recommender = FeedRecommender::new(build_large_content());
        let posts = recommender.recommend("user0", Some("2"), None).unwrap();

        assert!(!posts.is_empty());
        assert!(posts.iter().all(|p| p.has_category("Vible")));
    }

    #[test]
    fn test_unknown_category_behaves_like_none() {
        let recommender = FeedRecommender::new(build_large_content());
        let unfiltered = recommender.recommend("user2", None, None).unwrap();
        let unknown = recommender.recommend("user2", Some("999"), None).unwrap();

        assert_eq!(titles(&unfiltered), titles(&unknown));
    }

    #[test]
    fn test_mood_filter_on_warm_path() {
        let recommender = FeedRecommender::new(build_small_content());
        let posts = recommender
            .recommend("u1", None, Some(MoodQuery::from("calm")))
            .unwrap();

        assert_eq!(titles(&posts), vec!["B"]);
    }

    // ============================================================================
    // Cold-start path
    // ============================================================================

    #[test]
    fn test_recommend_by_mood_happy_excited() {
        let recommender = ColdStartRecommender::new(build_cold_start());
        let posts = recommender.recommend_by_mood("happy,excited").unwrap();

        // "very happy" contains "happy"; the better Sunny row wins
        assert_eq!(titles(&posts), vec!["Party", "Sunny", "Glow"]);
        assert_eq!(posts[1].rating_percent, Some(75.0));
    }

    #[test]
    fn test_recommend_by_mood_without_matches() {
        let recommender = ColdStartRecommender::new(build_cold_start());
        assert!(recommender.recommend_by_mood("angry").unwrap().is_empty());
        assert!(recommender.recommend_by_mood(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_engine_exposes_both_paths() {
        let engine = RecommendationEngine::new(build_small_content(), build_cold_start());

        assert_eq!(engine.recommend("u1", None, None).unwrap().len(), 3);
        assert_eq!(
            titles(&engine.recommend_by_mood(vec!["sad".to_string()]).unwrap()),
            vec!["Rain"]
        );
    }
}
