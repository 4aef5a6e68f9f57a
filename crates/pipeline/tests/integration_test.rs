//! Integration tests for the pipeline.
//!
//! These tests run real candidate generation through the full stage list
//! the recommender uses.

use data_loader::{Catalog, CatalogSchema, ContentIndex, Item, SimilarityMatrix};
use pipeline::filters::*;
use pipeline::{FilterPipeline, RatingRanker};
use sources::{user_context::build_user_context, SimilaritySource};
use std::collections::HashSet;
use std::sync::Arc;

fn create_test_setup() -> Arc<ContentIndex> {
    let mut catalog = Catalog::new(CatalogSchema::Content);

    // alice viewed rows 0 and 1
    let rows = [
        ("Morning Run", "alice", "Vible", "happy", 40.0),
        ("Night Sky", "alice", "Flic", "calm", 55.0),
        ("Beach Day", "bob", "Vible", "happy", 90.0),
        ("Beach Day", "carol", "Vible", "happy", 90.0),
        ("Rainy Walk", "bob", "Flic", "sad", 70.0),
        ("Sunset", "carol", "Vible", "calm", 85.0),
        ("City Lights", "dave", "SolTok", "excited", 60.0),
    ];
    for (title, user, category, mood, rating) in rows {
        catalog.push_item(
            Item::new(title)
                .with_username(user)
                .with_category(category)
                .with_moods([mood])
                .with_rating(rating),
        );
    }

    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.2, 0.9, 0.8, 0.3, 0.7, 0.1],
        vec![0.2, 1.0, 0.6, 0.1, 0.8, 0.9, 0.5],
        vec![0.9, 0.6, 1.0, 1.0, 0.2, 0.4, 0.3],
        vec![0.8, 0.1, 1.0, 1.0, 0.2, 0.4, 0.3],
        vec![0.3, 0.8, 0.2, 0.2, 1.0, 0.3, 0.2],
        vec![0.7, 0.9, 0.4, 0.4, 0.3, 1.0, 0.6],
        vec![0.1, 0.5, 0.3, 0.3, 0.2, 0.6, 1.0],
    ])
    .unwrap();

    Arc::new(ContentIndex::new(catalog, matrix).unwrap())
}

fn warm_pipeline(index: &ContentIndex) -> FilterPipeline {
    FilterPipeline::new()
        .add_filter(DuplicateRowFilter)
        .add_filter(CategoryFilter)
        .add_filter(MoodFilter)
        .add_filter(RatingRanker::new(index.catalog().has_rating_column()))
        .add_filter(UniqueTitleFilter)
}

#[test]
fn test_full_pipeline_ranks_and_dedupes() {
    let index = create_test_setup();
    let source = SimilaritySource::new(index.clone());
    let context = build_user_context(index.catalog(), "alice");

    let candidates = source.get_candidates(&context);
    // 5 neighbours for each of the two viewed rows
    assert_eq!(candidates.len(), 10);

    let ranked = warm_pipeline(&index).apply(candidates, &context).unwrap();

    let titles: Vec<&str> = ranked.iter().map(|c| c.title()).collect();
    assert_eq!(
        titles,
        vec!["Beach Day", "Sunset", "Rainy Walk", "City Lights", "Night Sky", "Morning Run"]
    );

    let unique: HashSet<&str> = titles.iter().copied().collect();
    assert_eq!(unique.len(), titles.len(), "No duplicate titles");
}

#[test]
fn test_category_and_mood_filters_combine() {
    let index = create_test_setup();
    let source = SimilaritySource::new(index.clone());
    let context = build_user_context(index.catalog(), "alice")
        .with_category(Some("Vible".to_string()))
        .with_moods(vec!["calm".to_string()]);

    let candidates = source.get_candidates(&context);
    let ranked = warm_pipeline(&index).apply(candidates, &context).unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].title(), "Sunset");
}

#[test]
fn test_self_never_recommended_from_its_own_row() {
    let index = create_test_setup();
    let source = SimilaritySource::new(index.clone());
    let context = build_user_context(index.catalog(), "alice");

    for candidate in source.get_candidates(&context) {
        assert_ne!(Some(candidate.item.index), candidate.seed);
    }
}
