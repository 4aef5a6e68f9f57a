use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use data_loader::Item;

use crate::error::RecommendationError;
use crate::orchestrator::MoodQuery;

use super::{ApiError, ApiResult, AppState};

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub username: Option<String>,
    pub category_id: Option<String>,
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub username: String,
    pub recommended_posts: Vec<Item>,
}

#[derive(Debug, Deserialize)]
pub struct ColdStartQuery {
    pub mood: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ColdStartResponse {
    pub recommended_posts: Vec<Item>,
}

/// Trimmed value of a required query parameter.
///
/// Only a missing or empty parameter is rejected. A whitespace-only value
/// passes and trims to an empty query, which yields an empty result.
fn required(value: Option<String>, message: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| v.trim().to_string())
        .ok_or_else(|| ApiError::Validation(message.to_string()))
}

// Handlers

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `GET /feed?username=..&category_id=..&mood=..`
pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let username = required(query.username, "username is required")?;
    let recommender = state.cache.feed().await?;

    let user = username.clone();
    let category_id = query.category_id;
    let moods = query.mood.map(MoodQuery::from);
    let recommended_posts = tokio::task::spawn_blocking(move || {
        recommender.recommend(&user, category_id.as_deref(), moods)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!(
        "Served {} posts to '{}'",
        recommended_posts.len(),
        username
    );
    Ok(Json(FeedResponse {
        username,
        recommended_posts,
    }))
}

/// `GET /coldstart?mood=happy,excited`
pub async fn cold_start(
    State(state): State<AppState>,
    Query(query): Query<ColdStartQuery>,
) -> ApiResult<Json<ColdStartResponse>> {
    let mood = required(query.mood, "Mood is required")?;
    let recommender = state
        .cache
        .cold_start()
        .await
        .map_err(RecommendationError::from)?;

    let recommended_posts =
        tokio::task::spawn_blocking(move || recommender.recommend_by_mood(mood))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))??;

    info!("Served {} cold-start posts", recommended_posts.len());
    Ok(Json(ColdStartResponse { recommended_posts }))
}
