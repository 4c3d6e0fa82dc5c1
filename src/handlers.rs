use crate::analytics;
use crate::auth::CurrentUser;
use crate::cache::QueryKey;
use crate::dates::{parse_iso_date, today};
use crate::errors::AppError;
use crate::models::{
    AnalyticsSummary, DailyMetric, NewPost, PlatformFilter, Post, PostUpdate, SortColumn,
    SortDirection,
};
use crate::state::AppState;
use crate::storage::persist_data;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Duration;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

pub async fn analytics_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let now = today();
    let data = state.data.lock().await;

    let posts = data.posts_for(
        &user.user_id,
        PlatformFilter::All,
        SortColumn::PostedAt,
        SortDirection::Desc,
    );
    // Only the trailing two windows feed the trend.
    let window_start = (now - Duration::days(14)).to_string();
    let metrics = data.metrics_since(&user.user_id, &window_start);

    Ok(Json(analytics::summarize(&posts, &metrics, now)))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyMetricsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days: Option<String>,
}

pub async fn daily_metrics(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<DailyMetricsQuery>,
) -> Result<Json<Vec<DailyMetric>>, AppError> {
    let (start, end) = resolve_metrics_window(&query)?;

    let data = state.data.lock().await;
    Ok(Json(data.metrics_in_range(&user.user_id, &start, &end)))
}

// Explicit bounds win; otherwise a days count back from today, default 30.
// Validation happens before any query executes.
fn resolve_metrics_window(query: &DailyMetricsQuery) -> Result<(String, String), AppError> {
    if let (Some(start), Some(end)) = (&query.start_date, &query.end_date) {
        if parse_iso_date(start).is_none() || parse_iso_date(end).is_none() {
            return Err(AppError::invalid_parameter(
                "Dates must be in YYYY-MM-DD format",
            ));
        }
        return Ok((start.clone(), end.clone()));
    }

    let days = match &query.days {
        None => 30,
        Some(raw) => match raw.parse::<i64>() {
            Ok(days) if (1..=365).contains(&days) => days,
            _ => {
                return Err(AppError::invalid_parameter(
                    "Days must be a number between 1 and 365",
                ));
            }
        },
    };

    let now = today();
    Ok(((now - Duration::days(days)).to_string(), now.to_string()))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostsListQuery {
    pub platform: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

pub async fn list_posts(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PostsListQuery>,
) -> Result<Json<Value>, AppError> {
    let platform = match &query.platform {
        None => PlatformFilter::All,
        Some(raw) => PlatformFilter::parse(raw)
            .ok_or_else(|| AppError::invalid_parameter(format!("Unknown platform filter: {raw}")))?,
    };
    let sort_column = match &query.sort_column {
        None => SortColumn::PostedAt,
        Some(raw) => SortColumn::parse(raw)
            .ok_or_else(|| AppError::invalid_parameter(format!("Unknown sort column: {raw}")))?,
    };
    let sort_direction = match &query.sort_direction {
        None => SortDirection::Desc,
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| AppError::invalid_parameter(format!("Unknown sort direction: {raw}")))?,
    };

    let key = QueryKey::PostsList {
        platform,
        sort_column,
        sort_direction,
    };
    let cache = state.caches.for_user(&user.user_id);
    if let Some(cached) = cache.get(&key) {
        return Ok(Json(cached));
    }

    let data = state.data.lock().await;
    let posts = data.posts_for(&user.user_id, platform, sort_column, sort_direction);
    drop(data);

    let payload = serde_json::to_value(&posts).map_err(AppError::internal)?;
    cache.insert(key, payload.clone());
    Ok(Json(payload))
}

pub async fn get_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let key = QueryKey::PostDetail { id: id.clone() };
    let cache = state.caches.for_user(&user.user_id);
    if let Some(cached) = cache.get(&key) {
        return Ok(Json(cached));
    }

    let data = state.data.lock().await;
    let post = data
        .post_for(&user.user_id, &id)
        .ok_or(AppError::NotFound("Post"))?;
    drop(data);

    let payload = serde_json::to_value(&post).map_err(AppError::internal)?;
    cache.insert(key, payload.clone());
    Ok(Json(payload))
}

pub async fn create_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = payload.into_post(Uuid::new_v4().to_string());

    let mut data = state.data.lock().await;
    data.insert_post(&user.user_id, post.clone());

    // Invalidation happens before the write's completion is reported.
    state.caches.for_user(&user.user_id).invalidate_post_lists();
    persist_data(&state.data_path, &data).await?;

    Ok((StatusCode::CREATED, Json(post)))
}

pub async fn update_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(update): Json<PostUpdate>,
) -> Result<Json<Post>, AppError> {
    let mut data = state.data.lock().await;
    let post = data
        .update_post(&user.user_id, &id, update)
        .ok_or(AppError::NotFound("Post"))?;

    let cache = state.caches.for_user(&user.user_id);
    cache.invalidate_post_lists();
    cache.invalidate_post_detail(&id);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    if !data.delete_post(&user.user_id, &id) {
        return Err(AppError::NotFound("Post"));
    }

    let cache = state.caches.for_user(&user.user_id);
    cache.invalidate_post_lists();
    cache.invalidate_post_detail(&id);
    persist_data(&state.data_path, &data).await?;

    Ok(StatusCode::NO_CONTENT)
}
