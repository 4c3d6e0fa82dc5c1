use crate::errors::AppError;
use crate::models::{DailyMetric, PlatformFilter, Post, PostUpdate, SortColumn, SortDirection};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DayMetrics {
    pub engagement: i64,
    pub reach: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserData {
    #[serde(default)]
    pub posts: Vec<Post>,
    // Keyed by YYYY-MM-DD: one metric per calendar day, ascending iteration.
    #[serde(default)]
    pub daily_metrics: BTreeMap<String, DayMetrics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreData {
    #[serde(default)]
    pub users: BTreeMap<String, UserData>,
    // Opaque session tokens, seeded by provisioning rather than managed here.
    #[serde(default)]
    pub sessions: BTreeMap<String, String>,
}

impl StoreData {
    pub fn user_for_token(&self, token: &str) -> Option<String> {
        self.sessions.get(token).cloned()
    }

    // Every query takes the caller's user id; rows are never read across
    // users.
    pub fn posts_for(
        &self,
        user_id: &str,
        platform: PlatformFilter,
        column: SortColumn,
        direction: SortDirection,
    ) -> Vec<Post> {
        let Some(user) = self.users.get(user_id) else {
            return Vec::new();
        };

        let mut posts: Vec<Post> = user
            .posts
            .iter()
            .filter(|post| platform.matches(post.platform))
            .cloned()
            .collect();
        sort_posts(&mut posts, column, direction);
        posts
    }

    pub fn post_for(&self, user_id: &str, post_id: &str) -> Option<Post> {
        self.users
            .get(user_id)?
            .posts
            .iter()
            .find(|post| post.id == post_id)
            .cloned()
    }

    pub fn metrics_in_range(&self, user_id: &str, start: &str, end: &str) -> Vec<DailyMetric> {
        let Some(user) = self.users.get(user_id) else {
            return Vec::new();
        };

        user.daily_metrics
            .range(start.to_string()..=end.to_string())
            .map(|(date, metrics)| to_metric(date, metrics))
            .collect()
    }

    pub fn metrics_since(&self, user_id: &str, start: &str) -> Vec<DailyMetric> {
        let Some(user) = self.users.get(user_id) else {
            return Vec::new();
        };

        user.daily_metrics
            .range(start.to_string()..)
            .map(|(date, metrics)| to_metric(date, metrics))
            .collect()
    }

    pub fn insert_post(&mut self, user_id: &str, post: Post) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .posts
            .push(post);
    }

    pub fn update_post(&mut self, user_id: &str, post_id: &str, update: PostUpdate) -> Option<Post> {
        let user = self.users.get_mut(user_id)?;
        let post = user.posts.iter_mut().find(|post| post.id == post_id)?;

        if let Some(platform) = update.platform {
            post.platform = platform;
        }
        if let Some(caption) = update.caption {
            post.caption = Some(caption);
        }
        if let Some(likes) = update.likes {
            post.likes = likes;
        }
        if let Some(comments) = update.comments {
            post.comments = comments;
        }
        if let Some(shares) = update.shares {
            post.shares = shares;
        }
        if let Some(saves) = update.saves {
            post.saves = saves;
        }
        if let Some(reach) = update.reach {
            post.reach = reach;
        }
        if let Some(impressions) = update.impressions {
            post.impressions = impressions;
        }
        if let Some(engagement_rate) = update.engagement_rate {
            post.engagement_rate = Some(engagement_rate);
        }
        if let Some(posted_at) = update.posted_at {
            post.posted_at = posted_at;
        }
        if let Some(thumbnail_url) = update.thumbnail_url {
            post.thumbnail_url = Some(thumbnail_url);
        }
        if let Some(permalink) = update.permalink {
            post.permalink = Some(permalink);
        }
        if let Some(media_type) = update.media_type {
            post.media_type = media_type;
        }

        Some(post.clone())
    }

    pub fn delete_post(&mut self, user_id: &str, post_id: &str) -> bool {
        let Some(user) = self.users.get_mut(user_id) else {
            return false;
        };
        let before = user.posts.len();
        user.posts.retain(|post| post.id != post_id);
        user.posts.len() < before
    }

    pub fn upsert_metric(&mut self, user_id: &str, metric: DailyMetric) {
        self.users
            .entry(user_id.to_string())
            .or_default()
            .daily_metrics
            .insert(
                metric.date,
                DayMetrics {
                    engagement: metric.engagement,
                    reach: metric.reach,
                },
            );
    }
}

fn to_metric(date: &str, metrics: &DayMetrics) -> DailyMetric {
    DailyMetric {
        date: date.to_string(),
        engagement: metrics.engagement,
        reach: metrics.reach,
    }
}

fn sort_posts(posts: &mut [Post], column: SortColumn, direction: SortDirection) {
    posts.sort_by(|a, b| {
        let ordering = match column {
            SortColumn::PostedAt => a.posted_at.cmp(&b.posted_at),
            SortColumn::Likes => a.likes.cmp(&b.likes),
            SortColumn::Comments => a.comments.cmp(&b.comments),
            SortColumn::Shares => a.shares.cmp(&b.shares),
            SortColumn::EngagementRate => a
                .engagement_rate
                .unwrap_or(0.0)
                .total_cmp(&b.engagement_rate.unwrap_or(0.0)),
            SortColumn::Reach => a.reach.cmp(&b.reach),
            SortColumn::Impressions => a.impressions.cmp(&b.impressions),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

pub async fn load_data(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StoreData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &StoreData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)
        .map_err(|err| AppError::database("Failed to save data", err))?;
    fs::write(path, payload)
        .await
        .map_err(|err| AppError::database("Failed to save data", err))?;
    Ok(())
}
