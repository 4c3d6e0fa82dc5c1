use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Carousel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformFilter {
    #[default]
    All,
    Instagram,
    Tiktok,
}

impl PlatformFilter {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "all" => Some(Self::All),
            "instagram" => Some(Self::Instagram),
            "tiktok" => Some(Self::Tiktok),
            _ => None,
        }
    }

    pub fn matches(self, platform: Platform) -> bool {
        match self {
            Self::All => true,
            Self::Instagram => platform == Platform::Instagram,
            Self::Tiktok => platform == Platform::Tiktok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    PostedAt,
    Likes,
    Comments,
    Shares,
    EngagementRate,
    Reach,
    Impressions,
}

impl SortColumn {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "posted_at" => Some(Self::PostedAt),
            "likes" => Some(Self::Likes),
            "comments" => Some(Self::Comments),
            "shares" => Some(Self::Shares),
            "engagement_rate" => Some(Self::EngagementRate),
            "reach" => Some(Self::Reach),
            "impressions" => Some(Self::Impressions),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Line,
    Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub platform: Platform,
    pub caption: Option<String>,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub reach: u64,
    pub impressions: u64,
    pub engagement_rate: Option<f64>,
    pub posted_at: DateTime<Utc>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub media_type: MediaType,
}

impl Post {
    // Engagement is recomputed from its three components, never stored.
    pub fn engagement(&self) -> u64 {
        self.likes + self.comments + self.shares
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date: String,
    pub engagement: i64,
    pub reach: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPost {
    pub id: String,
    pub caption: Option<String>,
    pub platform: Platform,
    pub engagement: u64,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_engagement: u64,
    pub average_engagement_rate: f64,
    pub top_performing_post: Option<TopPost>,
    pub trend_percentage: f64,
    pub current_period_engagement: i64,
    pub previous_period_engagement: i64,
    pub total_posts: usize,
}

#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub platform: Platform,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub reach: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub engagement_rate: Option<f64>,
    pub posted_at: DateTime<Utc>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    pub media_type: MediaType,
}

impl NewPost {
    pub fn into_post(self, id: String) -> Post {
        Post {
            id,
            platform: self.platform,
            caption: self.caption,
            likes: self.likes,
            comments: self.comments,
            shares: self.shares,
            saves: self.saves,
            reach: self.reach,
            impressions: self.impressions,
            engagement_rate: self.engagement_rate,
            posted_at: self.posted_at,
            thumbnail_url: self.thumbnail_url,
            permalink: self.permalink,
            media_type: self.media_type,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostUpdate {
    pub platform: Option<Platform>,
    pub caption: Option<String>,
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
    pub saves: Option<u64>,
    pub reach: Option<u64>,
    pub impressions: Option<u64>,
    pub engagement_rate: Option<f64>,
    pub posted_at: Option<DateTime<Utc>>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub media_type: Option<MediaType>,
}
