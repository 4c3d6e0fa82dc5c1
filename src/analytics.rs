use crate::dates::parse_iso_date;
use crate::models::{AnalyticsSummary, DailyMetric, Post, TopPost};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

pub fn summarize(posts: &[Post], metrics: &[DailyMetric], today: NaiveDate) -> AnalyticsSummary {
    if posts.is_empty() {
        return AnalyticsSummary::default();
    }

    let total_engagement: u64 = posts.iter().map(Post::engagement).sum();

    let rate_sum: f64 = posts
        .iter()
        .map(|post| post.engagement_rate.unwrap_or(0.0))
        .sum();
    let average_engagement_rate = rate_sum / posts.len() as f64;

    // Ties keep the first post in input order.
    let mut top = &posts[0];
    for post in &posts[1..] {
        if post.engagement() > top.engagement() {
            top = post;
        }
    }
    let top_performing_post = Some(TopPost {
        id: top.id.clone(),
        caption: top.caption.clone(),
        platform: top.platform,
        engagement: top.engagement(),
        thumbnail_url: top.thumbnail_url.clone(),
    });

    let (current_period_engagement, previous_period_engagement) = window_sums(metrics, today);

    AnalyticsSummary {
        total_engagement,
        average_engagement_rate,
        top_performing_post,
        trend_percentage: trend_percentage(current_period_engagement, previous_period_engagement),
        current_period_engagement,
        previous_period_engagement,
        total_posts: posts.len(),
    }
}

// Current window: date >= today - 7d. Previous window: the 7 days before
// that. Metrics outside both windows are ignored.
fn window_sums(metrics: &[DailyMetric], today: NaiveDate) -> (i64, i64) {
    let current_start = today - Duration::days(7);
    let previous_start = today - Duration::days(14);

    let mut current = 0i64;
    let mut previous = 0i64;
    for metric in metrics {
        let Some(date) = parse_iso_date(&metric.date) else {
            continue;
        };
        if date >= current_start {
            current += metric.engagement;
        } else if date >= previous_start {
            previous += metric.engagement;
        }
    }

    (current, previous)
}

// A zero previous window with current activity counts as a full increase.
fn trend_percentage(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    pub engagement: i64,
    pub reach: i64,
}

pub fn chart_series(metrics: &[DailyMetric]) -> impl Iterator<Item = ChartPoint> + Clone + '_ {
    metrics.iter().map(|metric| ChartPoint {
        date: metric.date.clone(),
        engagement: metric.engagement,
        reach: metric.reach,
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ChartTotals {
    pub engagement: i64,
    pub reach: i64,
    pub trend: f64,
}

// Footer trend splits the series at floor(n/2) and compares the halves.
// Unlike the summary trend there is no 100% special case: a non-positive
// first half always yields 0.
pub fn chart_totals(metrics: &[DailyMetric]) -> ChartTotals {
    if metrics.is_empty() {
        return ChartTotals::default();
    }

    let engagement: i64 = metrics.iter().map(|metric| metric.engagement).sum();
    let reach: i64 = metrics.iter().map(|metric| metric.reach).sum();

    let midpoint = metrics.len() / 2;
    let first_half: i64 = metrics[..midpoint]
        .iter()
        .map(|metric| metric.engagement)
        .sum();
    let second_half: i64 = metrics[midpoint..]
        .iter()
        .map(|metric| metric.engagement)
        .sum();
    let trend = if first_half > 0 {
        (second_half - first_half) as f64 / first_half as f64 * 100.0
    } else {
        0.0
    };

    ChartTotals {
        engagement,
        reach,
        trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaType, Platform};
    use chrono::{TimeZone, Utc};

    fn post(id: &str, likes: u64, comments: u64, shares: u64, rate: Option<f64>) -> Post {
        Post {
            id: id.to_string(),
            platform: Platform::Instagram,
            caption: Some(format!("caption {id}")),
            likes,
            comments,
            shares,
            saves: 0,
            reach: 1_000,
            impressions: 2_000,
            engagement_rate: rate,
            posted_at: Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap(),
            thumbnail_url: None,
            permalink: None,
            media_type: MediaType::Image,
        }
    }

    fn metric(date: &str, engagement: i64, reach: i64) -> DailyMetric {
        DailyMetric {
            date: date.to_string(),
            engagement,
            reach,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn summary_totals_engagement_across_posts() {
        let posts = vec![post("a", 10, 2, 3, None), post("b", 5, 5, 5, None)];
        let summary = summarize(&posts, &[], day(2024, 1, 15));
        assert_eq!(summary.total_engagement, 30);
        assert_eq!(summary.total_posts, 2);
    }

    #[test]
    fn summary_empty_posts_returns_exact_zero_shape() {
        let metrics = vec![metric("2024-01-14", 500, 100)];
        let summary = summarize(&[], &metrics, day(2024, 1, 15));
        assert_eq!(summary, AnalyticsSummary::default());
        assert!(summary.top_performing_post.is_none());
        assert_eq!(summary.trend_percentage, 0.0);
    }

    #[test]
    fn summary_top_post_tie_keeps_first_in_input_order() {
        let posts = vec![post("first", 1, 0, 0, None), post("second", 1, 0, 0, None)];
        let summary = summarize(&posts, &[], day(2024, 1, 15));
        let top = summary.top_performing_post.unwrap();
        assert_eq!(top.id, "first");
        assert_eq!(top.engagement, 1);
    }

    #[test]
    fn summary_average_rate_treats_missing_as_zero() {
        let posts = vec![
            post("a", 0, 0, 0, Some(4.0)),
            post("b", 0, 0, 0, None),
            post("c", 0, 0, 0, Some(2.0)),
        ];
        let summary = summarize(&posts, &[], day(2024, 1, 15));
        assert_eq!(summary.average_engagement_rate, 2.0);
    }

    #[test]
    fn summary_trend_compares_consecutive_windows() {
        let posts = vec![post("a", 1, 0, 0, None)];
        let metrics = vec![
            metric("2024-01-14", 100, 0),
            metric("2024-01-10", 50, 0),
            metric("2024-01-07", 60, 0),
            metric("2024-01-02", 40, 0),
            // outside both windows, ignored
            metric("2023-12-20", 999, 0),
        ];
        let summary = summarize(&posts, &metrics, day(2024, 1, 15));
        assert_eq!(summary.current_period_engagement, 150);
        assert_eq!(summary.previous_period_engagement, 100);
        assert_eq!(summary.trend_percentage, 50.0);
    }

    #[test]
    fn summary_trend_zero_previous_counts_as_full_increase() {
        let posts = vec![post("a", 1, 0, 0, None)];
        let metrics = vec![metric("2024-01-14", 10, 0)];
        let summary = summarize(&posts, &metrics, day(2024, 1, 15));
        assert_eq!(summary.trend_percentage, 100.0);

        let summary = summarize(&posts, &[], day(2024, 1, 15));
        assert_eq!(summary.trend_percentage, 0.0);
    }

    #[test]
    fn chart_series_projects_and_restarts() {
        let metrics = vec![metric("2024-01-01", 10, 20), metric("2024-01-02", 30, 40)];
        let series = chart_series(&metrics);
        let first: Vec<ChartPoint> = series.clone().collect();
        let second: Vec<ChartPoint> = series.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].date, "2024-01-01");
        assert_eq!(first[1].engagement, 30);
        assert_eq!(first[1].reach, 40);
    }

    #[test]
    fn chart_totals_split_trend_uses_floor_midpoint() {
        let metrics = vec![
            metric("2024-01-01", 10, 1),
            metric("2024-01-02", 10, 1),
            metric("2024-01-03", 10, 1),
            metric("2024-01-04", 10, 1),
            metric("2024-01-05", 10, 1),
        ];
        // midpoint = 2: first half 20, second half 30.
        let totals = chart_totals(&metrics);
        assert_eq!(totals.engagement, 50);
        assert_eq!(totals.reach, 5);
        assert_eq!(totals.trend, 50.0);
    }

    #[test]
    fn chart_totals_zero_first_half_never_reports_increase() {
        let metrics = vec![metric("2024-01-01", 0, 0), metric("2024-01-02", 80, 0)];
        let totals = chart_totals(&metrics);
        assert_eq!(totals.engagement, 80);
        assert_eq!(totals.trend, 0.0);
    }

    #[test]
    fn chart_totals_empty_series_is_all_zero() {
        assert_eq!(chart_totals(&[]), ChartTotals::default());
    }
}
