//! Per-post-type engagement averages
//!
//! A category with no matching posts is an error (`Error::EmptyCategory`),
//! never a NaN average.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategoryMetrics, EngagementDataset, MetricKind};

/// Compute mean likes, shares, comments and sentiment for one post type
///
/// `category` is matched exactly against `post_type` (case-sensitive).
pub fn compute_metrics(dataset: &EngagementDataset, category: &str) -> Result<CategoryMetrics> {
    let mut post_count = 0usize;
    // Wide enough that summing u64 counters never overflows
    let mut likes = 0u128;
    let mut shares = 0u128;
    let mut comments = 0u128;
    let mut sentiment = 0.0f64;

    for record in dataset.records_for(category) {
        post_count += 1;
        likes += u128::from(record.likes);
        shares += u128::from(record.shares);
        comments += u128::from(record.comments);
        sentiment += record.avg_sentiment_score;
    }

    if post_count == 0 {
        return Err(Error::EmptyCategory(category.to_string()));
    }

    let n = post_count as f64;
    debug!("Computed metrics for '{}' over {} posts", category, post_count);

    Ok(CategoryMetrics {
        category: category.to_string(),
        post_count,
        average_likes: likes as f64 / n,
        average_shares: shares as f64 / n,
        average_comments: comments as f64 / n,
        average_sentiment: sentiment / n,
    })
}

/// Metrics for every post type in the dataset, in first-appearance order
pub fn compute_all_metrics(dataset: &EngagementDataset) -> Vec<CategoryMetrics> {
    dataset
        .categories()
        .into_iter()
        // Every listed category has at least one record
        .filter_map(|category| compute_metrics(dataset, category).ok())
        .collect()
}

/// Post type with the highest average for `kind`
///
/// Ties go to the category that appears first. Returns None for an empty
/// dataset.
pub fn top_category_by(dataset: &EngagementDataset, kind: MetricKind) -> Option<CategoryMetrics> {
    let mut best: Option<CategoryMetrics> = None;
    for metrics in compute_all_metrics(dataset) {
        let better = match &best {
            Some(current) => metrics.value(kind) > current.value(kind),
            None => true,
        };
        if better {
            best = Some(metrics);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EngagementRecord;

    fn rec(id: &str, post_type: &str, likes: u64, shares: u64, comments: u64, s: f64) -> EngagementRecord {
        EngagementRecord {
            post_id: id.into(),
            post_type: post_type.into(),
            likes,
            shares,
            comments,
            avg_sentiment_score: s,
        }
    }

    /// Three post types with hand-computed averages:
    /// - reel:     likes (100+200+300)/3 = 200, shares (10+20+30)/3 = 20,
    ///             comments (5+7+9)/3 = 7, sentiment (0.5+0.25+0.75)/3 = 0.5
    /// - image:    likes (40+60)/2 = 50, shares (4+5)/2 = 4.5,
    ///             comments (1+2)/2 = 1.5, sentiment (-0.2+0.4)/2 = 0.1
    /// - carousel: single post, averages equal its values
    fn fixture() -> EngagementDataset {
        EngagementDataset::new(vec![
            rec("1", "reel", 100, 10, 5, 0.5),
            rec("2", "image", 40, 4, 1, -0.2),
            rec("3", "reel", 200, 20, 7, 0.25),
            rec("4", "carousel", 75, 8, 12, -0.5),
            rec("5", "image", 60, 5, 2, 0.4),
            rec("6", "reel", 300, 30, 9, 0.75),
        ])
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_compute_metrics_reel() {
        let m = compute_metrics(&fixture(), "reel").unwrap();
        assert_eq!(m.post_count, 3);
        assert_close(m.average_likes, 200.0);
        assert_close(m.average_shares, 20.0);
        assert_close(m.average_comments, 7.0);
        assert_close(m.average_sentiment, 0.5);
    }

    #[test]
    fn test_compute_metrics_image() {
        let m = compute_metrics(&fixture(), "image").unwrap();
        assert_eq!(m.post_count, 2);
        assert_close(m.average_likes, 50.0);
        assert_close(m.average_shares, 4.5);
        assert_close(m.average_comments, 1.5);
        assert_close(m.average_sentiment, 0.1);
    }

    #[test]
    fn test_compute_metrics_single_post() {
        let m = compute_metrics(&fixture(), "carousel").unwrap();
        assert_eq!(m.post_count, 1);
        assert_close(m.average_likes, 75.0);
        assert_close(m.average_shares, 8.0);
        assert_close(m.average_comments, 12.0);
        assert_close(m.average_sentiment, -0.5);
    }

    #[test]
    fn test_compute_metrics_counts_near_u64_max() {
        let ds = EngagementDataset::new(vec![
            rec("1", "reel", u64::MAX, u64::MAX, 0, 0.0),
            rec("2", "reel", 1, u64::MAX, 0, 0.0),
        ]);
        let m = compute_metrics(&ds, "reel").unwrap();
        let expected = (u64::MAX as f64 + 1.0) / 2.0;
        assert!((m.average_likes - expected).abs() / expected < 1e-12);
        assert!((m.average_shares - u64::MAX as f64).abs() / (u64::MAX as f64) < 1e-12);
        assert_eq!(m.average_comments, 0.0);
    }

    #[test]
    fn test_absent_category_is_empty_category_error() {
        let err = compute_metrics(&fixture(), "story").unwrap_err();
        assert!(matches!(err, Error::EmptyCategory(ref c) if c == "story"));
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let err = compute_metrics(&fixture(), "Reel").unwrap_err();
        assert!(matches!(err, Error::EmptyCategory(_)));
    }

    #[test]
    fn test_empty_dataset_is_empty_category_error() {
        let err = compute_metrics(&EngagementDataset::default(), "reel").unwrap_err();
        assert!(matches!(err, Error::EmptyCategory(_)));
    }

    #[test]
    fn test_compute_all_metrics_order() {
        let all = compute_all_metrics(&fixture());
        let names: Vec<&str> = all.iter().map(|m| m.category.as_str()).collect();
        assert_eq!(names, vec!["reel", "image", "carousel"]);
    }

    #[test]
    fn test_top_category_by() {
        let ds = fixture();
        assert_eq!(top_category_by(&ds, MetricKind::Likes).unwrap().category, "reel");
        assert_eq!(
            top_category_by(&ds, MetricKind::Comments).unwrap().category,
            "carousel"
        );
        assert_eq!(
            top_category_by(&ds, MetricKind::Sentiment).unwrap().category,
            "reel"
        );
        assert!(top_category_by(&EngagementDataset::default(), MetricKind::Likes).is_none());
    }

    #[test]
    fn test_top_category_tie_goes_to_first() {
        let ds = EngagementDataset::new(vec![
            rec("1", "a", 10, 1, 1, 0.0),
            rec("2", "b", 10, 1, 1, 0.0),
        ]);
        assert_eq!(top_category_by(&ds, MetricKind::Likes).unwrap().category, "a");
    }
}
