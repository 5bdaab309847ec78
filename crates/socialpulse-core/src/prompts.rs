//! Prompt text sent to the insight workflow
//!
//! Prompts are free text; metric values are always rendered with two
//! decimal places.

use crate::models::CategoryMetrics;

/// Prompt asking for an insight about a single post type
pub fn build_metrics_prompt(metrics: &CategoryMetrics) -> String {
    format!(
        "Analyze the social media performance of '{category}' posts ({count} posts).\n\
         Average likes: {likes:.2}\n\
         Average shares: {shares:.2}\n\
         Average comments: {comments:.2}\n\
         Average sentiment score: {sentiment:.2}\n\
         Explain how this post type performs and suggest how to improve engagement.",
        category = metrics.category,
        count = metrics.post_count,
        likes = metrics.average_likes,
        shares = metrics.average_shares,
        comments = metrics.average_comments,
        sentiment = metrics.average_sentiment,
    )
}

/// Prompt comparing every post type
pub fn build_comparison_prompt(all: &[CategoryMetrics]) -> String {
    let mut prompt = String::from(
        "Compare the social media performance of these post types and say which works best:\n",
    );
    for m in all {
        prompt.push_str(&format!(
            "- {}: likes {:.2}, shares {:.2}, comments {:.2}, sentiment {:.2} ({} posts)\n",
            m.category,
            m.average_likes,
            m.average_shares,
            m.average_comments,
            m.average_sentiment,
            m.post_count
        ));
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> CategoryMetrics {
        CategoryMetrics {
            category: "reel".into(),
            post_count: 3,
            average_likes: 200.0,
            average_shares: 4.5,
            average_comments: 7.333333,
            average_sentiment: -0.126,
        }
    }

    #[test]
    fn test_metrics_prompt_has_two_decimal_values() {
        let prompt = build_metrics_prompt(&metrics());
        assert!(prompt.contains("reel"));
        assert!(prompt.contains("200.00"));
        assert!(prompt.contains("4.50"));
        assert!(prompt.contains("7.33"));
        assert!(prompt.contains("-0.13"));
        assert!(!prompt.contains("7.333"));
    }

    #[test]
    fn test_comparison_prompt_lists_every_category() {
        let mut image = metrics();
        image.category = "image".into();
        image.average_likes = 50.0;

        let prompt = build_comparison_prompt(&[metrics(), image]);
        assert!(prompt.contains("- reel: likes 200.00"));
        assert!(prompt.contains("- image: likes 50.00"));
    }
}
