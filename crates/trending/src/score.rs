/// Likes plus comments. Missing or negative counts count as zero.
pub fn engagement_score(likes: Option<i64>, comments: Option<i64>) -> u64 {
    let clamp = |count: Option<i64>| count.unwrap_or(0).max(0) as u64;
    clamp(likes).saturating_add(clamp(comments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_likes_and_comments() {
        assert_eq!(engagement_score(Some(10), Some(5)), 15);
    }

    #[test]
    fn test_missing_and_negative_counts_are_zero() {
        assert_eq!(engagement_score(None, None), 0);
        assert_eq!(engagement_score(Some(4), None), 4);
        assert_eq!(engagement_score(Some(-3), Some(2)), 2);
    }
}
