use std::collections::HashSet;

use common::PostRecord;
use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::hashtag::extract_hashtags;
use crate::models::TagTally;
use crate::score::engagement_score;

/// Tallies hashtags over posts created at or after `since`.
///
/// Iteration order of the result is the order in which tags were first
/// encountered. A post id repeated in `posts` is only counted once, and posts
/// without a timestamp are skipped.
pub fn aggregate(posts: &[PostRecord], since: OffsetDateTime) -> IndexMap<String, TagTally> {
    let mut tallies: IndexMap<String, TagTally> = IndexMap::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for post in posts {
        let Some(created_at) = post.created_at else {
            continue;
        };
        if created_at < since || !seen.insert(post.id.as_str()) {
            continue;
        }

        let tags = extract_hashtags(post.body.as_deref());
        if tags.is_empty() {
            continue;
        }

        let score = engagement_score(post.like_count, post.comment_count);
        for tag in tags {
            let tally = tallies.entry(tag).or_default();
            tally.post_count += 1;
            tally.engagement_sum = tally.engagement_sum.saturating_add(score);
        }
    }

    tallies
}
